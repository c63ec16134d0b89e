//! Protocol fee handling.
//!
//! Every buy mints a fee on top of the buyer's tokens and credits it to the owner.
//! The fee is tracked as pending revenue and burned from the owner's balance at
//! most once per window:
//!
//! `WaitingForFirstWindow --window elapses--> Open --burn succeeds--> AlreadyBurned --window elapses--> Open`

pub mod accumulator;
pub mod error;
pub mod schedule;

pub use accumulator::{BurnGate, FeeAccumulator};
pub use error::FeeError;
pub use schedule::FeeSchedule;
