//! The votable token.
//!
//! [`VotableToken`] owns the single process-wide state: the balance ledger,
//! the governed price, the proposal book and active epoch, the fee
//! accumulator and the treasury. Every operation reads the clock once and is
//! all-or-nothing: a failure leaves every part of that state as it was.
//!
//! State can be captured as a [`TokenSnapshot`] and restored later; a
//! [`TokenConfig`] loaded from TOML supplies the construction parameters.

pub mod config;
pub mod error;
pub mod snapshot;
pub mod token;

pub use config::{ParamsConfig, TokenConfig};
pub use error::VotableError;
pub use snapshot::TokenSnapshot;
pub use token::{BurnReceipt, TokenStatus, TransferReceipt, VotableToken};
pub use votable_ledger::{Treasury, Vault};
