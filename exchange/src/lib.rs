//! Currency/token exchange for the votable token.
//!
//! Buyers pay currency into the treasury and receive tokens at the current
//! price, with a protocol fee minted to the owner on top. Sellers burn tokens
//! and are paid from the treasury. A sell debits the seller before any
//! currency leaves the treasury: [`ExchangeEngine::sell`] hands back a
//! [`PendingPayout`] that can only be settled once the debit is in place.

pub mod engine;
pub mod error;

pub use engine::{BuyReceipt, ExchangeEngine, PendingPayout, SellReceipt};
pub use error::ExchangeError;
