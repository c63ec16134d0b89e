//! Fundamental types for the votable token.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! holder addresses, token and currency amounts, the non-zero price, timestamps and the
//! injectable clock, referral chains, protocol parameters, and the stable error vocabulary.

pub mod address;
pub mod amount;
pub mod error;
pub mod params;
pub mod price;
pub mod referral;
pub mod time;

pub use address::Address;
pub use amount::{CurrencyAmount, TokenAmount};
pub use error::{ErrorClass, ErrorKind, TypesError};
pub use params::ProtocolParams;
pub use price::Price;
pub use referral::ReferralChain;
pub use time::{Clock, SystemClock, Timestamp, SECONDS_PER_WEEK};
