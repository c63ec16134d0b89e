//! Balance ledger and treasury custody.
//!
//! The token core consumes both through narrow traits:
//! - [`AccountLedger`]: `credit` (mint), `debit` (burn), `balance_of`, `total_supply`
//! - [`Treasury`]: `deposit` and `payout` of backing currency
//!
//! In-memory implementations are provided ([`Ledger`], [`Vault`]) together with
//! [`LedgerBatch`], a staging overlay that makes multi-step balance updates atomic.

pub mod account;
pub mod batch;
pub mod error;
pub mod ledger;
pub mod treasury;

pub use account::AccountLedger;
pub use batch::LedgerBatch;
pub use error::{LedgerError, TreasuryError};
pub use ledger::Ledger;
pub use treasury::{Treasury, Vault};
