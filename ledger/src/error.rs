use thiserror::Error;
use votable_types::{Address, CurrencyAmount, ErrorKind, TokenAmount};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Insufficient balance")]
    InsufficientBalance {
        holder: Address,
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("Cannot transfer zero tokens")]
    ZeroAmount,

    #[error("arithmetic overflow in ledger update")]
    Overflow,

    #[error("ledger is inconsistent: {0}")]
    Inconsistent(String),
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::ZeroAmount => ErrorKind::ZeroAmount,
            Self::Overflow => ErrorKind::Overflow,
            Self::Inconsistent(_) => ErrorKind::Storage,
        }
    }
}

#[derive(Debug, Error)]
pub enum TreasuryError {
    #[error("insufficient treasury reserve: need {needed}, have {available}")]
    InsufficientTreasury {
        needed: CurrencyAmount,
        available: CurrencyAmount,
    },

    #[error("arithmetic overflow in treasury update")]
    Overflow,

    #[error("payout to {holder} failed: {reason}")]
    TransferFailed { holder: Address, reason: String },
}

impl TreasuryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientTreasury { .. } => ErrorKind::InsufficientTreasury,
            Self::Overflow => ErrorKind::Overflow,
            Self::TransferFailed { .. } => ErrorKind::TransferFailed,
        }
    }
}
