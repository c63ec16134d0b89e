use thiserror::Error;
use votable_fees::FeeError;
use votable_ledger::{LedgerError, TreasuryError};
use votable_types::{ErrorKind, TokenAmount};

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Cannot deposit zero tokens")]
    ZeroDeposit,

    #[error("Cannot withdraw zero tokens")]
    ZeroWithdrawal,

    #[error("Insufficient balance")]
    InsufficientBalance {
        requested: TokenAmount,
        available: TokenAmount,
    },

    #[error("arithmetic overflow in exchange")]
    Overflow,

    #[error(transparent)]
    Treasury(#[from] TreasuryError),

    #[error(transparent)]
    Fee(#[from] FeeError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroDeposit | Self::ZeroWithdrawal => ErrorKind::ZeroAmount,
            Self::InsufficientBalance { .. } => ErrorKind::InsufficientBalance,
            Self::Overflow => ErrorKind::Overflow,
            Self::Treasury(e) => e.kind(),
            Self::Fee(e) => e.kind(),
            Self::Ledger(e) => e.kind(),
        }
    }
}
