use thiserror::Error;
use votable_exchange::ExchangeError;
use votable_fees::FeeError;
use votable_governance::GovernanceError;
use votable_ledger::{LedgerError, TreasuryError};
use votable_types::{ErrorKind, TypesError};

/// Every failure a token operation can report.
///
/// `Display` is the stable, human-readable reason; [`VotableError::kind`]
/// is the stable machine key.
#[derive(Debug, Error)]
pub enum VotableError {
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Fee(#[from] FeeError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Treasury(#[from] TreasuryError),

    #[error(transparent)]
    Types(#[from] TypesError),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),
}

impl VotableError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Exchange(e) => e.kind(),
            Self::Governance(e) => e.kind(),
            Self::Fee(e) => e.kind(),
            Self::Ledger(e) => e.kind(),
            Self::Treasury(e) => e.kind(),
            Self::Types(e) => e.kind(),
            Self::Storage(_) => ErrorKind::Storage,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_reason_and_kind() {
        let err = VotableError::from(FeeError::WindowNotElapsed {
            opens_at: votable_types::Timestamp::EPOCH,
        });
        assert_eq!(err.to_string(), "Only once a week");
        assert_eq!(err.kind(), ErrorKind::WindowNotElapsed);

        let err = VotableError::from(ExchangeError::ZeroWithdrawal);
        assert_eq!(err.to_string(), "Cannot withdraw zero tokens");
        assert_eq!(err.kind(), ErrorKind::ZeroAmount);
    }
}
