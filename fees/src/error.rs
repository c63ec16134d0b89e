use thiserror::Error;
use votable_ledger::LedgerError;
use votable_types::{ErrorKind, Timestamp};

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("Only once a week")]
    WindowNotElapsed { opens_at: Timestamp },

    #[error("Already executed")]
    AlreadyExecuted { next_window_at: Timestamp },

    #[error("arithmetic overflow in fee computation")]
    Overflow,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl FeeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::WindowNotElapsed { .. } => ErrorKind::WindowNotElapsed,
            Self::AlreadyExecuted { .. } => ErrorKind::AlreadyExecuted,
            Self::Overflow => ErrorKind::Overflow,
            Self::Ledger(e) => e.kind(),
        }
    }
}
