use thiserror::Error;
use votable_types::{Address, ErrorKind, Timestamp};

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("price must be greater than zero")]
    InvalidPrice,

    #[error("caller {0} is not the owner")]
    NotOwner(Address),

    #[error("voting epoch has not elapsed: ends at {ends_at}, {remaining_secs}s remaining")]
    EpochNotElapsed { ends_at: Timestamp, remaining_secs: u64 },

    #[error("arithmetic overflow in vote tally")]
    Overflow,

    #[error("proposal book is inconsistent: {0}")]
    Inconsistent(String),
}

impl GovernanceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPrice => ErrorKind::InvalidPrice,
            Self::NotOwner(_) => ErrorKind::NotOwner,
            Self::EpochNotElapsed { .. } => ErrorKind::EpochNotElapsed,
            Self::Overflow => ErrorKind::Overflow,
            Self::Inconsistent(_) => ErrorKind::Storage,
        }
    }
}
