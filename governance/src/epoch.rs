//! Voting epochs.

use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;
use votable_types::Timestamp;

/// Lifecycle of an epoch. Only the current epoch is ever `Open`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpochState {
    Open,
    Closed,
}

/// A voting period. It stays open past its duration until the owner finalizes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteEpoch {
    pub number: u64,
    pub started_at: Timestamp,
    pub duration_secs: u64,
    pub state: EpochState,
}

impl VoteEpoch {
    pub fn open(number: u64, started_at: Timestamp, duration_secs: u64) -> Self {
        Self {
            number,
            started_at,
            duration_secs,
            state: EpochState::Open,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == EpochState::Open
    }

    /// Earliest instant at which the epoch may be finalized.
    pub fn ends_at(&self) -> Timestamp {
        self.started_at.saturating_add_secs(self.duration_secs)
    }

    pub fn has_elapsed(&self, now: Timestamp) -> bool {
        self.started_at.has_expired(self.duration_secs, now)
    }

    pub fn remaining_secs(&self, now: Timestamp) -> u64 {
        self.ends_at().as_secs().saturating_sub(now.as_secs())
    }

    pub fn ensure_elapsed(&self, now: Timestamp) -> Result<(), GovernanceError> {
        if self.has_elapsed(now) {
            Ok(())
        } else {
            Err(GovernanceError::EpochNotElapsed {
                ends_at: self.ends_at(),
                remaining_secs: self.remaining_secs(now),
            })
        }
    }

    /// The epoch that opens when this one is finalized at `now`.
    pub fn successor(&self, now: Timestamp) -> Result<VoteEpoch, GovernanceError> {
        let number = self.number.checked_add(1).ok_or(GovernanceError::Overflow)?;
        Ok(Self::open(number, now, self.duration_secs))
    }

    pub fn closed(&self) -> VoteEpoch {
        Self {
            state: EpochState::Closed,
            ..self.clone()
        }
    }
}
