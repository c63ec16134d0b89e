//! Pending fee revenue and the weekly burn gate.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use votable_ledger::AccountLedger;
use votable_types::{Address, Timestamp, TokenAmount};

/// State of the burn gate at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurnGate {
    /// A burn may execute now.
    Open,
    /// No burn has happened yet and the first window has not elapsed since creation.
    WaitingForFirstWindow { opens_at: Timestamp },
    /// A burn already executed within the current window.
    AlreadyBurned {
        burned_at: Timestamp,
        next_window_at: Timestamp,
    },
}

impl BurnGate {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

/// Fee revenue minted to the owner since the last burn.
///
/// The gate is not stored as a flag: it is derived from `created_at`,
/// `last_burn_at` and the caller's `now`, so it can never drift from the clock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeAccumulator {
    pending: TokenAmount,
    last_burn_at: Option<Timestamp>,
    created_at: Timestamp,
    window_secs: u64,
    /// Cumulative amount burned over the accumulator's lifetime.
    total_burned: TokenAmount,
}

impl FeeAccumulator {
    pub fn new(created_at: Timestamp, window_secs: u64) -> Self {
        Self {
            pending: TokenAmount::ZERO,
            last_burn_at: None,
            created_at,
            window_secs,
            total_burned: TokenAmount::ZERO,
        }
    }

    /// Fee revenue awaiting the next burn.
    pub fn amount_to_burn(&self) -> TokenAmount {
        self.pending
    }

    pub fn last_burn_at(&self) -> Option<Timestamp> {
        self.last_burn_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    pub fn total_burned(&self) -> TokenAmount {
        self.total_burned
    }

    pub fn gate(&self, now: Timestamp) -> BurnGate {
        match self.last_burn_at {
            Some(burned_at) if !burned_at.has_expired(self.window_secs, now) => {
                BurnGate::AlreadyBurned {
                    burned_at,
                    next_window_at: burned_at.saturating_add_secs(self.window_secs),
                }
            }
            Some(_) => BurnGate::Open,
            None if !self.created_at.has_expired(self.window_secs, now) => {
                BurnGate::WaitingForFirstWindow {
                    opens_at: self.created_at.saturating_add_secs(self.window_secs),
                }
            }
            None => BurnGate::Open,
        }
    }

    pub fn is_open(&self, now: Timestamp) -> bool {
        self.gate(now).is_open()
    }

    /// Add freshly minted fee revenue.
    pub fn accrue(&mut self, fee: TokenAmount) -> Result<(), FeeError> {
        self.pending = self.pending.checked_add(fee).ok_or(FeeError::Overflow)?;
        Ok(())
    }

    /// Burn all pending fee revenue from `owner`'s balance and close the gate.
    ///
    /// Total supply drops by exactly the pending amount. Returns the amount burned.
    pub fn burn<L: AccountLedger>(
        &mut self,
        ledger: &mut L,
        owner: &Address,
        now: Timestamp,
    ) -> Result<TokenAmount, FeeError> {
        match self.gate(now) {
            BurnGate::Open => {}
            BurnGate::WaitingForFirstWindow { opens_at } => {
                return Err(FeeError::WindowNotElapsed { opens_at });
            }
            BurnGate::AlreadyBurned { next_window_at, .. } => {
                return Err(FeeError::AlreadyExecuted { next_window_at });
            }
        }

        let amount = self.pending;
        let total_burned = self
            .total_burned
            .checked_add(amount)
            .ok_or(FeeError::Overflow)?;
        ledger.debit(owner, amount)?;

        self.pending = TokenAmount::ZERO;
        self.last_burn_at = Some(now);
        self.total_burned = total_burned;
        tracing::info!(%owner, burned = %amount, at = %now, "fee revenue burned");
        Ok(amount)
    }
}
