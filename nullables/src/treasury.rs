//! Nullable treasury — records every call and can be told to fail payouts.

use votable_ledger::{Treasury, TreasuryError};
use votable_types::{Address, CurrencyAmount};

/// A call the treasury accepted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TreasuryCall {
    Deposit(CurrencyAmount),
    Payout(Address, CurrencyAmount),
}

/// An in-memory treasury for testing.
#[derive(Debug, Default)]
pub struct NullTreasury {
    reserve: CurrencyAmount,
    calls: Vec<TreasuryCall>,
    fail_payouts: bool,
}

impl NullTreasury {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reserve(reserve: CurrencyAmount) -> Self {
        Self {
            reserve,
            ..Self::default()
        }
    }

    /// Make every following payout fail as a rejected transfer.
    pub fn fail_payouts(&mut self, fail: bool) {
        self.fail_payouts = fail;
    }

    /// Accepted calls, oldest first.
    pub fn calls(&self) -> &[TreasuryCall] {
        &self.calls
    }

    pub fn payouts(&self) -> impl Iterator<Item = (&Address, CurrencyAmount)> {
        self.calls.iter().filter_map(|call| match call {
            TreasuryCall::Payout(holder, amount) => Some((holder, *amount)),
            TreasuryCall::Deposit(_) => None,
        })
    }
}

impl Treasury for NullTreasury {
    fn reserve(&self) -> CurrencyAmount {
        self.reserve
    }

    fn deposit(&mut self, amount: CurrencyAmount) -> Result<(), TreasuryError> {
        self.reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(TreasuryError::Overflow)?;
        self.calls.push(TreasuryCall::Deposit(amount));
        Ok(())
    }

    fn payout(&mut self, holder: &Address, amount: CurrencyAmount) -> Result<(), TreasuryError> {
        if self.fail_payouts {
            return Err(TreasuryError::TransferFailed {
                holder: *holder,
                reason: "recipient rejected the transfer".into(),
            });
        }
        self.reserve = self
            .reserve
            .checked_sub(amount)
            .ok_or(TreasuryError::InsufficientTreasury {
                needed: amount,
                available: self.reserve,
            })?;
        self.calls.push(TreasuryCall::Payout(*holder, amount));
        Ok(())
    }
}
