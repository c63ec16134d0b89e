//! In-memory balance ledger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::account::AccountLedger;
use crate::batch::LedgerBatch;
use crate::error::LedgerError;
use votable_types::{Address, TokenAmount};

/// Holder balances plus the running total supply.
///
/// Balances are kept in a `BTreeMap` so iteration (and therefore snapshots) is
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    balances: BTreeMap<Address, TokenAmount>,
    total_supply: TokenAmount,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from persisted balances, recomputing the total supply.
    pub fn from_balances(
        entries: impl IntoIterator<Item = (Address, TokenAmount)>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new();
        for (holder, amount) in entries {
            if ledger.balances.contains_key(&holder) {
                return Err(LedgerError::Inconsistent(format!(
                    "duplicate balance entry for {holder}"
                )));
            }
            ledger.credit(&holder, amount)?;
        }
        Ok(ledger)
    }

    /// Start a staged batch of updates. Nothing reaches this ledger until
    /// [`LedgerBatch::commit`] is called.
    pub fn batch(&mut self) -> LedgerBatch<'_> {
        LedgerBatch::new(self)
    }

    /// All known holders and their balances, in address order.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &TokenAmount)> {
        self.balances.iter()
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Whether the stored total supply equals the sum of all balances.
    pub fn is_consistent(&self) -> bool {
        let sum = self
            .balances
            .values()
            .try_fold(TokenAmount::ZERO, |acc, b| acc.checked_add(*b));
        sum == Some(self.total_supply)
    }

    pub(crate) fn apply(&mut self, staged: BTreeMap<Address, TokenAmount>, total_supply: TokenAmount) {
        self.balances.extend(staged);
        self.total_supply = total_supply;
    }
}

impl AccountLedger for Ledger {
    fn balance_of(&self, holder: &Address) -> TokenAmount {
        self.balances.get(holder).copied().unwrap_or(TokenAmount::ZERO)
    }

    fn total_supply(&self) -> TokenAmount {
        self.total_supply
    }

    fn credit(&mut self, holder: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance_of(holder)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(*holder, balance);
        self.total_supply = supply;
        Ok(())
    }

    fn debit(&mut self, holder: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Ok(());
        }
        let available = self.balance_of(holder);
        let balance = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                holder: *holder,
                needed: amount,
                available,
            })?;
        let supply = self.total_supply.checked_sub(amount).ok_or_else(|| {
            LedgerError::Inconsistent(format!("total supply below balance of {holder}"))
        })?;
        if let Some(entry) = self.balances.get_mut(holder) {
            *entry = balance;
        }
        self.total_supply = supply;
        Ok(())
    }
}
