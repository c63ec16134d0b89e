//! Staged ledger updates.
//!
//! # Usage
//!
//! ```ignore
//! let mut batch = ledger.batch();
//! batch.credit(&buyer, tokens_out)?;
//! batch.credit(&owner, fee)?;
//! batch.commit();
//! ```
//!
//! If the batch is dropped without calling [`LedgerBatch::commit`], every staged
//! update is discarded and the underlying ledger is left exactly as it was.

use std::collections::BTreeMap;

use crate::account::AccountLedger;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use votable_types::{Address, TokenAmount};

/// A copy-on-write overlay over a [`Ledger`].
///
/// Reads see staged balances first, so a sequence of credits and debits inside
/// one batch behaves exactly like the same sequence applied to the ledger.
#[must_use = "a ledger batch discards its updates unless committed"]
pub struct LedgerBatch<'a> {
    base: &'a mut Ledger,
    staged: BTreeMap<Address, TokenAmount>,
    total_supply: TokenAmount,
}

impl<'a> LedgerBatch<'a> {
    pub(crate) fn new(base: &'a mut Ledger) -> Self {
        let total_supply = base.total_supply();
        Self {
            base,
            staged: BTreeMap::new(),
            total_supply,
        }
    }

    /// Number of accounts touched so far.
    pub fn touched(&self) -> usize {
        self.staged.len()
    }

    /// Apply every staged update to the underlying ledger.
    pub fn commit(self) {
        let touched = self.staged.len();
        self.base.apply(self.staged, self.total_supply);
        tracing::trace!(touched, supply = %self.total_supply, "ledger batch committed");
    }
}

impl AccountLedger for LedgerBatch<'_> {
    fn balance_of(&self, holder: &Address) -> TokenAmount {
        self.staged
            .get(holder)
            .copied()
            .unwrap_or_else(|| self.base.balance_of(holder))
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
        self.staged.insert(*holder, balance);
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
        self.staged.insert(*holder, balance);
        self.total_supply = supply;
        Ok(())
    }
}
