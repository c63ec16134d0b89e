//! Custody of the backing currency.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::TreasuryError;
use votable_types::{Address, CurrencyAmount};

/// Holds the currency paid in by buyers and pays sellers out.
///
/// `payout` is the only outbound value transfer in the system. Callers must
/// finish every internal state change before invoking it.
pub trait Treasury {
    /// Currency currently held.
    fn reserve(&self) -> CurrencyAmount;

    fn deposit(&mut self, amount: CurrencyAmount) -> Result<(), TreasuryError>;

    fn payout(&mut self, holder: &Address, amount: CurrencyAmount) -> Result<(), TreasuryError>;
}

/// In-memory treasury that tracks its reserve and what each holder has received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    reserve: CurrencyAmount,
    paid_out: BTreeMap<Address, CurrencyAmount>,
}

impl Vault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reserve(reserve: CurrencyAmount) -> Self {
        Self {
            reserve,
            paid_out: BTreeMap::new(),
        }
    }

    /// Total currency paid to `holder` over the vault's lifetime.
    pub fn paid_to(&self, holder: &Address) -> CurrencyAmount {
        self.paid_out.get(holder).copied().unwrap_or(CurrencyAmount::ZERO)
    }
}

impl Treasury for Vault {
    fn reserve(&self) -> CurrencyAmount {
        self.reserve
    }

    fn deposit(&mut self, amount: CurrencyAmount) -> Result<(), TreasuryError> {
        self.reserve = self
            .reserve
            .checked_add(amount)
            .ok_or(TreasuryError::Overflow)?;
        Ok(())
    }

    fn payout(&mut self, holder: &Address, amount: CurrencyAmount) -> Result<(), TreasuryError> {
        let reserve = self
            .reserve
            .checked_sub(amount)
            .ok_or(TreasuryError::InsufficientTreasury {
                needed: amount,
                available: self.reserve,
            })?;
        let received = self
            .paid_to(holder)
            .checked_add(amount)
            .ok_or(TreasuryError::Overflow)?;
        self.reserve = reserve;
        self.paid_out.insert(*holder, received);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposit_then_payout() {
        let holder = Address::new([7; 20]);
        let mut vault = Vault::new();
        vault.deposit(CurrencyAmount::new(10)).unwrap();
        vault.payout(&holder, CurrencyAmount::new(4)).unwrap();
        assert_eq!(vault.reserve(), CurrencyAmount::new(6));
        assert_eq!(vault.paid_to(&holder), CurrencyAmount::new(4));
    }

    #[test]
    fn payout_beyond_reserve_fails_cleanly() {
        let holder = Address::new([7; 20]);
        let mut vault = Vault::with_reserve(CurrencyAmount::new(3));
        let err = vault.payout(&holder, CurrencyAmount::new(4)).unwrap_err();
        assert!(matches!(err, TreasuryError::InsufficientTreasury { .. }));
        assert_eq!(vault.reserve(), CurrencyAmount::new(3));
        assert_eq!(vault.paid_to(&holder), CurrencyAmount::ZERO);
    }

    #[test]
    fn deposit_overflow_is_reported() {
        let mut vault = Vault::with_reserve(CurrencyAmount::new(u128::MAX));
        assert!(matches!(
            vault.deposit(CurrencyAmount::new(1)),
            Err(TreasuryError::Overflow)
        ));
    }
}
