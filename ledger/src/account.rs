//! The balance-ledger interface consumed by the exchange, governance and fee burn.

use crate::error::LedgerError;
use votable_types::{Address, TokenAmount};

/// Balance bookkeeping with the invariant `total_supply == Σ balances`.
///
/// `credit` mints and `debit` burns; a transfer is a debit followed by a credit
/// and leaves the supply unchanged. Accounts are created implicitly on first
/// credit and are never removed, even at zero.
pub trait AccountLedger {
    fn balance_of(&self, holder: &Address) -> TokenAmount;

    fn total_supply(&self) -> TokenAmount;

    /// Mint `amount` to `holder`.
    fn credit(&mut self, holder: &Address, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Burn `amount` from `holder`. Fails without side effects if the balance is short.
    fn debit(&mut self, holder: &Address, amount: TokenAmount) -> Result<(), LedgerError>;

    /// Move `amount` from `from` to `to`.
    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<(), LedgerError> {
        if amount.is_zero() {
            return Err(LedgerError::ZeroAmount);
        }
        self.debit(from, amount)?;
        self.credit(to, amount)
    }
}
