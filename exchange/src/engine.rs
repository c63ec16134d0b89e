use serde::{Deserialize, Serialize};

use crate::error::ExchangeError;
use votable_fees::{FeeAccumulator, FeeSchedule};
use votable_ledger::{AccountLedger, Treasury};
use votable_types::{Address, CurrencyAmount, Price, ReferralChain, TokenAmount};

/// Result of a successful purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BuyReceipt {
    pub payer: Address,
    pub value: CurrencyAmount,
    pub price: Price,
    pub tokens_out: TokenAmount,
    /// Fee minted to the owner on top of `tokens_out`.
    pub fee: TokenAmount,
}

/// Result of a settled sale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SellReceipt {
    pub seller: Address,
    pub tokens: TokenAmount,
    pub price: Price,
    pub value: CurrencyAmount,
}

/// A sale whose tokens are already debited but whose currency is not yet paid.
#[must_use = "the seller is not paid until the payout is settled"]
#[derive(Debug, PartialEq, Eq)]
pub struct PendingPayout {
    seller: Address,
    tokens: TokenAmount,
    price: Price,
    value: CurrencyAmount,
}

impl PendingPayout {
    pub fn seller(&self) -> &Address {
        &self.seller
    }

    pub fn tokens(&self) -> TokenAmount {
        self.tokens
    }

    pub fn value(&self) -> CurrencyAmount {
        self.value
    }

    /// Pay the seller from `treasury`. This is the sale's only external transfer.
    pub fn settle<T: Treasury + ?Sized>(self, treasury: &mut T) -> Result<SellReceipt, ExchangeError> {
        treasury.payout(&self.seller, self.value)?;
        tracing::info!(
            seller = %self.seller,
            tokens = %self.tokens,
            value = %self.value,
            "sale settled"
        );
        Ok(SellReceipt {
            seller: self.seller,
            tokens: self.tokens,
            price: self.price,
            value: self.value,
        })
    }
}

/// Converts currency to tokens and back at the governed price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeEngine {
    owner: Address,
    schedule: FeeSchedule,
}

impl ExchangeEngine {
    pub fn new(owner: Address, schedule: FeeSchedule) -> Self {
        Self { owner, schedule }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn schedule(&self) -> FeeSchedule {
        self.schedule
    }

    /// Quote a purchase without touching any state: `(tokens_out, fee)`.
    pub fn quote_buy(
        &self,
        price: Price,
        value: CurrencyAmount,
    ) -> Result<(TokenAmount, TokenAmount), ExchangeError> {
        let tokens_out = price.tokens_for(value);
        if tokens_out.is_zero() {
            return Err(ExchangeError::ZeroDeposit);
        }
        Ok((tokens_out, self.schedule.fee_for(tokens_out)?))
    }

    /// Mint `value / price` tokens to `payer`, mint the fee to the owner and
    /// take `value` into the treasury.
    ///
    /// `ledger` should be a staging batch: if any step fails the caller drops
    /// it. `fees` and `treasury` are only touched once every other step has
    /// succeeded, with the treasury deposit last.
    #[allow(clippy::too_many_arguments)]
    pub fn buy<L, T>(
        &self,
        ledger: &mut L,
        treasury: &mut T,
        fees: &mut FeeAccumulator,
        price: Price,
        payer: &Address,
        value: CurrencyAmount,
        referrals: &ReferralChain,
    ) -> Result<BuyReceipt, ExchangeError>
    where
        L: AccountLedger + ?Sized,
        T: Treasury + ?Sized,
    {
        let (tokens_out, fee) = self.quote_buy(price, value)?;

        ledger.credit(payer, tokens_out)?;
        ledger.credit(&self.owner, fee)?;
        let mut staged_fees = fees.clone();
        staged_fees.accrue(fee)?;

        treasury.deposit(value)?;
        *fees = staged_fees;

        tracing::info!(
            %payer,
            %value,
            %price,
            %tokens_out,
            %fee,
            referrers = referrals.len(),
            "tokens bought"
        );
        Ok(BuyReceipt {
            payer: *payer,
            value,
            price,
            tokens_out,
            fee,
        })
    }

    /// Burn `amount` of `seller`'s tokens and return the payout owed for them.
    ///
    /// The debit happens here; the currency moves only when the returned
    /// [`PendingPayout`] is settled.
    pub fn sell<L: AccountLedger + ?Sized>(
        &self,
        ledger: &mut L,
        price: Price,
        seller: &Address,
        amount: TokenAmount,
        referrals: &ReferralChain,
    ) -> Result<PendingPayout, ExchangeError> {
        if amount.is_zero() {
            return Err(ExchangeError::ZeroWithdrawal);
        }
        let available = ledger.balance_of(seller);
        if amount > available {
            return Err(ExchangeError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        let value = price.value_of(amount).ok_or(ExchangeError::Overflow)?;

        ledger.debit(seller, amount)?;
        tracing::debug!(%seller, %amount, %value, referrers = referrals.len(), "sale debited");
        Ok(PendingPayout {
            seller: *seller,
            tokens: amount,
            price,
            value,
        })
    }
}
