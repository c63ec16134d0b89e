//! The token orchestrator.

use serde::Serialize;

use crate::error::VotableError;
use votable_exchange::{BuyReceipt, ExchangeEngine, SellReceipt};
use votable_fees::{BurnGate, FeeAccumulator, FeeSchedule};
use votable_governance::{EpochOutcome, GovernanceEngine, VoteEpoch, VoteReceipt, VoterRecord};
use votable_ledger::{AccountLedger, Ledger, Treasury, Vault};
use votable_types::{
    Address, Clock, CurrencyAmount, Price, ProtocolParams, ReferralChain, SystemClock, Timestamp,
    TokenAmount,
};

/// Result of a fee burn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BurnReceipt {
    pub burned: TokenAmount,
    pub burned_at: Timestamp,
    pub next_window_at: Timestamp,
    pub total_supply: TokenAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub from: Address,
    pub to: Address,
    pub amount: TokenAmount,
}

/// Point-in-time summary of the token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenStatus {
    pub now: Timestamp,
    pub owner: Address,
    pub price: Price,
    pub total_supply: TokenAmount,
    pub holders: usize,
    pub treasury_reserve: CurrencyAmount,
    pub amount_to_burn: TokenAmount,
    pub burn_gate: BurnGate,
    pub epoch: VoteEpoch,
    pub epoch_elapsed: bool,
    pub total_votes: TokenAmount,
    pub proposals: usize,
    /// Distinct holders who voted in the open epoch.
    pub voters: usize,
}

/// A token instance: ledger, governed price, governance, fees and treasury.
///
/// Operations take `&mut self`, so calls are serialized by construction.
/// `end_vote` is the only writer of the price after construction.
pub struct VotableToken<T: Treasury = Vault, C: Clock = SystemClock> {
    params: ProtocolParams,
    ledger: Ledger,
    price: Price,
    fees: FeeAccumulator,
    exchange: ExchangeEngine,
    governance: GovernanceEngine,
    treasury: T,
    clock: C,
}

impl<T: Treasury, C: Clock> VotableToken<T, C> {
    /// Create a token: mint the owner's initial supply, open the first
    /// epoch and start the first burn window at the clock's "now".
    pub fn new(
        owner: Address,
        params: ProtocolParams,
        treasury: T,
        clock: C,
    ) -> Result<Self, VotableError> {
        params.validate()?;
        let now = clock.now();

        let mut ledger = Ledger::new();
        ledger.credit(&owner, params.owner_initial_supply)?;

        tracing::info!(
            %owner,
            price = %params.initial_price,
            supply = %params.owner_initial_supply,
            fee_bps = params.fee_bps,
            at = %now,
            "token created"
        );

        Ok(Self {
            price: params.initial_price,
            fees: FeeAccumulator::new(now, params.burn_window_secs),
            exchange: ExchangeEngine::new(owner, FeeSchedule::new(params.fee_bps)),
            governance: GovernanceEngine::new(owner, params.epoch_duration_secs, now),
            params,
            ledger,
            treasury,
            clock,
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        params: ProtocolParams,
        ledger: Ledger,
        price: Price,
        fees: FeeAccumulator,
        exchange: ExchangeEngine,
        governance: GovernanceEngine,
        treasury: T,
        clock: C,
    ) -> Self {
        Self {
            params,
            ledger,
            price,
            fees,
            exchange,
            governance,
            treasury,
            clock,
        }
    }

    // ── Exchange ───────────────────────────────────────────────────────

    /// Buy `value / price` tokens for `payer`; the fee is minted to the owner.
    pub fn buy(
        &mut self,
        payer: &Address,
        value: CurrencyAmount,
        referrals: &ReferralChain,
    ) -> Result<BuyReceipt, VotableError> {
        let mut batch = self.ledger.batch();
        let receipt = self
            .exchange
            .buy(
                &mut batch,
                &mut self.treasury,
                &mut self.fees,
                self.price,
                payer,
                value,
                referrals,
            )
            .map_err(|e| rejected("buy", e))?;
        batch.commit();
        Ok(receipt)
    }

    /// Sell `amount` of `seller`'s tokens back to the treasury.
    ///
    /// The debit is committed before the payout. If the payout fails the
    /// seller's tokens are restored and the payout error is returned.
    pub fn sell(
        &mut self,
        seller: &Address,
        amount: TokenAmount,
        referrals: &ReferralChain,
    ) -> Result<SellReceipt, VotableError> {
        let mut batch = self.ledger.batch();
        let pending = self
            .exchange
            .sell(&mut batch, self.price, seller, amount, referrals)
            .map_err(|e| rejected("sell", e))?;
        batch.commit();

        let tokens = pending.tokens();
        match pending.settle(&mut self.treasury) {
            Ok(receipt) => Ok(receipt),
            Err(err) => {
                self.ledger.credit(seller, tokens)?;
                tracing::warn!(%seller, %tokens, error = %err, "payout failed, sale reverted");
                Err(err.into())
            }
        }
    }

    // ── Governance ─────────────────────────────────────────────────────

    /// Vote for `candidate` with the caller's whole current balance.
    pub fn vote(
        &mut self,
        voter: &Address,
        candidate: u128,
        referrals: &ReferralChain,
    ) -> Result<VoteReceipt, VotableError> {
        self.governance
            .vote(&self.ledger, voter, candidate, referrals)
            .map_err(|e| rejected("vote", e))
    }

    /// Finalize the active epoch. Owner only, once the epoch has elapsed.
    pub fn end_vote(&mut self, caller: &Address) -> Result<EpochOutcome, VotableError> {
        let now = self.clock.now();
        self.governance
            .end_vote(caller, &mut self.price, now)
            .map_err(|e| rejected("end_vote", e))
    }

    // ── Fees ───────────────────────────────────────────────────────────

    /// Burn the pending fee revenue from the owner's balance.
    pub fn burn_fee(&mut self) -> Result<BurnReceipt, VotableError> {
        let now = self.clock.now();
        let owner = self.exchange.owner();
        let burned = self
            .fees
            .burn(&mut self.ledger, &owner, now)
            .map_err(|e| rejected("burn_fee", e))?;
        Ok(BurnReceipt {
            burned,
            burned_at: now,
            next_window_at: now.saturating_add_secs(self.fees.window_secs()),
            total_supply: self.ledger.total_supply(),
        })
    }

    // ── Ledger ─────────────────────────────────────────────────────────

    pub fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: TokenAmount,
    ) -> Result<TransferReceipt, VotableError> {
        let mut batch = self.ledger.batch();
        batch
            .transfer(from, to, amount)
            .map_err(|e| rejected("transfer", e))?;
        batch.commit();
        tracing::info!(%from, %to, %amount, "tokens transferred");
        Ok(TransferReceipt {
            from: *from,
            to: *to,
            amount,
        })
    }

    // ── Views ──────────────────────────────────────────────────────────

    pub fn token_price(&self) -> Price {
        self.price
    }

    pub fn amount_to_burn(&self) -> TokenAmount {
        self.fees.amount_to_burn()
    }

    pub fn total_votes_counted(&self) -> TokenAmount {
        self.governance.total_votes_counted()
    }

    /// Proposals as parallel `(prices, weights)`, heaviest first.
    pub fn prices_list(&self) -> (Vec<Price>, Vec<TokenAmount>) {
        self.governance.prices_list()
    }

    pub fn balance_of(&self, holder: &Address) -> TokenAmount {
        self.ledger.balance_of(holder)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.ledger.total_supply()
    }

    pub fn owner(&self) -> Address {
        self.exchange.owner()
    }

    pub fn voter(&self, holder: &Address) -> Option<&VoterRecord> {
        self.governance.voter(holder)
    }

    /// Referrer credited for `holder`'s vote this epoch, or the zero address.
    pub fn credited_referrer(&self, holder: &Address) -> Address {
        self.governance.credited_referrer(holder)
    }

    pub fn current_epoch(&self) -> &VoteEpoch {
        self.governance.current_epoch()
    }

    pub fn treasury_balance(&self) -> CurrencyAmount {
        self.treasury.reserve()
    }

    pub fn burn_gate(&self) -> BurnGate {
        self.fees.gate(self.clock.now())
    }

    pub fn params(&self) -> &ProtocolParams {
        &self.params
    }

    pub fn status(&self) -> TokenStatus {
        let now = self.clock.now();
        let epoch = self.governance.current_epoch().clone();
        TokenStatus {
            now,
            owner: self.owner(),
            price: self.price,
            total_supply: self.ledger.total_supply(),
            holders: self.ledger.holder_count(),
            treasury_reserve: self.treasury.reserve(),
            amount_to_burn: self.fees.amount_to_burn(),
            burn_gate: self.fees.gate(now),
            epoch_elapsed: epoch.has_elapsed(now),
            epoch,
            total_votes: self.governance.total_votes_counted(),
            proposals: self.governance.book().len(),
            voters: self.governance.voter_count(),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn treasury(&self) -> &T {
        &self.treasury
    }

    pub fn treasury_mut(&mut self) -> &mut T {
        &mut self.treasury
    }

    pub(crate) fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub(crate) fn fees(&self) -> &FeeAccumulator {
        &self.fees
    }

    pub(crate) fn exchange(&self) -> &ExchangeEngine {
        &self.exchange
    }

    pub(crate) fn governance(&self) -> &GovernanceEngine {
        &self.governance
    }
}

fn rejected<E: Into<VotableError>>(operation: &'static str, err: E) -> VotableError {
    let err = err.into();
    tracing::debug!(operation, kind = %err.kind(), reason = %err, "operation rejected");
    err
}
