use proptest::prelude::*;

use votable_exchange::ExchangeEngine;
use votable_fees::{FeeAccumulator, FeeSchedule};
use votable_ledger::{AccountLedger, Ledger, Treasury, Vault};
use votable_types::{Address, CurrencyAmount, Price, ReferralChain, Timestamp, TokenAmount, SECONDS_PER_WEEK};

proptest! {
    /// Buying and then selling everything bought returns the buyer to zero,
    /// and the treasury keeps at least the forfeited remainder.
    #[test]
    fn buy_then_sell_round_trips(
        price in 1u128..1_000,
        value in 1_000u128..1_000_000_000,
        fee_bps in 0u32..=10_000,
    ) {
        let owner = Address::from_label("owner");
        let buyer = Address::from_label("buyer");
        let price = Price::new(price).unwrap();
        let exchange = ExchangeEngine::new(owner, FeeSchedule::new(fee_bps));
        let mut ledger = Ledger::new();
        let mut vault = Vault::new();
        let mut fees = FeeAccumulator::new(Timestamp::EPOCH, SECONDS_PER_WEEK);

        let bought = exchange
            .buy(&mut ledger, &mut vault, &mut fees, price, &buyer, CurrencyAmount::new(value), &ReferralChain::empty())
            .unwrap();
        prop_assert_eq!(
            ledger.total_supply(),
            bought.tokens_out.checked_add(bought.fee).unwrap()
        );
        prop_assert_eq!(ledger.balance_of(&owner), fees.amount_to_burn());

        let pending = exchange
            .sell(&mut ledger, price, &buyer, bought.tokens_out, &ReferralChain::empty())
            .unwrap();
        let sold = pending.settle(&mut vault).unwrap();

        prop_assert_eq!(ledger.balance_of(&buyer), TokenAmount::ZERO);
        prop_assert!(sold.value.raw() <= value);
        prop_assert_eq!(vault.reserve().raw(), value - sold.value.raw());
        prop_assert!(ledger.is_consistent());
    }
}
