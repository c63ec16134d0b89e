use proptest::prelude::*;

use votable_types::{Address, CurrencyAmount, Price, Timestamp, TokenAmount};

proptest! {
    /// Buying at a price never converts more currency than was sent.
    #[test]
    fn tokens_for_never_exceeds_value(price in 1u128..1_000_000, value in 0u128..u64::MAX as u128) {
        let price = Price::new(price).unwrap();
        let tokens = price.tokens_for(CurrencyAmount::new(value));
        let back = price.value_of(tokens).unwrap();
        prop_assert!(back.raw() <= value);
        prop_assert!(value - back.raw() < price.raw(), "forfeited remainder must be below one token");
    }

    /// The fee on a purchase is never larger than the purchase.
    #[test]
    fn fee_bounded_by_amount(tokens in 0u128..u64::MAX as u128, bps in 0u32..=10_000) {
        let fee = TokenAmount::new(tokens).checked_mul_bps(bps).unwrap();
        prop_assert!(fee.raw() <= tokens);
    }

    /// Address display output parses back to the same address.
    #[test]
    fn address_display_parses(bytes in prop::array::uniform20(0u8..)) {
        let addr = Address::new(bytes);
        let parsed: Address = addr.to_string().parse().unwrap();
        prop_assert_eq!(parsed, addr);
        prop_assert_eq!(addr.is_zero(), bytes == [0u8; 20]);
    }

    /// Price bincode encoding preserves the value and the zero check.
    #[test]
    fn price_bincode_preserves_value(raw in 1u128..) {
        let price = Price::new(raw).unwrap();
        let encoded = bincode::serialize(&price).unwrap();
        let decoded: Price = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, price);
    }

    /// has_expired agrees with elapsed_since.
    #[test]
    fn expiry_matches_elapsed(start in 0u64..1_000_000_000, elapsed in 0u64..2_000_000, window in 1u64..1_000_000) {
        let start_ts = Timestamp::new(start);
        let now = Timestamp::new(start + elapsed);
        prop_assert_eq!(start_ts.has_expired(window, now), start_ts.elapsed_since(now) >= window);
    }
}
