//! The token price: currency units per token, never zero.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::amount::{CurrencyAmount, TokenAmount};
use crate::error::TypesError;

/// Currency units (smallest unit) per protocol token.
///
/// A zero price cannot be constructed or deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u128", into = "u128")]
pub struct Price(u128);

impl Price {
    pub const ONE: Self = Self(1);

    /// Returns `None` for zero.
    pub fn new(raw: u128) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    /// Tokens bought by `value` at this price. The remainder stays with the treasury.
    pub fn tokens_for(&self, value: CurrencyAmount) -> TokenAmount {
        TokenAmount::new(value.raw() / self.0)
    }

    /// Currency paid out for `tokens` at this price. `None` on overflow.
    pub fn value_of(&self, tokens: TokenAmount) -> Option<CurrencyAmount> {
        tokens.raw().checked_mul(self.0).map(CurrencyAmount::new)
    }
}

impl TryFrom<u128> for Price {
    type Error = TypesError;

    fn try_from(raw: u128) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(TypesError::ZeroPrice)
    }
}

impl From<Price> for u128 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei/token", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_price_is_unrepresentable() {
        assert!(Price::new(0).is_none());
        assert!(matches!(Price::try_from(0u128), Err(TypesError::ZeroPrice)));
        assert!(serde_json::from_str::<Price>("0").is_err());
        assert_eq!(serde_json::from_str::<Price>("7").unwrap(), Price::new(7).unwrap());
    }

    #[test]
    fn tokens_for_forfeits_remainder() {
        let price = Price::new(2).unwrap();
        assert_eq!(price.tokens_for(CurrencyAmount::new(5)), TokenAmount::new(2));
        assert_eq!(price.tokens_for(CurrencyAmount::new(1)), TokenAmount::ZERO);
        assert_eq!(
            price.tokens_for(CurrencyAmount::new(100_000_000_000_000_000)),
            TokenAmount::new(50_000_000_000_000_000)
        );
    }

    #[test]
    fn value_of_checks_overflow() {
        let price = Price::new(3).unwrap();
        assert_eq!(price.value_of(TokenAmount::new(4)), Some(CurrencyAmount::new(12)));
        assert_eq!(price.value_of(TokenAmount::new(u128::MAX)), None);
    }
}
