//! The fixed protocol fee schedule.

use serde::{Deserialize, Serialize};

use crate::error::FeeError;
use votable_types::TokenAmount;

/// Fee charged on each purchase, as basis points of the tokens bought.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub fee_bps: u32,
}

impl FeeSchedule {
    pub fn new(fee_bps: u32) -> Self {
        Self { fee_bps }
    }

    /// Fee for a purchase of `tokens_out`, rounded down.
    pub fn fee_for(&self, tokens_out: TokenAmount) -> Result<TokenAmount, FeeError> {
        tokens_out
            .checked_mul_bps(self.fee_bps)
            .ok_or(FeeError::Overflow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_percent_of_a_large_purchase() {
        let schedule = FeeSchedule::new(100);
        assert_eq!(
            schedule.fee_for(TokenAmount::new(50_000_000_000_000_000)).unwrap(),
            TokenAmount::new(500_000_000_000_000)
        );
    }

    #[test]
    fn small_purchases_round_to_zero() {
        assert_eq!(FeeSchedule::new(100).fee_for(TokenAmount::new(5)).unwrap(), TokenAmount::ZERO);
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(matches!(
            FeeSchedule::new(10_000).fee_for(TokenAmount::new(u128::MAX)),
            Err(FeeError::Overflow)
        ));
    }
}
