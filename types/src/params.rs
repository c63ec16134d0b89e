//! Protocol parameters fixed at construction.

use serde::{Deserialize, Serialize};

use crate::amount::TokenAmount;
use crate::error::TypesError;
use crate::price::Price;
use crate::time::SECONDS_PER_WEEK;

/// Basis-point denominator (10_000 = 100%).
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Parameters of a token instance.
///
/// Only `tokenPrice` changes after construction, and only through governance;
/// everything here is constant for the lifetime of the instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolParams {
    /// Price at construction (currency units per token).
    pub initial_price: Price,

    /// Tokens minted to the owner at construction.
    pub owner_initial_supply: TokenAmount,

    /// Protocol fee on each buy, in basis points of the tokens bought.
    /// The fee is minted to the owner on top of the buyer's tokens.
    pub fee_bps: u32,

    /// Length of a voting epoch in seconds.
    pub epoch_duration_secs: u64,

    /// Minimum spacing between fee burns in seconds.
    pub burn_window_secs: u64,
}

impl ProtocolParams {
    pub fn validate(&self) -> Result<(), TypesError> {
        if u128::from(self.fee_bps) > BPS_DENOMINATOR {
            return Err(TypesError::InvalidParams(format!(
                "fee_bps {} exceeds {}",
                self.fee_bps, BPS_DENOMINATOR
            )));
        }
        if self.epoch_duration_secs == 0 {
            return Err(TypesError::InvalidParams("epoch_duration_secs must be non-zero".into()));
        }
        if self.burn_window_secs == 0 {
            return Err(TypesError::InvalidParams("burn_window_secs must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            initial_price: Price::new(2).unwrap_or(Price::ONE),
            owner_initial_supply: TokenAmount::new(50_000),
            fee_bps: 100,
            epoch_duration_secs: SECONDS_PER_WEEK,
            burn_window_secs: SECONDS_PER_WEEK,
        }
    }
}
