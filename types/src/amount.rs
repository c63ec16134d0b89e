//! Token and currency amount types.
//!
//! Amounts are unsigned integers (u128) in their smallest unit. Token amounts count
//! whole protocol tokens; currency amounts count the smallest unit of the backing
//! currency held by the treasury.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! amount_type {
    ($(#[$meta:meta])* $name:ident, $unit:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(u128);

        impl $name {
            pub const ZERO: Self = Self(0);

            pub fn new(raw: u128) -> Self {
                Self(raw)
            }

            pub fn raw(&self) -> u128 {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == 0
            }

            pub fn checked_add(self, other: Self) -> Option<Self> {
                self.0.checked_add(other.0).map(Self)
            }

            pub fn checked_sub(self, other: Self) -> Option<Self> {
                self.0.checked_sub(other.0).map(Self)
            }

            pub fn saturating_sub(self, other: Self) -> Self {
                Self(self.0.saturating_sub(other.0))
            }
        }

        impl From<u128> for $name {
            fn from(raw: u128) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} {}", self.0, $unit)
            }
        }
    };
}

amount_type!(
    /// Amount of protocol tokens held in the ledger.
    TokenAmount,
    "tokens"
);

amount_type!(
    /// Amount of backing currency, in its smallest unit.
    CurrencyAmount,
    "wei"
);

impl TokenAmount {
    /// `self * bps / 10_000`, rounded down. `None` on overflow.
    pub fn checked_mul_bps(self, bps: u32) -> Option<Self> {
        self.0
            .checked_mul(u128::from(bps))
            .map(|scaled| Self(scaled / crate::params::BPS_DENOMINATOR))
    }
}
