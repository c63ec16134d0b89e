//! Referral chains attached to buy, sell and vote calls.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::TypesError;

/// Up to [`ReferralChain::MAX_LEN`] referrer addresses, primary first.
///
/// The chain is recorded but carries no fee split: the only observable effect
/// is the primary referrer credited on a voter's record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralChain(Vec<Address>);

impl ReferralChain {
    pub const MAX_LEN: usize = 3;

    pub fn new(referrers: Vec<Address>) -> Result<Self, TypesError> {
        if referrers.len() > Self::MAX_LEN {
            return Err(TypesError::TooManyReferrers {
                given: referrers.len(),
                max: Self::MAX_LEN,
            });
        }
        Ok(Self(referrers))
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// The primary referrer, or the zero address when none was supplied.
    pub fn primary(&self) -> Address {
        self.0.first().copied().unwrap_or(Address::ZERO)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Address> {
        self.0.iter()
    }
}
