use serde::{Deserialize, Serialize};

use votable_types::{Address, Price, TokenAmount};

/// The most recent vote a holder cast in the current epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterRecord {
    /// Primary referrer of the vote, or the zero address.
    pub credited_referrer: Address,
    pub price: Price,
    /// Weight contributed to `price`; withdrawn again if the holder re-votes.
    pub weight: TokenAmount,
    pub epoch: u64,
}
