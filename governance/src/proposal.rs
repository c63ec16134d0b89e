//! Candidate prices and their accumulated weight.

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};

use crate::error::GovernanceError;
use votable_types::{Price, TokenAmount};

/// A candidate price in the active epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceProposal {
    /// The proposed price; unique within the book.
    pub price: Price,
    /// Sum of the balances voted for this price.
    pub weight: TokenAmount,
    /// Sequence number assigned when the price first appeared. Lower wins ties.
    pub first_seen_order: u64,
}

/// Canonical position: heaviest first, then earliest proposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct RankKey {
    weight: Reverse<TokenAmount>,
    first_seen_order: u64,
    price: Price,
}

impl RankKey {
    fn of(proposal: &PriceProposal) -> Self {
        Self {
            weight: Reverse(proposal.weight),
            first_seen_order: proposal.first_seen_order,
            price: proposal.price,
        }
    }
}

/// Persisted form of a [`ProposalBook`]; the ranking index is rebuilt on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BookState {
    proposals: Vec<PriceProposal>,
    next_order: u64,
}

/// All proposals of the active epoch, keyed by price and kept in canonical order.
///
/// Lookup is by price; the ordered `ranking` index is updated on every weight
/// change so the winner and the full listing never require a sort.
/// `next_order` is never reset, so sequence numbers stay unique across epochs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookState", into = "BookState")]
pub struct ProposalBook {
    proposals: HashMap<Price, PriceProposal>,
    ranking: BTreeSet<RankKey>,
    total_weight: TokenAmount,
    next_order: u64,
}

impl ProposalBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to the proposal for `price`, creating it if this is the
    /// price's first appearance. Returns the updated proposal.
    pub fn add_weight(
        &mut self,
        price: Price,
        weight: TokenAmount,
    ) -> Result<PriceProposal, GovernanceError> {
        let total_weight = self
            .total_weight
            .checked_add(weight)
            .ok_or(GovernanceError::Overflow)?;
        let (current, next_order) = match self.proposals.get(&price) {
            Some(existing) => (existing.clone(), self.next_order),
            None => (
                PriceProposal {
                    price,
                    weight: TokenAmount::ZERO,
                    first_seen_order: self.next_order,
                },
                self.next_order
                    .checked_add(1)
                    .ok_or(GovernanceError::Overflow)?,
            ),
        };
        let updated = PriceProposal {
            weight: current
                .weight
                .checked_add(weight)
                .ok_or(GovernanceError::Overflow)?,
            ..current.clone()
        };

        self.ranking.remove(&RankKey::of(&current));
        self.ranking.insert(RankKey::of(&updated));
        self.proposals.insert(price, updated.clone());
        self.total_weight = total_weight;
        self.next_order = next_order;
        Ok(updated)
    }

    /// Withdraw `weight` previously added to `price`. The proposal stays in the
    /// book (keeping its sequence number) even if its weight drops to zero.
    pub fn remove_weight(
        &mut self,
        price: Price,
        weight: TokenAmount,
    ) -> Result<PriceProposal, GovernanceError> {
        let current = self
            .proposals
            .get(&price)
            .cloned()
            .ok_or_else(|| GovernanceError::Inconsistent(format!("no proposal for {price}")))?;
        let updated = PriceProposal {
            weight: current
                .weight
                .checked_sub(weight)
                .ok_or(GovernanceError::Overflow)?,
            ..current.clone()
        };
        let total_weight = self
            .total_weight
            .checked_sub(weight)
            .ok_or(GovernanceError::Overflow)?;

        self.ranking.remove(&RankKey::of(&current));
        self.ranking.insert(RankKey::of(&updated));
        self.proposals.insert(price, updated.clone());
        self.total_weight = total_weight;
        Ok(updated)
    }

    pub fn get(&self, price: &Price) -> Option<&PriceProposal> {
        self.proposals.get(price)
    }

    /// The proposal with maximal weight; ties go to the smallest `first_seen_order`.
    pub fn winner(&self) -> Option<&PriceProposal> {
        self.ranking
            .first()
            .and_then(|key| self.proposals.get(&key.price))
    }

    /// Proposals in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &PriceProposal> {
        self.ranking
            .iter()
            .filter_map(|key| self.proposals.get(&key.price))
    }

    /// The book as parallel `(prices, weights)` sequences in canonical order.
    pub fn prices_list(&self) -> (Vec<Price>, Vec<TokenAmount>) {
        self.iter().map(|p| (p.price, p.weight)).unzip()
    }

    /// Sum of all proposal weights.
    pub fn total_weight(&self) -> TokenAmount {
        self.total_weight
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }

    /// Sequence number the next new price will receive.
    pub fn next_order(&self) -> u64 {
        self.next_order
    }

    /// Drop every proposal. The sequence counter keeps counting.
    pub fn clear(&mut self) {
        self.proposals.clear();
        self.ranking.clear();
        self.total_weight = TokenAmount::ZERO;
    }
}

impl From<ProposalBook> for BookState {
    fn from(book: ProposalBook) -> Self {
        let proposals = book.iter().cloned().collect();
        Self {
            proposals,
            next_order: book.next_order,
        }
    }
}

impl TryFrom<BookState> for ProposalBook {
    type Error = GovernanceError;

    fn try_from(state: BookState) -> Result<Self, Self::Error> {
        let mut book = ProposalBook {
            next_order: state.next_order,
            ..ProposalBook::default()
        };
        let mut orders = BTreeSet::new();
        for proposal in state.proposals {
            if proposal.first_seen_order >= state.next_order
                || !orders.insert(proposal.first_seen_order)
            {
                return Err(GovernanceError::Inconsistent(format!(
                    "bad sequence number {} for {}",
                    proposal.first_seen_order, proposal.price
                )));
            }
            if book.proposals.contains_key(&proposal.price) {
                return Err(GovernanceError::Inconsistent(format!(
                    "duplicate proposal for {}",
                    proposal.price
                )));
            }
            book.total_weight = book
                .total_weight
                .checked_add(proposal.weight)
                .ok_or(GovernanceError::Overflow)?;
            book.ranking.insert(RankKey::of(&proposal));
            book.proposals.insert(proposal.price, proposal);
        }
        Ok(book)
    }
}
