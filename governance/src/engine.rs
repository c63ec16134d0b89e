//! Vote intake and epoch finalization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::epoch::VoteEpoch;
use crate::error::GovernanceError;
use crate::proposal::{PriceProposal, ProposalBook};
use crate::voter::VoterRecord;
use votable_ledger::AccountLedger;
use votable_types::{Address, Price, ReferralChain, Timestamp, TokenAmount};

/// Result of a successful vote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VoteReceipt {
    pub voter: Address,
    pub price: Price,
    pub weight: TokenAmount,
    /// Weight of `price` after this vote.
    pub proposal_weight: TokenAmount,
    pub first_seen_order: u64,
    /// The price this voter's earlier vote in the same epoch was withdrawn from.
    pub moved_from: Option<Price>,
    pub total_votes: TokenAmount,
    pub epoch: u64,
}

/// Result of finalizing an epoch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EpochOutcome {
    pub closed: VoteEpoch,
    /// `None` when nobody voted; the price is then left unchanged.
    pub winner: Option<PriceProposal>,
    pub previous_price: Price,
    pub price: Price,
    pub total_votes: TokenAmount,
    pub next: VoteEpoch,
}

/// Price governance state: the open epoch, its proposals and who voted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceEngine {
    owner: Address,
    epoch: VoteEpoch,
    book: ProposalBook,
    voters: BTreeMap<Address, VoterRecord>,
}

impl GovernanceEngine {
    /// Open the first epoch at `now`.
    pub fn new(owner: Address, epoch_duration_secs: u64, now: Timestamp) -> Self {
        Self {
            owner,
            epoch: VoteEpoch::open(1, now, epoch_duration_secs),
            book: ProposalBook::new(),
            voters: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn current_epoch(&self) -> &VoteEpoch {
        &self.epoch
    }

    pub fn book(&self) -> &ProposalBook {
        &self.book
    }

    pub fn total_votes_counted(&self) -> TokenAmount {
        self.book.total_weight()
    }

    pub fn prices_list(&self) -> (Vec<Price>, Vec<TokenAmount>) {
        self.book.prices_list()
    }

    pub fn voter(&self, holder: &Address) -> Option<&VoterRecord> {
        self.voters.get(holder)
    }

    /// Referrer credited for `holder`'s vote this epoch, or the zero address.
    pub fn credited_referrer(&self, holder: &Address) -> Address {
        self.voters
            .get(holder)
            .map(|record| record.credited_referrer)
            .unwrap_or(Address::ZERO)
    }

    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    /// Cast `voter`'s whole current balance for `candidate`.
    ///
    /// A second vote in the same epoch withdraws the earlier contribution
    /// before adding the new one, so each holder's balance counts once.
    pub fn vote<L: AccountLedger + ?Sized>(
        &mut self,
        ledger: &L,
        voter: &Address,
        candidate: u128,
        referrals: &ReferralChain,
    ) -> Result<VoteReceipt, GovernanceError> {
        let price = Price::new(candidate).ok_or(GovernanceError::InvalidPrice)?;
        let weight = ledger.balance_of(voter);
        let previous = self.voters.get(voter).cloned();

        let released = previous
            .as_ref()
            .map(|record| record.weight)
            .unwrap_or(TokenAmount::ZERO);
        let total_votes = self
            .book
            .total_weight()
            .checked_sub(released)
            .and_then(|rest| rest.checked_add(weight))
            .ok_or(GovernanceError::Overflow)?;

        // Withdraw first so the book's tally never exceeds the net total.
        if let Some(record) = &previous {
            self.book.remove_weight(record.price, record.weight)?;
        }
        let proposal = match self.book.add_weight(price, weight) {
            Ok(proposal) => proposal,
            Err(err) => {
                if let Some(record) = &previous {
                    self.book.add_weight(record.price, record.weight)?;
                }
                return Err(err);
            }
        };

        self.voters.insert(
            *voter,
            VoterRecord {
                credited_referrer: referrals.primary(),
                price,
                weight,
                epoch: self.epoch.number,
            },
        );

        tracing::info!(
            %voter,
            %price,
            %weight,
            epoch = self.epoch.number,
            referrers = referrals.len(),
            revote = previous.is_some(),
            "vote recorded"
        );

        Ok(VoteReceipt {
            voter: *voter,
            price,
            weight,
            proposal_weight: proposal.weight,
            first_seen_order: proposal.first_seen_order,
            moved_from: previous.map(|record| record.price),
            total_votes,
            epoch: self.epoch.number,
        })
    }

    /// Close the current epoch, apply the winning price and open the next epoch.
    ///
    /// Only the owner may finalize, and only once the epoch's duration has elapsed.
    pub fn end_vote(
        &mut self,
        caller: &Address,
        price: &mut Price,
        now: Timestamp,
    ) -> Result<EpochOutcome, GovernanceError> {
        if *caller != self.owner {
            return Err(GovernanceError::NotOwner(*caller));
        }
        self.epoch.ensure_elapsed(now)?;
        let next = self.epoch.successor(now)?;

        let winner = self.book.winner().cloned();
        let previous_price = *price;
        if let Some(proposal) = &winner {
            *price = proposal.price;
        }
        let closed = self.epoch.closed();
        let total_votes = self.book.total_weight();

        self.epoch = next.clone();
        self.book.clear();
        self.voters.clear();

        let new_price = *price;
        tracing::info!(
            epoch = closed.number,
            %previous_price,
            price = %new_price,
            %total_votes,
            "vote epoch finalized"
        );

        Ok(EpochOutcome {
            closed,
            winner,
            previous_price,
            price: *price,
            total_votes,
            next,
        })
    }
}
