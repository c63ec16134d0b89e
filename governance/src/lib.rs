//! Price governance for the votable token.
//!
//! Holders vote for a candidate price with their whole balance as weight. Votes
//! accumulate in a [`ProposalBook`] for the active [`VoteEpoch`]; once the epoch's
//! duration has elapsed the owner finalizes it, the heaviest proposal becomes the
//! new token price (ties go to the earliest-proposed price), and a fresh epoch opens.
//!
//! Key principle: one token = one unit of weight, measured at the time of voting.

pub mod engine;
pub mod epoch;
pub mod error;
pub mod proposal;
pub mod voter;

pub use engine::{EpochOutcome, GovernanceEngine, VoteReceipt};
pub use epoch::{EpochState, VoteEpoch};
pub use error::GovernanceError;
pub use proposal::{PriceProposal, ProposalBook};
pub use voter::VoterRecord;
