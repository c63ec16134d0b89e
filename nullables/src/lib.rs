//! Nullable infrastructure for deterministic testing.
//!
//! The token's external collaborators (the clock and the treasury) sit behind
//! traits. This crate provides test-friendly implementations that return
//! deterministic values, can be steered programmatically and record what
//! they were asked to do.
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod treasury;

pub use clock::NullClock;
pub use treasury::{NullTreasury, TreasuryCall};
