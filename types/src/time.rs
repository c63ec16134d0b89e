//! Timestamps and the injectable clock.
//!
//! Timestamps are Unix epoch seconds (UTC). Every state-changing operation reads
//! the clock exactly once and threads that single `now` through all of its steps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in the fixed seven-day governance and fee windows.
pub const SECONDS_PER_WEEK: u64 = 7 * 24 * 60 * 60;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// A system clock set before 1970 reads as [`Timestamp::EPOCH`].
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// This timestamp shifted forward by `secs`, saturating at `u64::MAX`.
    pub fn saturating_add_secs(&self, secs: u64) -> Timestamp {
        Self(self.0.saturating_add(secs))
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Source of the authoritative "now".
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_inclusive_of_the_boundary() {
        let start = Timestamp::new(100);
        assert!(!start.has_expired(SECONDS_PER_WEEK, Timestamp::new(100 + SECONDS_PER_WEEK - 1)));
        assert!(start.has_expired(SECONDS_PER_WEEK, Timestamp::new(100 + SECONDS_PER_WEEK)));
    }

    #[test]
    fn elapsed_saturates_when_now_precedes_start() {
        assert_eq!(Timestamp::new(50).elapsed_since(Timestamp::new(10)), 0);
        assert_eq!(Timestamp::new(10).elapsed_since(Timestamp::new(50)), 40);
    }

    #[test]
    fn expiry_never_overflows() {
        assert!(!Timestamp::new(u64::MAX - 1).has_expired(10, Timestamp::new(u64::MAX - 1)));
        assert_eq!(Timestamp::new(u64::MAX).saturating_add_secs(5), Timestamp::new(u64::MAX));
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now() > Timestamp::EPOCH);
    }
}
