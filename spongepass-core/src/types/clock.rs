//! Clock implementations.
//!
//! - [`SystemClock`]: UTC wall clock via `chrono`
//! - [`FixedClock`]: always returns the same instant
//! - [`ManualClock`]: settable and advanceable, for simulating windows

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{Result, SpongepassError};
use crate::traits::{Clock, Timestamp};

/// Wall clock backed by the operating system.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<Timestamp> {
        let seconds = chrono::Utc::now().timestamp();
        Timestamp::try_from(seconds).map_err(|_| {
            SpongepassError::ClockError(format!("system time {seconds} is before the Unix epoch"))
        })
    }
}

/// Clock frozen at a single instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Result<Timestamp> {
        Ok(self.0)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    seconds: AtomicU64,
}

impl ManualClock {
    /// Creates a clock starting at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            seconds: AtomicU64::new(start),
        }
    }

    /// Moves the clock to `at`.
    pub fn set(&self, at: Timestamp) {
        self.seconds.store(at, Ordering::SeqCst);
    }

    /// Moves the clock forward by `seconds`, saturating at `u64::MAX`.
    pub fn advance(&self, seconds: u64) {
        // fetch_update only fails when the closure returns None
        let _ = self
            .seconds
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |t| {
                Some(t.saturating_add(seconds))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Result<Timestamp> {
        Ok(self.seconds.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_after_2020() {
        let now = SystemClock.now().unwrap();
        assert!(now > 1_577_836_800);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(clock.now().unwrap(), 1_700_000_000);
        assert_eq!(clock.now().unwrap(), 1_700_000_000);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(100);
        clock.advance(30);
        assert_eq!(clock.now().unwrap(), 130);

        clock.set(5);
        assert_eq!(clock.now().unwrap(), 5);

        clock.set(u64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now().unwrap(), u64::MAX);
    }

    #[test]
    fn test_clock_by_reference() {
        fn read(clock: impl Clock) -> Timestamp {
            clock.now().unwrap()
        }

        let clock = ManualClock::new(42);
        assert_eq!(read(&clock), 42);
        assert_eq!(read(std::sync::Arc::new(FixedClock(7))), 7);
    }
}
