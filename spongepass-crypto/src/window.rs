//! Time window computation.
//!
//! ```text
//! window = floor(now / granularity) mod 2^32
//! bytes  = window as u32, little-endian
//! ```
//!
//! The division happens before truncation, so the passcode changes exactly
//! once per `granularity` seconds.

use spongepass_core::error::{Result, SpongepassError};
use spongepass_core::traits::{Clock, Timestamp};
use spongepass_core::types::TimeWindow;

fn check_granularity(granularity_seconds: u32) -> Result<()> {
    if granularity_seconds == 0 {
        return Err(SpongepassError::ConfigError(
            "window granularity must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Maps a timestamp to its window.
///
/// # Errors
/// `ConfigError` if `granularity_seconds` is zero.
pub fn window(now: Timestamp, granularity_seconds: u32) -> Result<TimeWindow> {
    check_granularity(granularity_seconds)?;
    let quotient = now / u64::from(granularity_seconds);
    Ok(TimeWindow::new(quotient as u32))
}

/// Reads `clock` and maps the reading to its window.
pub fn current_window<C: Clock + ?Sized>(clock: &C, granularity_seconds: u32) -> Result<TimeWindow> {
    window(clock.now()?, granularity_seconds)
}

/// Seconds until the window containing `now` ends (1..=granularity).
pub fn seconds_remaining(now: Timestamp, granularity_seconds: u32) -> Result<u32> {
    check_granularity(granularity_seconds)?;
    let g = u64::from(granularity_seconds);
    Ok((g - now % g) as u32)
}

/// First timestamp of `window` within the first 2^32 windows after the epoch.
pub fn window_start(window: TimeWindow, granularity_seconds: u32) -> Timestamp {
    u64::from(window.index()) * u64::from(granularity_seconds)
}
