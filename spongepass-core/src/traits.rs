//! Common traits for SPONGEPASS.
//!
//! These traits define the seams where callers inject their own
//! implementations, mainly so tests can simulate time deterministically.

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// CLOCK TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Seconds since the Unix epoch.
pub type Timestamp = u64;

/// A source of wall-clock time with one-second resolution.
///
/// Reads must be fast and non-blocking. A failed read is reported to the
/// caller immediately and is never retried by the generator.
pub trait Clock: Send + Sync {
    /// Returns the current time in seconds since the Unix epoch.
    fn now(&self) -> Result<Timestamp>;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Result<Timestamp> {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Result<Timestamp> {
        (**self).now()
    }
}
