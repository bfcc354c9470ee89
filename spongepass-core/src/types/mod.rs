//! Domain types for SPONGEPASS.
//!
//! - [`Secret`]: 32-byte generator key, zeroized on drop
//! - [`Passcode`]: generated symbols, zeroized on drop
//! - [`TimeWindow`]: quantized time index absorbed per request
//! - [`SystemClock`], [`FixedClock`], [`ManualClock`]: time sources

mod clock;
mod passcode;
mod secret;
mod window;

pub use clock::*;
pub use passcode::*;
pub use secret::*;
pub use window::*;
