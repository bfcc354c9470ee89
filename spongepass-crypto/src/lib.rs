//! # SPONGEPASS Cryptography
//!
//! Time-windowed one-time passcodes derived from a keyed Keccak sponge.
//!
//! This crate provides:
//!
//! - **Sponge**: the [`SpongeState`] contract and its SHAKE256 implementation
//! - **Window**: timestamp to 32-bit window quantization
//! - **Sampler**: rejection sampling of unbiased alphabet indices
//! - **Alphabet**: index-to-symbol translation
//! - **Generator**: the end-to-end passcode derivation
//!
//! ## Security Properties
//!
//! - The secret is absorbed before any other input
//! - Each request works on an erased-after-use fork of the keyed state
//! - Sampling is exactly uniform over the alphabet and bounded in time
//!
//! ## Example
//!
//! ```rust
//! use spongepass_core::ManualClock;
//! use spongepass_crypto::Generator;
//!
//! let generator = Generator::new(b"alice@example.com", &[42u8; 32])?;
//! let clock = ManualClock::new(1_700_000_010);
//!
//! let code = generator.generate_with_clock(&clock, 16)?;
//! println!("{}", code.grouped(4));
//!
//! clock.advance(30);
//! assert_ne!(generator.generate_with_clock(&clock, 16)?, code);
//! # Ok::<(), spongepass_core::SpongepassError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod alphabet;
pub mod generator;
pub mod sampler;
pub mod sponge;
pub mod window;

// Re-export main items at crate root
pub use alphabet::translate;
pub use generator::Generator;
pub use sampler::{sample_n, RejectionSampler, SymbolStats};
pub use sponge::{KeccakSponge, SpongeState};
pub use window::{current_window, seconds_remaining, window, window_start};
