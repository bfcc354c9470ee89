//! # SPONGEPASS Core
//!
//! Core types, errors, and traits for SPONGEPASS time-windowed passcodes.
//!
//! This crate provides the foundational building blocks used by the other
//! SPONGEPASS crates:
//!
//! - **Types**: secrets, passcodes, time windows and clocks
//! - **Errors**: the error taxonomy shared by generation and configuration
//! - **Config**: generator tunables loaded from defaults, files and env
//! - **Constants**: alphabet, sizes and defaults
//! - **Traits**: the injectable [`Clock`]
//!
//! ## Example
//!
//! ```rust
//! use spongepass_core::{Clock, FixedClock, GeneratorConfig, Secret};
//!
//! let secret = Secret::from_array([7u8; 32]);
//! let config = GeneratorConfig::default().with_granularity(60);
//! assert_eq!(FixedClock(120).now().unwrap(), 120);
//! assert!(config.validate().is_ok());
//! # drop(secret);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use config::GeneratorConfig;
pub use constants::*;
pub use error::{Result, SpongepassError};
pub use traits::*;
pub use types::*;
