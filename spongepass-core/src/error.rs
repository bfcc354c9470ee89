//! Error types for SPONGEPASS.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Passcode generation never swallows an error: every failure reaches the
//! caller as one of these variants.

use thiserror::Error;

/// Result type alias using `SpongepassError`.
pub type Result<T> = std::result::Result<T, SpongepassError>;

/// Main error type for all SPONGEPASS operations.
#[derive(Debug, Error)]
pub enum SpongepassError {
    // ═══════════════════════════════════════════════════════════════════════════
    // GENERATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Secret has the wrong length.
    #[error("Invalid key: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    /// Time source could not produce a valid reading.
    #[error("Clock error: {0}")]
    ClockError(String),

    /// The sponge primitive rejected an operation.
    #[error("Sponge primitive failure: {0}")]
    PrimitiveError(String),

    /// Rejection sampler ran out of squeeze attempts.
    #[error("Rejection sampling exhausted: {accepted}/{requested} symbols after {attempts} squeezed bytes")]
    RejectionExhausted {
        requested: usize,
        accepted: usize,
        attempts: usize,
    },

    /// Index outside the alphabet reached the translator.
    #[error("Alphabet index {index} out of range (alphabet has {len} symbols)")]
    AlphabetError { index: u8, len: usize },

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION & IO
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SpongepassError {
    /// Returns true if the whole request may be retried.
    ///
    /// Clock failures are transient and an exhausted sampler is expected to
    /// succeed on a fresh attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SpongepassError::ClockError(_) | SpongepassError::RejectionExhausted { .. }
        )
    }

    /// Returns true if the error indicates a bug or bad input that retrying
    /// cannot fix.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SpongepassError::InvalidKeyLength { .. }
                | SpongepassError::PrimitiveError(_)
                | SpongepassError::AlphabetError { .. }
        )
    }

    /// Returns true if this is a configuration or input-parsing error.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SpongepassError::ConfigError(_)
                | SpongepassError::HexError(_)
                | SpongepassError::JsonError(_)
        )
    }
}
