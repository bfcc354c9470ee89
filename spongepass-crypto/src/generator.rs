//! Passcode generator.
//!
//! ## Derivation Flow
//!
//! ```text
//! persistent = keyed(secret) ; absorb(len64(identity) || identity)
//!       ↓  (once, at construction)
//! ephemeral  = clone(persistent)
//! absorb(ephemeral, le32(window))
//! indices    = rejection_sample(ephemeral, outlen, 24)
//! erase(ephemeral)
//! passcode   = translate(indices)
//! ```
//!
//! The persistent state is never squeezed or absorbed into after
//! construction, so the same window always yields the same passcode and
//! `generate` can be called concurrently through a shared reference.

use std::ops::{Deref, DerefMut};

use tracing::debug;

use spongepass_core::config::GeneratorConfig;
use spongepass_core::constants::SECRET_SIZE;
use spongepass_core::error::{Result, SpongepassError};
use spongepass_core::traits::{Clock, Timestamp};
use spongepass_core::types::{Passcode, Secret, SystemClock, TimeWindow};

use crate::alphabet::translate;
use crate::sampler::RejectionSampler;
use crate::sponge::{KeccakSponge, SpongeState};
use crate::window::window;

/// Per-request fork of the persistent state, erased when dropped.
struct Ephemeral<S: SpongeState>(S);

impl<S: SpongeState> Ephemeral<S> {
    fn fork(persistent: &S) -> Self {
        Self(persistent.clone())
    }
}

impl<S: SpongeState> Deref for Ephemeral<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

impl<S: SpongeState> DerefMut for Ephemeral<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.0
    }
}

impl<S: SpongeState> Drop for Ephemeral<S> {
    fn drop(&mut self) {
        self.0.erase();
    }
}

/// Generates passcodes for one (secret, identity) pair.
pub struct Generator<S: SpongeState = KeccakSponge> {
    state: S,
    config: GeneratorConfig,
    sampler: RejectionSampler,
    identity_len: usize,
}

impl Generator<KeccakSponge> {
    /// Creates a generator with the default configuration.
    ///
    /// # Errors
    /// `InvalidKeyLength` unless `secret` is exactly 32 bytes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use spongepass_crypto::Generator;
    ///
    /// let generator = Generator::new(b"alice@example.com", &[7u8; 32])?;
    /// let first = generator.generate_at(1_700_000_000, 8)?;
    /// let again = generator.generate_at(1_700_000_001, 8)?;
    /// assert_eq!(first, again);
    /// # Ok::<(), spongepass_core::SpongepassError>(())
    /// ```
    pub fn new(identity: &[u8], secret: &[u8]) -> Result<Self> {
        Self::create(identity, secret, GeneratorConfig::default())
    }

    /// Creates a generator with an explicit configuration.
    pub fn with_config(identity: &[u8], secret: &[u8], config: GeneratorConfig) -> Result<Self> {
        Self::create(identity, secret, config)
    }

    /// Creates a generator from a [`Secret`].
    pub fn from_secret(identity: &[u8], secret: &Secret, config: GeneratorConfig) -> Result<Self> {
        Self::create(identity, secret.as_bytes(), config)
    }
}

impl<S: SpongeState> Generator<S> {
    /// Keys a sponge of type `S` with `secret`, then binds `identity`.
    pub fn create(identity: &[u8], secret: &[u8], config: GeneratorConfig) -> Result<Self> {
        if secret.len() != SECRET_SIZE {
            return Err(SpongepassError::InvalidKeyLength {
                expected: SECRET_SIZE,
                actual: secret.len(),
            });
        }
        config.validate()?;

        let mut state = S::keyed(secret)?;
        // Length prefix keeps identities from running into each other
        let bound = state
            .absorb(&(identity.len() as u64).to_le_bytes())
            .and_then(|()| state.absorb(identity));
        if let Err(e) = bound {
            state.erase();
            return Err(e);
        }

        debug!(
            identity_len = identity.len(),
            granularity = config.granularity_seconds,
            "passcode generator initialised"
        );

        Ok(Self {
            state,
            sampler: RejectionSampler::from_config(&config),
            config,
            identity_len: identity.len(),
        })
    }

    /// The configuration this generator was built with.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a passcode for the current system time.
    pub fn generate(&self, outlen: usize) -> Result<Passcode> {
        self.generate_with_clock(&SystemClock, outlen)
    }

    /// Generates a passcode of the configured default length for the
    /// current system time.
    pub fn generate_default(&self) -> Result<Passcode> {
        self.generate(self.config.passcode_length)
    }

    /// Generates a passcode for the time reported by `clock`.
    ///
    /// Clock failures are returned as-is and never retried.
    pub fn generate_with_clock<C: Clock + ?Sized>(&self, clock: &C, outlen: usize) -> Result<Passcode> {
        self.generate_at(clock.now()?, outlen)
    }

    /// Generates a passcode for the window containing `now`.
    pub fn generate_at(&self, now: Timestamp, outlen: usize) -> Result<Passcode> {
        self.generate_for_window(self.window_at(now)?, outlen)
    }

    /// Generates a passcode for an explicit window.
    pub fn generate_for_window(&self, window: TimeWindow, outlen: usize) -> Result<Passcode> {
        let indices = {
            let mut ephemeral = Ephemeral::fork(&self.state);
            ephemeral.absorb(&window.to_le_bytes())?;
            self.sampler.sample_n(&mut *ephemeral, outlen)?
        };

        debug!(window = %window, outlen, "passcode generated");
        translate(&indices)
    }

    /// The window containing `now` under this generator's granularity.
    pub fn window_at(&self, now: Timestamp) -> Result<TimeWindow> {
        window(now, self.config.granularity_seconds)
    }
}

impl<S: SpongeState> Drop for Generator<S> {
    fn drop(&mut self) {
        self.state.erase();
    }
}

impl<S: SpongeState> std::fmt::Debug for Generator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("state", &"[REDACTED]")
            .field("identity_len", &self.identity_len)
            .field("config", &self.config)
            .finish()
    }
}
