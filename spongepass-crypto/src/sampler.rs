//! Rejection sampling of alphabet indices.
//!
//! Mapping a squeezed byte with `byte % 24` would favour low indices because
//! `256 % 24 != 0`. Instead each byte is accepted only when `byte < bound`
//! and discarded otherwise, which gives an exactly uniform index.
//!
//! At bound 24 a byte is accepted with probability 24/256 (~9.4%), so about
//! 10.7 bytes are squeezed per symbol. The number of squeezed bytes is capped
//! so a broken or adversarial stream fails with `RejectionExhausted` instead
//! of looping forever.
//!
//! The configured budget is stated for bound 24 and rescaled by `24 / bound`
//! for other bounds, so the expected number of accepted bytes within the
//! budget is the same whatever the bound.

use tracing::warn;
use zeroize::Zeroizing;

use spongepass_core::config::GeneratorConfig;
use spongepass_core::constants::{
    ALPHABET_BOUND, ALPHABET_SIZE, DEFAULT_SQUEEZE_BUDGET_BASE, DEFAULT_SQUEEZE_BUDGET_PER_SYMBOL,
};
use spongepass_core::error::{Result, SpongepassError};

use crate::sponge::SpongeState;

/// Draws uniform indices in `[0, bound)` from a sponge stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectionSampler {
    bound: u8,
    budget_per_symbol: usize,
    budget_base: usize,
}

impl Default for RejectionSampler {
    fn default() -> Self {
        Self {
            bound: ALPHABET_BOUND,
            budget_per_symbol: DEFAULT_SQUEEZE_BUDGET_PER_SYMBOL,
            budget_base: DEFAULT_SQUEEZE_BUDGET_BASE,
        }
    }
}

impl RejectionSampler {
    /// Sampler for `[0, bound)` with the default squeeze budget.
    ///
    /// # Errors
    /// `ConfigError` if `bound` is zero.
    pub fn new(bound: u8) -> Result<Self> {
        if bound == 0 {
            return Err(SpongepassError::ConfigError("sampler bound must be non-zero".into()));
        }
        Ok(Self {
            bound,
            ..Self::default()
        })
    }

    /// Alphabet sampler using the squeeze budget from `config`.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::default().with_budget(config.squeeze_budget_per_symbol, config.squeeze_budget_base)
    }

    /// Overrides the squeeze budget.
    pub fn with_budget(mut self, per_symbol: usize, base: usize) -> Self {
        self.budget_per_symbol = per_symbol;
        self.budget_base = base;
        self
    }

    /// Exclusive upper bound of produced indices.
    pub fn bound(&self) -> u8 {
        self.bound
    }

    /// Maximum bytes squeezed for a request of `n` indices.
    ///
    /// `per_symbol * n + base` at bound 24, scaled by `24 / bound` and
    /// rounded up.
    pub fn budget(&self, n: usize) -> usize {
        n.saturating_mul(self.budget_per_symbol)
            .saturating_add(self.budget_base)
            .saturating_mul(ALPHABET_SIZE)
            .div_ceil(usize::from(self.bound))
    }

    /// Squeezes `n` indices in `[0, bound)` from `state`, one byte at a time.
    ///
    /// # Errors
    /// `RejectionExhausted` once more than [`budget`](Self::budget) bytes
    /// have been squeezed without collecting `n` indices. Partially collected
    /// indices are wiped before returning.
    pub fn sample_n<S: SpongeState>(&self, state: &mut S, n: usize) -> Result<Zeroizing<Vec<u8>>> {
        let budget = self.budget(n);
        let mut indices = Zeroizing::new(Vec::with_capacity(n));
        let mut attempts = 0usize;

        while indices.len() < n {
            if attempts == budget {
                warn!(
                    requested = n,
                    accepted = indices.len(),
                    attempts,
                    "rejection sampling exhausted its squeeze budget"
                );
                return Err(SpongepassError::RejectionExhausted {
                    requested: n,
                    accepted: indices.len(),
                    attempts,
                });
            }

            let byte = state.squeeze_byte();
            attempts += 1;
            if byte < self.bound {
                indices.push(byte);
            }
        }

        Ok(indices)
    }
}

/// Samples `n` indices in `[0, bound)` with the default squeeze budget.
pub fn sample_n<S: SpongeState>(state: &mut S, n: usize, bound: u8) -> Result<Zeroizing<Vec<u8>>> {
    RejectionSampler::new(bound)?.sample_n(state, n)
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISTRIBUTION STATISTICS
// ═══════════════════════════════════════════════════════════════════════════════

/// Chi-squared critical value for 23 degrees of freedom at p = 0.001.
pub const CHI_SQUARED_CRITICAL_23DF: f64 = 49.728;

/// Counts of alphabet indices, for checking sampler uniformity.
#[derive(Debug, Clone)]
pub struct SymbolStats {
    /// Count of each index value
    pub distribution: [u64; ALPHABET_SIZE],
    /// Total number of indices recorded
    pub total: u64,
}

impl Default for SymbolStats {
    fn default() -> Self {
        Self {
            distribution: [0; ALPHABET_SIZE],
            total: 0,
        }
    }
}

impl SymbolStats {
    /// Creates a new stats tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one index. Out-of-range values are ignored.
    pub fn add(&mut self, index: u8) {
        if let Some(count) = self.distribution.get_mut(index as usize) {
            *count += 1;
            self.total += 1;
        }
    }

    /// Records every index in `indices`.
    pub fn extend(&mut self, indices: &[u8]) {
        indices.iter().for_each(|&i| self.add(i));
    }

    /// Returns the most common index.
    pub fn most_common(&self) -> Option<(u8, u64)> {
        self.distribution
            .iter()
            .enumerate()
            .max_by_key(|(_, &count)| count)
            .map(|(index, &count)| (index as u8, count))
    }

    /// Returns the expected count per index for a uniform distribution.
    pub fn expected_uniform_count(&self) -> f64 {
        self.total as f64 / ALPHABET_SIZE as f64
    }

    /// Computes the chi-squared statistic against the uniform distribution.
    pub fn chi_squared(&self) -> f64 {
        let expected = self.expected_uniform_count();
        if expected == 0.0 {
            return 0.0;
        }

        self.distribution
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                (diff * diff) / expected
            })
            .sum()
    }

    /// True when uniformity is not rejected at p = 0.001.
    pub fn looks_uniform(&self) -> bool {
        self.chi_squared() < CHI_SQUARED_CRITICAL_23DF
    }
}
