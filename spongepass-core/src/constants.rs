//! Protocol constants for SPONGEPASS.
//!
//! Sizes, alphabet and defaults shared by every crate in the workspace.
//! Changing any value here changes the passcodes produced for a given
//! (secret, identity, window), so treat them as part of the wire contract.

// ═══════════════════════════════════════════════════════════════════════════════
// KEY MATERIAL
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of the long-term generator secret in bytes.
pub const SECRET_SIZE: usize = 32;

/// Size of a serialized time window in bytes (little-endian `u32`).
pub const WINDOW_SIZE: usize = 4;

// ═══════════════════════════════════════════════════════════════════════════════
// ALPHABET
// ═══════════════════════════════════════════════════════════════════════════════

/// Ordered passcode alphabet.
///
/// Index `i` produced by the sampler maps to `ALPHABET[i]`. The symbols are
/// lowercase and avoid visually ambiguous pairs so codes can be typed by hand.
pub const ALPHABET: [u8; ALPHABET_SIZE] = *b"ybndrfgejkmcpqxotuwiszah";

/// Number of symbols in [`ALPHABET`].
pub const ALPHABET_SIZE: usize = 24;

/// Exclusive upper bound used by the rejection sampler.
pub const ALPHABET_BOUND: u8 = ALPHABET_SIZE as u8;

// ═══════════════════════════════════════════════════════════════════════════════
// SPONGE PARAMETERS
// ═══════════════════════════════════════════════════════════════════════════════

/// SHAKE256 rate in bytes (1600-bit state, 512-bit capacity).
pub const SPONGE_RATE: usize = 136;

/// Width of the Keccak-f[1600] state in bytes.
pub const SPONGE_WIDTH: usize = 200;

/// Number of 64-bit lanes in the Keccak-f[1600] state.
pub const SPONGE_LANES: usize = SPONGE_WIDTH / 8;

/// Domain separator absorbed ahead of the key when keying a sponge.
pub const DOMAIN_PASSCODE_KEY: &[u8] = b"SPONGEPASS_KEY_V1";

// ═══════════════════════════════════════════════════════════════════════════════
// DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default time window width in seconds.
///
/// Passcodes stay stable for this long. Wider windows tolerate more clock
/// skew between generation and verification sites at the cost of a larger
/// replay window.
pub const DEFAULT_GRANULARITY_SECONDS: u32 = 30;

/// Default passcode length in symbols (~73 bits at 24 symbols).
pub const DEFAULT_PASSCODE_LENGTH: usize = 16;

/// Squeeze attempts allowed per requested symbol at bound 24.
///
/// Samplers with another bound scale the budget by `24 / bound`.
pub const DEFAULT_SQUEEZE_BUDGET_PER_SYMBOL: usize = 64;

/// Fixed squeeze attempts allowed on top of the per-symbol budget, at
/// bound 24.
///
/// With the per-symbol budget this keeps the chance of exhausting the budget
/// below 2^-150 at bound 24 and below 2^-140 at any other bound, for every
/// request length.
pub const DEFAULT_SQUEEZE_BUDGET_BASE: usize = 1024;

/// Default group size when rendering passcodes for humans.
pub const DEFAULT_DISPLAY_GROUP: usize = 4;

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILE-TIME VERIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

const _: () = {
    assert!(ALPHABET.len() == ALPHABET_SIZE);
    assert!(ALPHABET_SIZE <= 256);
    assert!(SPONGE_RATE < SPONGE_WIDTH);
    assert!(SPONGE_LANES * 8 == SPONGE_WIDTH);
    assert!(DEFAULT_GRANULARITY_SECONDS > 0);
};
