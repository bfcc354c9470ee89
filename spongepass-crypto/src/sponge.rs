//! Keyed sponge state.
//!
//! [`SpongeState`] is the contract the generator relies on: keyed
//! initialization, absorb, squeeze, deep clone and erase. [`KeccakSponge`]
//! implements it as SHAKE256 over the Keccak-f\[1600\] permutation from the
//! `keccak` crate.
//!
//! ## Keying
//!
//! ```text
//! state = SHAKE256-absorb( len32(DOMAIN) || DOMAIN || len32(key) || key )
//! ```
//!
//! Keying happens in the constructor, so no input can be absorbed before
//! the key. Once a state has been squeezed it cannot absorb again; forks
//! must be taken from an absorbing state.

use zeroize::{Zeroize, ZeroizeOnDrop};

use spongepass_core::constants::{DOMAIN_PASSCODE_KEY, SPONGE_LANES, SPONGE_RATE};
use spongepass_core::error::{Result, SpongepassError};

/// SHAKE domain-separation suffix (`1111` plus the first padding bit).
const SHAKE_PAD: u8 = 0x1F;

/// Final padding bit, set in the last byte of the rate.
const PAD_END: u8 = 0x80;

/// A keyed cryptographic sponge.
///
/// **HAZARD**: implementations must make `clone` a full, independent copy
/// and `zeroize` overwrite every byte of state.
pub trait SpongeState: Clone + Zeroize + Send + Sync + Sized {
    /// Creates a state keyed by `key`. The key is absorbed before anything
    /// else can be.
    fn keyed(key: &[u8]) -> Result<Self>;

    /// Absorbs `input`. Fails once the state has started squeezing.
    fn absorb(&mut self, input: &[u8]) -> Result<()>;

    /// Fills `output` with the next bytes of the squeeze stream.
    fn squeeze(&mut self, output: &mut [u8]);

    /// Squeezes a single byte.
    fn squeeze_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.squeeze(&mut byte);
        byte[0]
    }

    /// Overwrites all state.
    fn erase(&mut self) {
        self.zeroize();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Absorbing,
    Squeezing,
}

/// SHAKE256 sponge over Keccak-f\[1600\].
#[derive(Clone)]
pub struct KeccakSponge {
    lanes: [u64; SPONGE_LANES],
    pos: usize,
    phase: Phase,
}

impl KeccakSponge {
    /// An empty, unkeyed SHAKE256 state.
    ///
    /// Only useful for hashing public data; passcode generation always goes
    /// through [`SpongeState::keyed`].
    pub fn unkeyed() -> Self {
        Self {
            lanes: [0u64; SPONGE_LANES],
            pos: 0,
            phase: Phase::Absorbing,
        }
    }

    /// Returns true once the state has switched to squeezing.
    pub fn is_squeezing(&self) -> bool {
        self.phase == Phase::Squeezing
    }

    fn xor_byte(&mut self, index: usize, byte: u8) {
        self.lanes[index / 8] ^= u64::from(byte) << (8 * (index % 8));
    }

    fn byte_at(&self, index: usize) -> u8 {
        (self.lanes[index / 8] >> (8 * (index % 8))) as u8
    }

    fn permute(&mut self) {
        keccak::f1600(&mut self.lanes);
    }

    fn pad_and_switch(&mut self) {
        self.xor_byte(self.pos, SHAKE_PAD);
        self.xor_byte(SPONGE_RATE - 1, PAD_END);
        self.permute();
        self.pos = 0;
        self.phase = Phase::Squeezing;
    }

    /// Raw state snapshot for erasure checks.
    #[cfg(test)]
    pub(crate) fn state_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self.lanes.iter().flat_map(|l| l.to_le_bytes()).collect();
        bytes.extend_from_slice(&self.pos.to_le_bytes());
        bytes
    }
}

impl SpongeState for KeccakSponge {
    fn keyed(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(SpongepassError::PrimitiveError("cannot key a sponge with an empty key".into()));
        }
        let key_len = u32::try_from(key.len())
            .map_err(|_| SpongepassError::PrimitiveError("key too long".into()))?;

        let mut sponge = Self::unkeyed();
        sponge.absorb(&(DOMAIN_PASSCODE_KEY.len() as u32).to_le_bytes())?;
        sponge.absorb(DOMAIN_PASSCODE_KEY)?;
        sponge.absorb(&key_len.to_le_bytes())?;
        sponge.absorb(key)?;
        Ok(sponge)
    }

    fn absorb(&mut self, input: &[u8]) -> Result<()> {
        if self.phase == Phase::Squeezing {
            return Err(SpongepassError::PrimitiveError(
                "absorb called after squeezing started".into(),
            ));
        }

        for &byte in input {
            self.xor_byte(self.pos, byte);
            self.pos += 1;
            if self.pos == SPONGE_RATE {
                self.permute();
                self.pos = 0;
            }
        }
        Ok(())
    }

    fn squeeze(&mut self, output: &mut [u8]) {
        if self.phase == Phase::Absorbing {
            self.pad_and_switch();
        }

        for out in output.iter_mut() {
            if self.pos == SPONGE_RATE {
                self.permute();
                self.pos = 0;
            }
            *out = self.byte_at(self.pos);
            self.pos += 1;
        }
    }
}

impl Zeroize for KeccakSponge {
    fn zeroize(&mut self) {
        self.lanes.zeroize();
        self.pos.zeroize();
        self.phase = Phase::Absorbing;
    }
}

impl Drop for KeccakSponge {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for KeccakSponge {}

impl std::fmt::Debug for KeccakSponge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeccakSponge([REDACTED], phase: {:?})", self.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spongepass_core::constants::SPONGE_WIDTH;
    use sha3::digest::{ExtendableOutput, Update, XofReader};
    use sha3::Shake256;

    fn reference_shake256(input: &[u8], len: usize) -> Vec<u8> {
        let mut hasher = Shake256::default();
        hasher.update(input);
        let mut reader = hasher.finalize_xof();
        let mut out = vec![0u8; len];
        reader.read(&mut out);
        out
    }

    fn sponge_output(sponge: &mut KeccakSponge, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        sponge.squeeze(&mut out);
        out
    }

    #[test]
    fn test_empty_input_matches_shake256() {
        let mut sponge = KeccakSponge::unkeyed();
        let expected =
            hex::decode("46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f").unwrap();
        assert_eq!(sponge_output(&mut sponge, 32), expected);
    }

    #[test]
    fn test_matches_shake256_across_rate_boundaries() {
        for input_len in [0usize, 1, 135, 136, 137, 272, 500] {
            let input: Vec<u8> = (0..input_len).map(|i| (i * 7 + 3) as u8).collect();
            let mut sponge = KeccakSponge::unkeyed();
            sponge.absorb(&input).unwrap();
            assert_eq!(
                sponge_output(&mut sponge, 400),
                reference_shake256(&input, 400),
                "input length {}",
                input_len
            );
        }
    }

    #[test]
    fn test_keyed_matches_shake256_of_framed_key() {
        let key = [9u8; 32];
        let mut framed = Vec::new();
        framed.extend_from_slice(&(DOMAIN_PASSCODE_KEY.len() as u32).to_le_bytes());
        framed.extend_from_slice(DOMAIN_PASSCODE_KEY);
        framed.extend_from_slice(&32u32.to_le_bytes());
        framed.extend_from_slice(&key);

        let mut sponge = KeccakSponge::keyed(&key).unwrap();
        assert_eq!(sponge_output(&mut sponge, 64), reference_shake256(&framed, 64));
    }

    #[test]
    fn test_absorb_is_associative() {
        let mut whole = KeccakSponge::keyed(b"key").unwrap();
        whole.absorb(b"hello world").unwrap();

        let mut split = KeccakSponge::keyed(b"key").unwrap();
        split.absorb(b"hello").unwrap();
        split.absorb(b" world").unwrap();

        assert_eq!(sponge_output(&mut whole, 32), sponge_output(&mut split, 32));
    }

    #[test]
    fn test_squeeze_is_a_stream() {
        let mut one_shot = KeccakSponge::keyed(b"key").unwrap();
        let expected = sponge_output(&mut one_shot, 300);

        let mut bytewise = KeccakSponge::keyed(b"key").unwrap();
        let streamed: Vec<u8> = (0..300).map(|_| bytewise.squeeze_byte()).collect();

        assert_eq!(streamed, expected);
    }

    #[test]
    fn test_different_keys_diverge() {
        let mut a = KeccakSponge::keyed(&[1u8; 32]).unwrap();
        let mut b = KeccakSponge::keyed(&[2u8; 32]).unwrap();
        assert_ne!(sponge_output(&mut a, 32), sponge_output(&mut b, 32));
    }

    #[test]
    fn test_absorb_after_squeeze_rejected() {
        let mut sponge = KeccakSponge::keyed(b"key").unwrap();
        sponge.squeeze_byte();
        assert!(sponge.is_squeezing());
        assert!(matches!(
            sponge.absorb(b"late"),
            Err(SpongepassError::PrimitiveError(_))
        ));
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            KeccakSponge::keyed(&[]),
            Err(SpongepassError::PrimitiveError(_))
        ));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = KeccakSponge::keyed(b"key").unwrap();
        let snapshot = original.state_bytes();

        let mut fork = original.clone();
        fork.absorb(b"window").unwrap();
        fork.squeeze_byte();
        fork.erase();

        assert_eq!(original.state_bytes(), snapshot);
    }

    #[test]
    fn test_erase_clears_everything() {
        let mut sponge = KeccakSponge::keyed(b"key").unwrap();
        sponge.absorb(b"data").unwrap();
        sponge.squeeze_byte();
        assert!(sponge.state_bytes().iter().any(|&b| b != 0));

        sponge.erase();
        assert!(sponge.state_bytes().iter().all(|&b| b == 0));
        assert!(!sponge.is_squeezing());
    }

    #[test]
    fn test_state_covers_full_width() {
        let sponge = KeccakSponge::keyed(b"key").unwrap();
        let lane_bytes = sponge.state_bytes().len() - std::mem::size_of::<usize>();
        assert_eq!(lane_bytes, SPONGE_WIDTH);
    }

    #[test]
    fn test_debug_redacted() {
        let sponge = KeccakSponge::keyed(&[0xAA; 32]).unwrap();
        let debug = format!("{:?}", sponge);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("aa"));
    }
}
