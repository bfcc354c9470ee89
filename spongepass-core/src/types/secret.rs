//! Generator secret.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::SECRET_SIZE;
use crate::error::{Result, SpongepassError};

/// 32-byte long-term secret that keys a passcode generator.
///
/// This key is sensitive and will be automatically zeroized when dropped.
/// Never expose this key in logs or error messages.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: [u8; SECRET_SIZE],
}

impl Secret {
    /// Creates a secret from raw bytes.
    ///
    /// # Errors
    /// Returns `InvalidKeyLength` if `bytes` is not exactly [`SECRET_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != SECRET_SIZE {
            return Err(SpongepassError::InvalidKeyLength {
                expected: SECRET_SIZE,
                actual: bytes.len(),
            });
        }

        let mut arr = [0u8; SECRET_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Creates a secret from a fixed-size array.
    pub fn from_array(bytes: [u8; SECRET_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses a hex-encoded secret, ignoring surrounding whitespace.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = hex::decode(s.trim())?;
        let secret = Self::from_bytes(&bytes);
        bytes.zeroize();
        secret
    }

    /// Returns the hex-encoded secret.
    ///
    /// # Security
    /// Only for writing key files; do not log the result.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Returns the raw bytes of the secret.
    ///
    /// # Security
    /// Handle the returned bytes carefully - do not log or expose them.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secret([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0 ; "empty")]
    #[test_case(31 ; "one short")]
    #[test_case(33 ; "one long")]
    #[test_case(64 ; "double")]
    fn test_secret_wrong_size(len: usize) {
        let bytes = vec![7u8; len];
        let result = Secret::from_bytes(&bytes);
        assert!(matches!(
            result,
            Err(SpongepassError::InvalidKeyLength { expected: 32, actual }) if actual == len
        ));
    }

    #[test]
    fn test_secret_hex_roundtrip() {
        let secret = Secret::from_array([0xAB; SECRET_SIZE]);
        let parsed = Secret::from_hex(&format!("  {}\n", secret.to_hex())).unwrap();
        assert_eq!(parsed.as_bytes(), secret.as_bytes());
    }

    #[test]
    fn test_secret_bad_hex() {
        assert!(matches!(Secret::from_hex("not hex"), Err(SpongepassError::HexError(_))));
        assert!(matches!(
            Secret::from_hex("abcd"),
            Err(SpongepassError::InvalidKeyLength { actual: 2, .. })
        ));
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = Secret::from_array([0x11; SECRET_SIZE]);
        let debug = format!("{:?}", secret);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("11"));
    }
}
