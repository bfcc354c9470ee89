//! Passcode value type.

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::ALPHABET;

/// A generated one-time passcode.
///
/// Holds only symbols from [`ALPHABET`]. The buffer is wiped on drop and the
/// `Debug` output never shows the symbols.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Passcode {
    symbols: String,
}

impl Passcode {
    /// Wraps already-translated symbols.
    ///
    /// Callers must only pass symbols drawn from [`ALPHABET`]; the translator
    /// is the intended producer.
    pub fn from_symbols(symbols: String) -> Self {
        debug_assert!(symbols.bytes().all(|b| ALPHABET.contains(&b)));
        Self { symbols }
    }

    /// Returns the passcode as a string slice.
    pub fn as_str(&self) -> &str {
        &self.symbols
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true for a zero-length passcode.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over the symbols.
    pub fn chars(&self) -> std::str::Chars<'_> {
        self.symbols.chars()
    }

    /// Renders the passcode in space-separated groups of `size` symbols.
    ///
    /// A `size` of zero returns the passcode unchanged.
    pub fn grouped(&self, size: usize) -> String {
        if size == 0 {
            return self.symbols.clone();
        }
        self.symbols
            .as_bytes()
            .chunks(size)
            .map(|chunk| chunk.iter().map(|&b| b as char).collect::<String>())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PartialEq for Passcode {
    fn eq(&self, other: &Self) -> bool {
        self.symbols.as_bytes().ct_eq(other.symbols.as_bytes()).into()
    }
}

impl Eq for Passcode {}

impl std::fmt::Display for Passcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.symbols)
    }
}

impl std::fmt::Debug for Passcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Passcode([REDACTED; {}])", self.symbols.len())
    }
}
