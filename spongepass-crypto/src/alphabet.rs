//! Index-to-symbol translation.

use zeroize::Zeroize;

use spongepass_core::constants::{ALPHABET, ALPHABET_SIZE};
use spongepass_core::error::{Result, SpongepassError};
use spongepass_core::types::Passcode;

/// Returns the symbol for `index`.
///
/// # Errors
/// `AlphabetError` if `index >= ALPHABET_SIZE`.
pub fn symbol(index: u8) -> Result<char> {
    ALPHABET
        .get(index as usize)
        .map(|&b| b as char)
        .ok_or(SpongepassError::AlphabetError {
            index,
            len: ALPHABET_SIZE,
        })
}

/// Returns true if `c` is an alphabet symbol.
pub fn contains(c: char) -> bool {
    c.is_ascii() && ALPHABET.contains(&(c as u8))
}

/// Translates sampler output into a passcode.
///
/// Any index outside the alphabet means the sampler is broken; the whole
/// translation fails rather than clamping or wrapping the value.
pub fn translate(indices: &[u8]) -> Result<Passcode> {
    let mut symbols = String::with_capacity(indices.len());
    for &index in indices {
        match symbol(index) {
            Ok(c) => symbols.push(c),
            Err(e) => {
                symbols.zeroize();
                return Err(e);
            }
        }
    }
    Ok(Passcode::from_symbols(symbols))
}
