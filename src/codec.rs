//! Key codec
//!
//! Reversible mapping between arbitrary byte-string keys and names that are
//! safe to use as a single path segment.
//!
//! ## Name Format
//! ```text
//! ┌──────────┬───────────────────┬───────────────────┬─────┐
//! │ 'F' (1)  │ byte 0: lo, hi (2)│ byte 1: lo, hi (2)│ ... │
//! └──────────┴───────────────────┴───────────────────┴─────┘
//! ```
//!
//! Each nibble is written as `'0' + nibble`, so digits span `'0'..='?'`.
//! The marker keeps names non-empty and never dot-leading, which also makes
//! the empty key representable.

use crate::error::{FileMapError, Result};

/// Leading marker of every encoded name
pub const MARKER: char = 'F';

/// Digit for nibble value 0; nibble `n` is written as `DIGIT_BASE + n`
pub const DIGIT_BASE: u8 = b'0';

/// Encoded characters per key byte
const DIGITS_PER_BYTE: usize = 2;

/// Length of the encoded name for a key of `key_len` bytes
pub fn encoded_len(key_len: usize) -> usize {
    1 + DIGITS_PER_BYTE * key_len
}

// =============================================================================
// Encoding/Decoding
// =============================================================================

/// Encode a key into its file name
pub fn encode_key(key: &[u8]) -> String {
    let mut name = String::with_capacity(encoded_len(key.len()));
    name.push(MARKER);
    for &byte in key {
        name.push(char::from(DIGIT_BASE + (byte & 0x0F)));
        name.push(char::from(DIGIT_BASE + (byte >> 4)));
    }
    name
}

/// Decode a file name produced by [`encode_key`] back into the key
pub fn decode_key(name: &str) -> Result<Vec<u8>> {
    let digits = name
        .strip_prefix(MARKER)
        .ok_or_else(|| FileMapError::Decode(format!("Missing marker in name {:?}", name)))?
        .as_bytes();

    if digits.len() % DIGITS_PER_BYTE != 0 {
        return Err(FileMapError::Decode(format!(
            "Odd digit count {} in name {:?}",
            digits.len(),
            name
        )));
    }

    digits
        .chunks_exact(DIGITS_PER_BYTE)
        .map(|pair| {
            let lo = nibble(pair[0], name)?;
            let hi = nibble(pair[1], name)?;
            Ok(lo | (hi << 4))
        })
        .collect()
}

/// Map one digit back to its nibble value
fn nibble(digit: u8, name: &str) -> Result<u8> {
    match digit.checked_sub(DIGIT_BASE) {
        Some(value) if value < 16 => Ok(value),
        _ => Err(FileMapError::Decode(format!(
            "Invalid digit {:?} in name {:?}",
            char::from(digit),
            name
        ))),
    }
}
