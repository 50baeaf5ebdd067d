//! Hex normalization and conversion.

use crate::error::ClientResult;

/// Strip a leading `0x`/`0X` prefix if present. Never adds one.
pub fn hex_fix(word: &str) -> &str {
    if word.len() >= 2 && (word.starts_with("0x") || word.starts_with("0X")) {
        &word[2..]
    } else {
        word
    }
}

/// Encode bytes as a lowercase hex string.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a hex string (optional `0x` prefix) into bytes.
///
/// Odd-length or non-hex input is an error, never a truncated result.
pub fn from_hex(s: &str) -> ClientResult<Vec<u8>> {
    Ok(hex::decode(hex_fix(s))?)
}
