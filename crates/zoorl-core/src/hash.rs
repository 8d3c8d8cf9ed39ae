//! Short hash derivation for URLs.
//!
//! A URL is digested with SHA-256, the digest is read as a big-endian
//! unsigned integer and reduced modulo 10^12, and the remainder is encoded
//! in base 62, most significant digit first.

use sha2::{Digest, Sha256};

/// Symbols used by the base 62 encoding, in digit order.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Upper bound (exclusive) of the numeric value that gets encoded.
pub const HASH_MODULUS: u64 = 1_000_000_000_000;

/// Longest hash [`compute_hash`] can produce, since 62^7 > 10^12.
pub const MAX_HASH_LEN: usize = 7;

/// Computes the short hash of `url`.
///
/// The result is deterministic and at most [`MAX_HASH_LEN`] characters long.
/// Collisions are possible and are not detected here.
pub fn compute_hash(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    to_base62(reduce(&digest))
}

/// Reduces a big-endian integer, given as bytes, modulo [`HASH_MODULUS`].
fn reduce(digest: &[u8]) -> u64 {
    // acc < 10^12, so acc * 256 + 255 stays well inside u64.
    digest
        .iter()
        .fold(0, |acc, &byte| (acc * 256 + u64::from(byte)) % HASH_MODULUS)
}

/// Encodes `value` in base 62 without padding.
///
/// Zero encodes to the empty string: no digit is emitted when the value is
/// already exhausted.
pub fn to_base62(mut value: u64) -> String {
    let mut digits = Vec::with_capacity(MAX_HASH_LEN);
    while value > 0 {
        digits.push(BASE62_ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.iter().rev().map(|&digit| char::from(digit)).collect()
}
