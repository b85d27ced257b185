//! utils.rs
//! Small helpers shared by the computation units.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::{PREVIEW_HEX_CHARS, PREVIEW_SUFFIX};

/// Fresh random bytes from the OS CSPRNG. `OsRng` is safe for concurrent draws.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Fixed-size random array (salts, nonces).
pub fn random_array<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}

/// Lower-case hex, two digits per byte.
#[inline]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Display preview: first 20 chars followed by the literal `...`.
///
/// The suffix is always appended, even when the input is shorter than the
/// preview window.
pub fn preview(s: &str) -> String {
    let cut = s
        .char_indices()
        .nth(PREVIEW_HEX_CHARS)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    format!("{}{}", &s[..cut], PREVIEW_SUFFIX)
}

/// Copy the UTF-8 bytes of `key` into an `N`-byte buffer, truncating or
/// zero-padding as needed.
pub fn fit_key<const N: usize>(key: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let raw = key.as_bytes();
    let n = raw.len().min(N);
    out[..n].copy_from_slice(&raw[..n]);
    out
}
