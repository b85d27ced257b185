//! crypto/evp.rs
//! OpenSSL `EVP_BytesToKey` (MD5, one round) and the salted envelope.
//!
//! Only the key is taken from the derivation; the IV used by the block
//! unit is drawn at random and reported in the breakdown.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use md5::{Digest, Md5};

use crate::constants::{OPENSSL_SALT_LEN, OPENSSL_SALT_MAGIC};

/// Derive `key_len` bytes from a passphrase and 8-byte salt.
///
/// `D_1 = MD5(pass || salt)`, `D_i = MD5(D_{i-1} || pass || salt)`, concatenated.
pub fn bytes_to_key(passphrase: &[u8], salt: &[u8; OPENSSL_SALT_LEN], key_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(key_len + 16);
    let mut prev: Option<[u8; 16]> = None;

    while out.len() < key_len {
        let mut h = Md5::new();
        if let Some(p) = prev {
            h.update(p);
        }
        h.update(passphrase);
        h.update(salt);
        let block: [u8; 16] = h.finalize().into();
        out.extend_from_slice(&block);
        prev = Some(block);
    }

    out.truncate(key_len);
    out
}

/// Base64 of `"Salted__" || salt || ciphertext`.
pub fn salted_envelope(salt: &[u8; OPENSSL_SALT_LEN], ciphertext: &[u8]) -> String {
    let mut buf = Vec::with_capacity(OPENSSL_SALT_MAGIC.len() + OPENSSL_SALT_LEN + ciphertext.len());
    buf.extend_from_slice(OPENSSL_SALT_MAGIC);
    buf.extend_from_slice(salt);
    buf.extend_from_slice(ciphertext);
    STANDARD.encode(buf)
}
