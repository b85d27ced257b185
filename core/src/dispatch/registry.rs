//! dispatch/registry.rs
//! Static metadata per algorithm.

use serde::Serialize;

use crate::params::{AlgorithmId, Family};
use crate::types::ComputationError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgorithmInfo {
    pub id: AlgorithmId,
    pub display_name: &'static str,
    pub family: Family,
    /// Fixed number of breakdown segments in every successful result.
    pub breakdown_len: usize,
}

pub fn resolve(id: AlgorithmId) -> AlgorithmInfo {
    let (display_name, breakdown_len) = match id {
        AlgorithmId::Bcrypt    => ("bcrypt", 4),
        AlgorithmId::Argon2    => ("Argon2", 5),
        AlgorithmId::Pbkdf2    => ("PBKDF2", 4),
        AlgorithmId::Scrypt    => ("scrypt", 4),
        AlgorithmId::Md5       => ("MD5", 4),
        AlgorithmId::Sha1      => ("SHA-1", 4),
        AlgorithmId::Sha256    => ("SHA-256", 4),
        AlgorithmId::Sha512    => ("SHA-512", 4),
        AlgorithmId::Sha3      => ("SHA-3", 4),
        AlgorithmId::Sha3_128  => ("SHA-3-128", 4),
        AlgorithmId::Ripemd160 => ("RIPEMD-160", 4),
        AlgorithmId::Aes       => ("AES", 4),
        AlgorithmId::Des       => ("DES", 4),
        AlgorithmId::TripleDes => ("3DES", 4),
        AlgorithmId::Blowfish  => ("Blowfish", 4),
        AlgorithmId::Twofish   => ("Twofish", 3),
        AlgorithmId::Chacha20  => ("ChaCha20", 3),
    };
    AlgorithmInfo { id, display_name, family: id.family(), breakdown_len }
}

/// Look up by wire name.
pub fn resolve_name(name: &str) -> Result<AlgorithmInfo, ComputationError> {
    Ok(resolve(name.parse()?))
}

/// All algorithms in canonical order.
pub fn catalog() -> Vec<AlgorithmInfo> {
    AlgorithmId::ALL.iter().copied().map(resolve).collect()
}
