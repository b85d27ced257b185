//! params/types.rs
//! Algorithm identifiers and families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ComputationError;

/// Algorithm family. Decides which record shape and which unit apply.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    PasswordKdf,
    FastDigest,
    SymmetricCipher,
}

/// One of the 17 supported algorithms, with its stable wire name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmId {
    #[serde(rename = "bcrypt")]
    Bcrypt,
    #[serde(rename = "argon2")]
    Argon2,
    #[serde(rename = "pbkdf2")]
    Pbkdf2,
    #[serde(rename = "scrypt")]
    Scrypt,
    #[serde(rename = "md5")]
    Md5,
    #[serde(rename = "sha1")]
    Sha1,
    #[serde(rename = "sha256")]
    Sha256,
    #[serde(rename = "sha512")]
    Sha512,
    #[serde(rename = "sha3")]
    Sha3,
    #[serde(rename = "sha3-128")]
    Sha3_128,
    #[serde(rename = "ripemd160")]
    Ripemd160,
    #[serde(rename = "aes")]
    Aes,
    #[serde(rename = "des")]
    Des,
    #[serde(rename = "tripledes")]
    TripleDes,
    #[serde(rename = "blowfish")]
    Blowfish,
    #[serde(rename = "twofish")]
    Twofish,
    #[serde(rename = "chacha20")]
    Chacha20,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 17] = [
        AlgorithmId::Bcrypt,
        AlgorithmId::Argon2,
        AlgorithmId::Pbkdf2,
        AlgorithmId::Scrypt,
        AlgorithmId::Md5,
        AlgorithmId::Sha1,
        AlgorithmId::Sha256,
        AlgorithmId::Sha512,
        AlgorithmId::Sha3,
        AlgorithmId::Sha3_128,
        AlgorithmId::Ripemd160,
        AlgorithmId::Aes,
        AlgorithmId::Des,
        AlgorithmId::TripleDes,
        AlgorithmId::Blowfish,
        AlgorithmId::Twofish,
        AlgorithmId::Chacha20,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AlgorithmId::Bcrypt    => "bcrypt",
            AlgorithmId::Argon2    => "argon2",
            AlgorithmId::Pbkdf2    => "pbkdf2",
            AlgorithmId::Scrypt    => "scrypt",
            AlgorithmId::Md5       => "md5",
            AlgorithmId::Sha1      => "sha1",
            AlgorithmId::Sha256    => "sha256",
            AlgorithmId::Sha512    => "sha512",
            AlgorithmId::Sha3      => "sha3",
            AlgorithmId::Sha3_128  => "sha3-128",
            AlgorithmId::Ripemd160 => "ripemd160",
            AlgorithmId::Aes       => "aes",
            AlgorithmId::Des       => "des",
            AlgorithmId::TripleDes => "tripledes",
            AlgorithmId::Blowfish  => "blowfish",
            AlgorithmId::Twofish   => "twofish",
            AlgorithmId::Chacha20  => "chacha20",
        }
    }

    pub fn family(self) -> Family {
        match self {
            AlgorithmId::Bcrypt
            | AlgorithmId::Argon2
            | AlgorithmId::Pbkdf2
            | AlgorithmId::Scrypt => Family::PasswordKdf,

            AlgorithmId::Md5
            | AlgorithmId::Sha1
            | AlgorithmId::Sha256
            | AlgorithmId::Sha512
            | AlgorithmId::Sha3
            | AlgorithmId::Sha3_128
            | AlgorithmId::Ripemd160 => Family::FastDigest,

            AlgorithmId::Aes
            | AlgorithmId::Des
            | AlgorithmId::TripleDes
            | AlgorithmId::Blowfish
            | AlgorithmId::Twofish
            | AlgorithmId::Chacha20 => Family::SymmetricCipher,
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlgorithmId {
    type Err = ComputationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| ComputationError::UnknownAlgorithm(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for id in AlgorithmId::ALL {
            assert_eq!(id.as_str().parse::<AlgorithmId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_name_is_typed_error() {
        let err = "not-real".parse::<AlgorithmId>().unwrap_err();
        assert_eq!(err, ComputationError::UnknownAlgorithm("not-real".into()));
    }

    #[test]
    fn families_partition_all_ids() {
        let kdf = AlgorithmId::ALL.iter().filter(|i| i.family() == Family::PasswordKdf).count();
        let dig = AlgorithmId::ALL.iter().filter(|i| i.family() == Family::FastDigest).count();
        let sym = AlgorithmId::ALL.iter().filter(|i| i.family() == Family::SymmetricCipher).count();
        assert_eq!((kdf, dig, sym), (4, 7, 6));
    }

    #[test]
    fn serde_name_matches_as_str() {
        for id in AlgorithmId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
