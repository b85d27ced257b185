//! params/records.rs
//! Per-family parameter records and the tagged `HashingParams` union.
//!
//! Design:
//! - Wire shape is the UI's camelCase JSON, tagged by `name`.
//! - Records are plain data; ranges are checked by `validate()`, never clamped.
//! - Lengths are unsigned, so negative values are rejected while parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{
    ARGON2_MAX_HASH_LEN, ARGON2_MAX_SALT_LEN, ARGON2_MIN_HASH_LEN, ARGON2_MIN_SALT_LEN,
    BCRYPT_MAX_COST, BCRYPT_MIN_COST, MAX_IV_LEN,
};
use crate::params::types::AlgorithmId;
use crate::types::ComputationError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BcryptParams {
    pub cost: u32,
    /// Accepted for shape parity; bcrypt always uses a 16-byte salt.
    #[serde(default)]
    pub salt_length: usize,
}

impl BcryptParams {
    pub fn validate(&self) -> Result<(), ComputationError> {
        if !(BCRYPT_MIN_COST..=BCRYPT_MAX_COST).contains(&self.cost) {
            return Err(ComputationError::invalid(
                "cost",
                format!("must be between {BCRYPT_MIN_COST} and {BCRYPT_MAX_COST}, got {}", self.cost),
            ));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Argon2Variant {
    Argon2id,
    Argon2i,
    Argon2d,
}

impl Argon2Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Argon2Variant::Argon2id => "argon2id",
            Argon2Variant::Argon2i  => "argon2i",
            Argon2Variant::Argon2d  => "argon2d",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argon2Params {
    #[serde(rename = "type")]
    pub variant: Argon2Variant,
    /// Passes over memory.
    pub time: u32,
    /// Memory cost in KiB.
    pub memory: u32,
    pub parallelism: u32,
    pub hash_length: usize,
    #[serde(default)]
    pub salt_length: usize,
}

impl Argon2Params {
    pub fn validate(&self) -> Result<(), ComputationError> {
        if self.time < 1 {
            return Err(ComputationError::invalid("time", "must be at least 1"));
        }
        if self.parallelism < 1 {
            return Err(ComputationError::invalid("parallelism", "must be at least 1"));
        }
        let min_memory = 8u64 * u64::from(self.parallelism);
        if u64::from(self.memory) < min_memory {
            return Err(ComputationError::invalid(
                "memory",
                format!("must be at least {min_memory} KiB for parallelism {}", self.parallelism),
            ));
        }
        if !(ARGON2_MIN_HASH_LEN..=ARGON2_MAX_HASH_LEN).contains(&self.hash_length) {
            return Err(ComputationError::invalid(
                "hashLength",
                format!(
                    "must be between {ARGON2_MIN_HASH_LEN} and {ARGON2_MAX_HASH_LEN}, got {}",
                    self.hash_length
                ),
            ));
        }
        if !(ARGON2_MIN_SALT_LEN..=ARGON2_MAX_SALT_LEN).contains(&self.salt_length) {
            return Err(ComputationError::invalid(
                "saltLength",
                format!(
                    "must be between {ARGON2_MIN_SALT_LEN} and {ARGON2_MAX_SALT_LEN}, got {}",
                    self.salt_length
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pbkdf2Hash {
    #[serde(rename = "SHA-256")]
    Sha256,
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl Pbkdf2Hash {
    /// Display name, e.g. `SHA-256`.
    pub fn as_str(self) -> &'static str {
        match self {
            Pbkdf2Hash::Sha256 => "SHA-256",
            Pbkdf2Hash::Sha512 => "SHA-512",
        }
    }

    /// Tag used in the encoded output, e.g. `sha256`.
    pub fn tag(self) -> &'static str {
        match self {
            Pbkdf2Hash::Sha256 => "sha256",
            Pbkdf2Hash::Sha512 => "sha512",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pbkdf2Params {
    pub iterations: u32,
    pub hash: Pbkdf2Hash,
    #[serde(default)]
    pub salt_length: usize,
}

impl Pbkdf2Params {
    pub fn validate(&self) -> Result<(), ComputationError> {
        if self.iterations < 1 {
            return Err(ComputationError::invalid("iterations", "must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScryptParams {
    /// CPU/memory cost, a power of two.
    #[serde(rename = "N")]
    pub n: u64,
    pub r: u32,
    pub p: u32,
    pub dk_len: usize,
    #[serde(default)]
    pub salt_length: usize,
}

impl ScryptParams {
    pub fn validate(&self) -> Result<(), ComputationError> {
        if self.n <= 1 || !self.n.is_power_of_two() {
            return Err(ComputationError::invalid(
                "N",
                format!("must be a power of two greater than 1, got {}", self.n),
            ));
        }
        if self.r < 1 {
            return Err(ComputationError::invalid("r", "must be at least 1"));
        }
        if self.p < 1 {
            return Err(ComputationError::invalid("p", "must be at least 1"));
        }
        if self.dk_len < 1 {
            return Err(ComputationError::invalid("dkLen", "must be at least 1"));
        }
        Ok(())
    }

    /// `log2(N)`; only meaningful after `validate()`.
    pub fn log_n(&self) -> u8 {
        self.n.trailing_zeros() as u8
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastHashParams {
    pub iterations: u32,
    #[serde(default)]
    pub salt_length: usize,
}

impl FastHashParams {
    pub fn validate(&self) -> Result<(), ComputationError> {
        if self.iterations < 1 {
            return Err(ComputationError::invalid("iterations", "must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockMode {
    Ecb,
    Cbc,
    Ctr,
    Ofb,
    Cfb,
}

impl BlockMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockMode::Ecb => "ECB",
            BlockMode::Cbc => "CBC",
            BlockMode::Ctr => "CTR",
            BlockMode::Ofb => "OFB",
            BlockMode::Cfb => "CFB",
        }
    }

    pub fn uses_iv(self) -> bool {
        !matches!(self, BlockMode::Ecb)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionParams {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<BlockMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iv_length: Option<usize>,
    #[serde(default)]
    pub salt_length: usize,
}

impl EncryptionParams {
    /// Number of IV bytes to draw: the requested count, or one block.
    pub fn resolve_iv_length(&self, block_len: usize) -> Result<usize, ComputationError> {
        match self.iv_length {
            None => Ok(block_len),
            Some(n) if (1..=MAX_IV_LEN).contains(&n) => Ok(n),
            Some(n) => Err(ComputationError::invalid(
                "ivLength",
                format!("must be 1 to {MAX_IV_LEN} bytes, got {n}"),
            )),
        }
    }
}

/// Parameter record for one request, tagged by algorithm name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name")]
pub enum HashingParams {
    #[serde(rename = "bcrypt")]
    Bcrypt(BcryptParams),
    #[serde(rename = "argon2")]
    Argon2(Argon2Params),
    #[serde(rename = "pbkdf2")]
    Pbkdf2(Pbkdf2Params),
    #[serde(rename = "scrypt")]
    Scrypt(ScryptParams),
    #[serde(rename = "md5")]
    Md5(FastHashParams),
    #[serde(rename = "sha1")]
    Sha1(FastHashParams),
    #[serde(rename = "sha256")]
    Sha256(FastHashParams),
    #[serde(rename = "sha512")]
    Sha512(FastHashParams),
    #[serde(rename = "sha3")]
    Sha3(FastHashParams),
    #[serde(rename = "sha3-128")]
    Sha3_128(FastHashParams),
    #[serde(rename = "ripemd160")]
    Ripemd160(FastHashParams),
    #[serde(rename = "aes")]
    Aes(EncryptionParams),
    #[serde(rename = "des")]
    Des(EncryptionParams),
    #[serde(rename = "tripledes")]
    TripleDes(EncryptionParams),
    #[serde(rename = "blowfish")]
    Blowfish(EncryptionParams),
    #[serde(rename = "twofish")]
    Twofish(EncryptionParams),
    #[serde(rename = "chacha20")]
    Chacha20(EncryptionParams),
}

impl HashingParams {
    pub fn algorithm(&self) -> AlgorithmId {
        match self {
            HashingParams::Bcrypt(_)    => AlgorithmId::Bcrypt,
            HashingParams::Argon2(_)    => AlgorithmId::Argon2,
            HashingParams::Pbkdf2(_)    => AlgorithmId::Pbkdf2,
            HashingParams::Scrypt(_)    => AlgorithmId::Scrypt,
            HashingParams::Md5(_)       => AlgorithmId::Md5,
            HashingParams::Sha1(_)      => AlgorithmId::Sha1,
            HashingParams::Sha256(_)    => AlgorithmId::Sha256,
            HashingParams::Sha512(_)    => AlgorithmId::Sha512,
            HashingParams::Sha3(_)      => AlgorithmId::Sha3,
            HashingParams::Sha3_128(_)  => AlgorithmId::Sha3_128,
            HashingParams::Ripemd160(_) => AlgorithmId::Ripemd160,
            HashingParams::Aes(_)       => AlgorithmId::Aes,
            HashingParams::Des(_)       => AlgorithmId::Des,
            HashingParams::TripleDes(_) => AlgorithmId::TripleDes,
            HashingParams::Blowfish(_)  => AlgorithmId::Blowfish,
            HashingParams::Twofish(_)   => AlgorithmId::Twofish,
            HashingParams::Chacha20(_)  => AlgorithmId::Chacha20,
        }
    }

    pub fn salt_length(&self) -> usize {
        match self {
            HashingParams::Bcrypt(p) => p.salt_length,
            HashingParams::Argon2(p) => p.salt_length,
            HashingParams::Pbkdf2(p) => p.salt_length,
            HashingParams::Scrypt(p) => p.salt_length,
            HashingParams::Md5(p)
            | HashingParams::Sha1(p)
            | HashingParams::Sha256(p)
            | HashingParams::Sha512(p)
            | HashingParams::Sha3(p)
            | HashingParams::Sha3_128(p)
            | HashingParams::Ripemd160(p) => p.salt_length,
            HashingParams::Aes(p)
            | HashingParams::Des(p)
            | HashingParams::TripleDes(p)
            | HashingParams::Blowfish(p)
            | HashingParams::Twofish(p)
            | HashingParams::Chacha20(p) => p.salt_length,
        }
    }

    /// Parse a loosely-typed record.
    ///
    /// The `name` tag is resolved first so an unrecognised identifier is
    /// reported as `UnknownAlgorithm` rather than as a shape error.
    pub fn from_value(value: &Value) -> Result<Self, ComputationError> {
        let name = value
            .get("name")
            .ok_or_else(|| ComputationError::invalid("name", "missing algorithm name"))?
            .as_str()
            .ok_or_else(|| ComputationError::invalid("name", "algorithm name must be a string"))?;

        name.parse::<AlgorithmId>()?;

        serde_json::from_value(value.clone())
            .map_err(|e| ComputationError::invalid("params", e.to_string()))
    }
}
