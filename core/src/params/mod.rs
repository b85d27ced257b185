//! Parameter model.
//!
//! Responsibilities:
//! - Name every supported algorithm (`AlgorithmId`) and its family
//! - Carry one immutable parameter record per algorithm (`HashingParams`)
//! - Validate documented ranges before a unit runs
//!
//! Non-responsibilities:
//! - Cryptography
//! - Default selection (see `constants::default_params`)

pub mod types;
pub mod records;

pub use types::{AlgorithmId, Family};
pub use records::{
    Argon2Params, Argon2Variant, BcryptParams, BlockMode, EncryptionParams, FastHashParams,
    HashingParams, Pbkdf2Hash, Pbkdf2Params, ScryptParams,
};
