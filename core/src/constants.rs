//! constants.rs
//! Stable sizes, display literals and the default parameter table.

use crate::params::{
    AlgorithmId, Argon2Params, Argon2Variant, BcryptParams, BlockMode, EncryptionParams,
    FastHashParams, HashingParams, Pbkdf2Hash, Pbkdf2Params, ScryptParams,
};

/// bcrypt always salts with 16 raw bytes (22 chars of bcrypt base64).
pub const BCRYPT_SALT_LEN: usize = 16;
pub const BCRYPT_SALT_CHARS: usize = 22;
pub const BCRYPT_HASH_CHARS: usize = 31;
pub const BCRYPT_MIN_COST: u32 = 4;
pub const BCRYPT_MAX_COST: u32 = 31;

/// Argon2 salt bounds accepted by the PHC string encoder.
pub const ARGON2_MIN_SALT_LEN: usize = 8;
pub const ARGON2_MAX_SALT_LEN: usize = 48;
pub const ARGON2_MIN_HASH_LEN: usize = 4;
/// Largest digest the PHC string encoder holds.
pub const ARGON2_MAX_HASH_LEN: usize = 64;

/// PBKDF2 derived key size (256-bit, independent of the inner hash).
pub const PBKDF2_KEY_LEN: usize = 32;

/// Length handed to `scrypt::Params`; the real output length is the buffer size.
pub const SCRYPT_PARAMS_LEN: usize = 32;

/// Block sizes, also the default IV lengths.
pub const AES_BLOCK_LEN: usize = 16;
pub const DES_BLOCK_LEN: usize = 8;
pub const BLOWFISH_BLOCK_LEN: usize = 8;
pub const TWOFISH_BLOCK_LEN: usize = 16;

/// Largest `ivLength` a request may ask for.
pub const MAX_IV_LEN: usize = 64;

/// Passphrase-derived key sizes (EVP_BytesToKey output).
pub const AES_KEY_LEN: usize = 32;
pub const DES_KEY_LEN: usize = 8;
pub const TDES_KEY_LEN: usize = 24;

/// Raw-key bounds.
pub const BLOWFISH_MIN_KEY_LEN: usize = 4;
pub const BLOWFISH_MAX_KEY_LEN: usize = 56;
pub const TWOFISH_KEY_LEN: usize = 16;
pub const CHACHA20_KEY_LEN: usize = 32;
pub const CHACHA20_NONCE_LEN: usize = 12;

/// OpenSSL salted envelope: `"Salted__" || salt(8) || ciphertext`.
pub const OPENSSL_SALT_MAGIC: &[u8; 8] = b"Salted__";
pub const OPENSSL_SALT_LEN: usize = 8;

/// `sha3-128`: Keccak with capacity 256 (rate 168 bytes), 16-byte output.
pub const KECCAK128_RATE: usize = 168;
pub const KECCAK128_OUT_LEN: usize = 16;

/// Breakdown display literals.
pub const PREVIEW_HEX_CHARS: usize = 20;
pub const PREVIEW_SUFFIX: &str = "...";
pub const NOT_APPLICABLE: &str = "N/A";
pub const NO_SALT: &str = "None";
pub const MASKED_KEY: &str = "***";

/// Playground defaults per algorithm.
///
/// Hosts use these to seed their controls; the core never substitutes them
/// for missing or invalid fields.
pub fn default_params(id: AlgorithmId) -> HashingParams {
    let fast = FastHashParams { iterations: 1, salt_length: 0 };
    let cipher = |key: &str, mode: Option<BlockMode>, iv: usize| EncryptionParams {
        key: key.to_string(),
        mode,
        iv_length: Some(iv),
        salt_length: 0,
    };

    match id {
        AlgorithmId::Bcrypt => HashingParams::Bcrypt(BcryptParams { cost: 12, salt_length: 16 }),
        AlgorithmId::Argon2 => HashingParams::Argon2(Argon2Params {
            variant: Argon2Variant::Argon2id,
            time: 3,
            memory: 65_536, // 64 MiB
            parallelism: 4,
            hash_length: 32,
            salt_length: 16,
        }),
        AlgorithmId::Pbkdf2 => HashingParams::Pbkdf2(Pbkdf2Params {
            hash: Pbkdf2Hash::Sha256,
            iterations: 100_000,
            salt_length: 16,
        }),
        AlgorithmId::Scrypt => HashingParams::Scrypt(ScryptParams {
            n: 16_384, // 2^14
            r: 8,
            p: 1,
            dk_len: 64,
            salt_length: 16,
        }),
        AlgorithmId::Md5 => HashingParams::Md5(fast),
        AlgorithmId::Sha1 => HashingParams::Sha1(fast),
        AlgorithmId::Sha256 => HashingParams::Sha256(fast),
        AlgorithmId::Sha512 => HashingParams::Sha512(fast),
        AlgorithmId::Sha3 => HashingParams::Sha3(fast),
        AlgorithmId::Sha3_128 => HashingParams::Sha3_128(fast),
        AlgorithmId::Ripemd160 => HashingParams::Ripemd160(fast),
        AlgorithmId::Aes => HashingParams::Aes(cipher("secret_key", Some(BlockMode::Cbc), 16)),
        AlgorithmId::Des => HashingParams::Des(cipher("secret_key", Some(BlockMode::Cbc), 8)),
        AlgorithmId::TripleDes => {
            HashingParams::TripleDes(cipher("secret_key", Some(BlockMode::Cbc), 8))
        }
        AlgorithmId::Blowfish => {
            HashingParams::Blowfish(cipher("secret", Some(BlockMode::Ecb), 8))
        }
        AlgorithmId::Twofish => HashingParams::Twofish(cipher("secret", Some(BlockMode::Ecb), 16)),
        AlgorithmId::Chacha20 => {
            HashingParams::Chacha20(cipher("secret_key_32_bytes_needed", None, 12))
        }
    }
}
