//! crypto/block.rs
//! AES-256, DES, 3DES and Blowfish under ECB/CBC/CTR/OFB/CFB.
//!
//! Design:
//! - ECB and CBC pad with PKCS#7; CTR, OFB and CFB run unpadded.
//! - Non-ECB modes draw a fresh random IV of `ivLength` bytes (AES, Blowfish)
//!   or one block (DES, 3DES). The cipher consumes the first block of it,
//!   zero-extended when the draw is shorter; the breakdown shows all of it.
//! - AES/DES/3DES treat the key as a passphrase (`EVP_BytesToKey`) and emit
//!   the OpenSSL salted envelope; Blowfish takes raw key bytes and emits hex.
//! - Each cipher is a `BlockSuite`: the raw cipher plus its five mode types.
//!   Modes are built from an already-keyed cipher so variable-length keys work.

use aes::Aes256;
use blowfish::Blowfish;
use cipher::block_padding::Pkcs7;
use cipher::crypto_common::InnerInit;
use cipher::{AsyncStreamCipher, BlockEncryptMut, InnerIvInit, KeyInit, StreamCipherCore};
use des::{Des, TdesEde3};

use crate::constants::{
    AES_BLOCK_LEN, AES_KEY_LEN, BLOWFISH_BLOCK_LEN, BLOWFISH_MAX_KEY_LEN, BLOWFISH_MIN_KEY_LEN,
    DES_BLOCK_LEN, DES_KEY_LEN, MASKED_KEY, NOT_APPLICABLE, OPENSSL_SALT_LEN, TDES_KEY_LEN,
};
use crate::crypto::close_window;
use crate::crypto::evp::{bytes_to_key, salted_envelope};
use crate::crypto::types::{HashComponent, HashResult, SegmentColor};
use crate::params::{BlockMode, EncryptionParams};
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::ComputationError;
use crate::utils::{preview, random_array, random_bytes, to_hex};

/// A block cipher together with its mode-of-operation wrappers.
pub trait BlockSuite {
    const NAME: &'static str;
    const BLOCK_LEN: usize;

    type Cipher: KeyInit;
    type Ecb: InnerInit<Inner = Self::Cipher> + BlockEncryptMut;
    type Cbc: InnerIvInit<Inner = Self::Cipher> + BlockEncryptMut;
    /// Stream modes are held as cores so they can be keyed from `Cipher`.
    type Ctr: InnerIvInit<Inner = Self::Cipher> + StreamCipherCore;
    type Ofb: InnerIvInit<Inner = Self::Cipher> + StreamCipherCore;
    type Cfb: InnerIvInit<Inner = Self::Cipher> + AsyncStreamCipher + BlockEncryptMut;
}

macro_rules! block_suite {
    ($suite:ident, $name:literal, $cipher:ty, $ctr:ident, $block:expr) => {
        pub struct $suite;

        impl BlockSuite for $suite {
            const NAME: &'static str = $name;
            const BLOCK_LEN: usize = $block;

            type Cipher = $cipher;
            type Ecb = ecb::Encryptor<$cipher>;
            type Cbc = cbc::Encryptor<$cipher>;
            type Ctr = ctr::CtrCore<$cipher, ctr::flavors::$ctr>;
            type Ofb = ofb::OfbCore<$cipher>;
            type Cfb = cfb_mode::Encryptor<$cipher>;
        }
    };
}

block_suite!(AesSuite, "aes", Aes256, Ctr128BE, AES_BLOCK_LEN);
block_suite!(DesSuite, "des", Des, Ctr64BE, DES_BLOCK_LEN);
block_suite!(TripleDesSuite, "tripledes", TdesEde3, Ctr64BE, DES_BLOCK_LEN);
block_suite!(BlowfishSuite, "blowfish", Blowfish, Ctr64BE, BLOWFISH_BLOCK_LEN);

/// Encrypt `data` with key bytes `key` under `mode`.
///
/// `iv` is ignored for ECB and must be one block long otherwise.
pub fn encrypt_mode<S: BlockSuite>(
    mode: BlockMode,
    key: &[u8],
    iv: &[u8],
    data: &[u8],
) -> Result<Vec<u8>, ComputationError> {
    let cipher = S::Cipher::new_from_slice(key)
        .map_err(|_| ComputationError::primitive(S::NAME, format!("invalid key length {}", key.len())))?;
    let bad_iv =
        |_| ComputationError::primitive(S::NAME, format!("invalid IV length {}", iv.len()));
    let exhausted = |_| ComputationError::primitive(S::NAME, "keystream exhausted");

    let out = match mode {
        BlockMode::Ecb => S::Ecb::inner_init(cipher).encrypt_padded_vec_mut::<Pkcs7>(data),
        BlockMode::Cbc => S::Cbc::inner_iv_slice_init(cipher, iv)
            .map_err(bad_iv)?
            .encrypt_padded_vec_mut::<Pkcs7>(data),
        BlockMode::Ctr => {
            let mut buf = data.to_vec();
            S::Ctr::inner_iv_slice_init(cipher, iv)
                .map_err(bad_iv)?
                .try_apply_keystream_partial(buf.as_mut_slice().into())
                .map_err(exhausted)?;
            buf
        }
        BlockMode::Ofb => {
            let mut buf = data.to_vec();
            S::Ofb::inner_iv_slice_init(cipher, iv)
                .map_err(bad_iv)?
                .try_apply_keystream_partial(buf.as_mut_slice().into())
                .map_err(exhausted)?;
            buf
        }
        BlockMode::Cfb => {
            let mut buf = data.to_vec();
            S::Cfb::inner_iv_slice_init(cipher, iv).map_err(bad_iv)?.encrypt(&mut buf);
            buf
        }
    };
    Ok(out)
}

/// How the user key becomes cipher key bytes.
#[derive(Copy, Clone, Debug)]
enum Keying {
    /// OpenSSL passphrase derivation to a fixed key size.
    Passphrase { key_len: usize },
    /// UTF-8 bytes used as-is, within bounds.
    Raw { min: usize, max: usize },
}

/// Where the IV length comes from.
#[derive(Copy, Clone, Debug)]
enum IvSource {
    /// `ivLength` from the request, one block when absent.
    Requested,
    /// Always one block; `ivLength` is ignored.
    Block,
}

/// The first `block_len` bytes of `drawn`, zero-extended when short.
fn cipher_iv(drawn: &[u8], block_len: usize) -> Vec<u8> {
    let mut iv = vec![0u8; block_len];
    let n = drawn.len().min(block_len);
    iv[..n].copy_from_slice(&drawn[..n]);
    iv
}

/// Everything one cipher run produced, before formatting.
struct Sealed {
    output: String,
    ciphertext: Vec<u8>,
    mode: BlockMode,
    iv: Option<Vec<u8>>,
    time_ms: f64,
}

fn seal<S: BlockSuite>(
    password: &str,
    params: &EncryptionParams,
    default_mode: BlockMode,
    keying: Keying,
    iv_source: IvSource,
) -> Result<Sealed, ComputationError> {
    let mode = params.mode.unwrap_or(default_mode);
    let iv_len = match iv_source {
        IvSource::Requested => params.resolve_iv_length(S::BLOCK_LEN)?,
        IvSource::Block => S::BLOCK_LEN,
    };

    if let Keying::Raw { min, max } = keying {
        let n = params.key.len();
        if !(min..=max).contains(&n) {
            return Err(ComputationError::invalid(
                "key",
                format!("must be {min} to {max} bytes, got {n}"),
            ));
        }
    }

    let mut timer = TelemetryTimer::new();
    let iv = timer.stage(Stage::Salt, || mode.uses_iv().then(|| random_bytes(iv_len)));
    let block_iv = iv.as_deref().map(|d| cipher_iv(d, S::BLOCK_LEN)).unwrap_or_default();
    let iv_slice = block_iv.as_slice();

    let (output, ciphertext) = match keying {
        Keying::Passphrase { key_len } => {
            let salt = timer.stage(Stage::Salt, random_array::<OPENSSL_SALT_LEN>);
            let ct = timer.stage(Stage::Compute, || {
                let key = bytes_to_key(params.key.as_bytes(), &salt, key_len);
                encrypt_mode::<S>(mode, &key, iv_slice, password.as_bytes())
            })?;
            (salted_envelope(&salt, &ct), ct)
        }
        Keying::Raw { .. } => {
            let ct = timer.stage(Stage::Compute, || {
                encrypt_mode::<S>(mode, params.key.as_bytes(), iv_slice, password.as_bytes())
            })?;
            (to_hex(&ct), ct)
        }
    };
    let time_ms = close_window(&mut timer, S::NAME);

    Ok(Sealed { output, ciphertext, mode, iv, time_ms })
}

fn iv_segment(iv: &Option<Vec<u8>>) -> HashComponent {
    let value = iv.as_deref().map(to_hex).unwrap_or_else(|| NOT_APPLICABLE.to_string());
    HashComponent::new("IV", value, "Initialization Vector", SegmentColor::Yellow)
}

fn mode_segment(mode: BlockMode, description: &str) -> HashComponent {
    HashComponent::new("Mode", mode.as_str(), description, SegmentColor::Purple)
}

pub fn aes(password: &str, params: &EncryptionParams) -> Result<HashResult, ComputationError> {
    let keying = Keying::Passphrase { key_len: AES_KEY_LEN };
    let s = seal::<AesSuite>(password, params, BlockMode::Cbc, keying, IvSource::Requested)?;
    Ok(HashResult {
        breakdown: vec![
            HashComponent::new(
                "Alg",
                "AES",
                format!("Advanced Encryption Standard ({})", s.mode.as_str()),
                SegmentColor::Cyan,
            ),
            HashComponent::new("Key", MASKED_KEY, "Passphrase Used", SegmentColor::Gray),
            iv_segment(&s.iv),
            HashComponent::new("Out", preview(&to_hex(&s.ciphertext)), "Ciphertext (Hex truncated)", SegmentColor::Green),
        ],
        hash: s.output,
        time_ms: s.time_ms,
    })
}

pub fn des(password: &str, params: &EncryptionParams) -> Result<HashResult, ComputationError> {
    let keying = Keying::Passphrase { key_len: DES_KEY_LEN };
    let s = seal::<DesSuite>(password, params, BlockMode::Cbc, keying, IvSource::Block)?;
    Ok(HashResult {
        breakdown: vec![
            HashComponent::new("Alg", "DES", "Data Encryption Standard (Legacy)", SegmentColor::Cyan),
            mode_segment(s.mode, "Block Cipher Mode"),
            iv_segment(&s.iv),
            HashComponent::new("Out", preview(&to_hex(&s.ciphertext)), "Ciphertext", SegmentColor::Green),
        ],
        hash: s.output,
        time_ms: s.time_ms,
    })
}

pub fn triple_des(password: &str, params: &EncryptionParams) -> Result<HashResult, ComputationError> {
    let keying = Keying::Passphrase { key_len: TDES_KEY_LEN };
    let s = seal::<TripleDesSuite>(password, params, BlockMode::Cbc, keying, IvSource::Block)?;
    Ok(HashResult {
        breakdown: vec![
            HashComponent::new("Alg", "3DES", "Triple DES", SegmentColor::Cyan),
            mode_segment(s.mode, "Block Cipher Mode"),
            iv_segment(&s.iv),
            HashComponent::new("Out", preview(&to_hex(&s.ciphertext)), "Ciphertext", SegmentColor::Green),
        ],
        hash: s.output,
        time_ms: s.time_ms,
    })
}

pub fn blowfish(password: &str, params: &EncryptionParams) -> Result<HashResult, ComputationError> {
    let keying = Keying::Raw { min: BLOWFISH_MIN_KEY_LEN, max: BLOWFISH_MAX_KEY_LEN };
    let s = seal::<BlowfishSuite>(password, params, BlockMode::Ecb, keying, IvSource::Requested)?;
    Ok(HashResult {
        breakdown: vec![
            HashComponent::new("Alg", "Blowfish", "Symmetric Block Cipher", SegmentColor::Cyan),
            mode_segment(s.mode, "Encryption Mode"),
            iv_segment(&s.iv),
            HashComponent::new("Out", preview(&s.output), "Ciphertext (Hex)", SegmentColor::Green),
        ],
        hash: s.output,
        time_ms: s.time_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // FIPS-197 C.3 (AES-256), single block under ECB without padding block.
    #[test]
    fn aes256_ecb_first_block_matches_fips() {
        let key: Vec<u8> = (0u8..32).collect();
        let pt = hex::decode("00112233445566778899aabbccddeeff").unwrap();
        let ct = encrypt_mode::<AesSuite>(BlockMode::Ecb, &key, &[], &pt).unwrap();
        assert_eq!(ct.len(), 32);
        assert_eq!(to_hex(&ct[..16]), "8ea2b7ca516745bfeafc49904b496089");
    }

    #[test]
    fn stream_modes_keep_length_and_padded_modes_round_up() {
        let key = [7u8; 8];
        let iv = [1u8; 8];
        for mode in [BlockMode::Ctr, BlockMode::Ofb, BlockMode::Cfb] {
            let ct = encrypt_mode::<DesSuite>(mode, &key, &iv, b"hello").unwrap();
            assert_eq!(ct.len(), 5, "{mode:?}");
        }
        let ct = encrypt_mode::<DesSuite>(BlockMode::Cbc, &key, &iv, b"hello").unwrap();
        assert_eq!(ct.len(), 8);
        let ct = encrypt_mode::<DesSuite>(BlockMode::Ecb, &key, &[], b"12345678").unwrap();
        assert_eq!(ct.len(), 16);
    }

    #[test]
    fn blowfish_accepts_short_raw_keys() {
        let ct = encrypt_mode::<BlowfishSuite>(BlockMode::Cbc, b"four", &[0u8; 8], b"x").unwrap();
        assert_eq!(ct.len(), 8);
        assert!(encrypt_mode::<BlowfishSuite>(BlockMode::Ecb, b"abc", &[], b"x").is_err());
    }

    #[test]
    fn cipher_iv_truncates_or_zero_extends() {
        let drawn: Vec<u8> = (1u8..=32).collect();
        assert_eq!(cipher_iv(&drawn, 16), drawn[..16].to_vec());
        assert_eq!(cipher_iv(&drawn[..4], 8), vec![1, 2, 3, 4, 0, 0, 0, 0]);
    }

    #[test]
    fn wrong_iv_length_is_rejected() {
        let key = [0u8; 32];
        assert!(encrypt_mode::<AesSuite>(BlockMode::Cbc, &key, &[0u8; 8], b"x").is_err());
    }
}
