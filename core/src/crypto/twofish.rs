//! crypto/twofish.rs
//! Twofish-128 with a hand-rolled ECB block loop.
//!
//! Deliberate simplification: no IV path and no mode selection. The key is
//! the first 16 UTF-8 bytes (zero-padded) and the input is zero-padded to
//! `ceil((len + 1) / 16) * 16` bytes, so there is always at least one pad byte.

use cipher::generic_array::GenericArray;
use cipher::{BlockEncrypt, KeyInit};
use twofish::Twofish;

use crate::constants::{TWOFISH_BLOCK_LEN, TWOFISH_KEY_LEN};
use crate::crypto::close_window;
use crate::crypto::types::{HashComponent, HashResult, SegmentColor};
use crate::params::EncryptionParams;
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::ComputationError;
use crate::utils::{fit_key, to_hex};

const ALG: &str = "twofish";

/// Zero-padded length, always strictly greater than `len`.
pub fn padded_len(len: usize) -> usize {
    (len + 1).div_ceil(TWOFISH_BLOCK_LEN) * TWOFISH_BLOCK_LEN
}

pub fn encrypt_ecb(key: &[u8; TWOFISH_KEY_LEN], data: &[u8]) -> Result<Vec<u8>, ComputationError> {
    let cipher = Twofish::new_from_slice(key).map_err(|e| ComputationError::primitive(ALG, e))?;

    let mut buf = vec![0u8; padded_len(data.len())];
    buf[..data.len()].copy_from_slice(data);
    for block in buf.chunks_exact_mut(TWOFISH_BLOCK_LEN) {
        cipher.encrypt_block(GenericArray::from_mut_slice(block));
    }
    Ok(buf)
}

/// `mode` and `ivLength` are ignored.
pub fn encrypt(password: &str, params: &EncryptionParams) -> Result<HashResult, ComputationError> {
    let key: [u8; TWOFISH_KEY_LEN] = fit_key(&params.key);

    let mut timer = TelemetryTimer::new();
    let ct = timer.stage(Stage::Compute, || encrypt_ecb(&key, password.as_bytes()))?;
    let time_ms = close_window(&mut timer, ALG);

    Ok(HashResult {
        hash: to_hex(&ct),
        time_ms,
        breakdown: vec![
            HashComponent::new("Alg", "Twofish", "Successor to Blowfish", SegmentColor::Cyan),
            HashComponent::new("Mode", "ECB (Simulated)", "Manual block loop", SegmentColor::Purple),
            HashComponent::new("Key", "128-bit", "Using first 16 bytes", SegmentColor::Gray),
        ],
    })
}
