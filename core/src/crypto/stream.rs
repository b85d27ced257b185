//! crypto/stream.rs
//! IETF ChaCha20 (96-bit nonce, counter from 0).
//!
//! The key is truncated or zero-padded to 32 bytes; `mode` and `ivLength`
//! do not apply.

use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::ChaCha20;

use crate::constants::{CHACHA20_KEY_LEN, CHACHA20_NONCE_LEN};
use crate::crypto::close_window;
use crate::crypto::types::{HashComponent, HashResult, SegmentColor};
use crate::params::EncryptionParams;
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::ComputationError;
use crate::utils::{fit_key, preview, random_array, to_hex};

const ALG: &str = "chacha20";

pub fn apply(key: &[u8; CHACHA20_KEY_LEN], nonce: &[u8; CHACHA20_NONCE_LEN], data: &[u8]) -> Vec<u8> {
    let mut buf = data.to_vec();
    let mut cipher = ChaCha20::new(key.into(), nonce.into());
    cipher.apply_keystream(&mut buf);
    buf
}

pub fn encrypt(password: &str, params: &EncryptionParams) -> Result<HashResult, ComputationError> {
    let key: [u8; CHACHA20_KEY_LEN] = fit_key(&params.key);

    let mut timer = TelemetryTimer::new();
    let nonce = timer.stage(Stage::Salt, random_array::<CHACHA20_NONCE_LEN>);
    let ct = timer.stage(Stage::Compute, || apply(&key, &nonce, password.as_bytes()));
    let time_ms = close_window(&mut timer, ALG);

    let hex = to_hex(&ct);
    Ok(HashResult {
        breakdown: vec![
            HashComponent::new("Alg", "ChaCha20", "Stream Cipher", SegmentColor::Cyan),
            HashComponent::new("Nonce", to_hex(&nonce), "Random 96-bit nonce", SegmentColor::Yellow),
            HashComponent::new("Out", preview(&hex), "Ciphertext", SegmentColor::Green),
        ],
        hash: hex,
        time_ms,
    })
}
