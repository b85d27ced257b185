//! crypto/scrypt.rs
//! scrypt with caller-chosen (N, r, p) and output length.
//!
//! Output grammar: `scrypt$N=<N>,r=<r>,p=<p>$<saltHex>$<hashHex>`

use scrypt::Params;

use crate::constants::SCRYPT_PARAMS_LEN;
use crate::crypto::close_window;
use crate::crypto::types::{HashComponent, HashResult, SegmentColor};
use crate::params::ScryptParams;
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::ComputationError;
use crate::utils::{random_bytes, to_hex};

const ALG: &str = "scrypt";

pub fn hash(password: &str, params: &ScryptParams) -> Result<HashResult, ComputationError> {
    params.validate()?;

    // Params only carries the PHC length; the output buffer sets dkLen.
    let cost = Params::new(params.log_n(), params.r, params.p, SCRYPT_PARAMS_LEN)
        .map_err(|e| ComputationError::primitive(ALG, e))?;

    let mut timer = TelemetryTimer::new();
    let salt = timer.stage(Stage::Salt, || random_bytes(params.salt_length));
    let mut key = vec![0u8; params.dk_len];
    timer
        .stage(Stage::Compute, || scrypt::scrypt(password.as_bytes(), &salt, &cost, &mut key))
        .map_err(|e| ComputationError::primitive(ALG, e))?;
    let time_ms = close_window(&mut timer, ALG);

    let cost_str = format!("N={},r={},p={}", params.n, params.r, params.p);
    let salt_hex = to_hex(&salt);
    let hash_hex = to_hex(&key);

    Ok(HashResult {
        hash: format!("scrypt${cost_str}${salt_hex}${hash_hex}"),
        time_ms,
        breakdown: vec![
            HashComponent::new("Alg", "scrypt", "Scrypt algorithm", SegmentColor::Cyan),
            HashComponent::new("Params", cost_str, "Cost parameters", SegmentColor::Purple),
            HashComponent::new("Salt", salt_hex, "Hex encoded salt", SegmentColor::Yellow),
            HashComponent::new("Hash", hash_hex, "Derived key", SegmentColor::Green),
        ],
    })
}
