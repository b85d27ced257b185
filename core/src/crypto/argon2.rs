//! crypto/argon2.rs
//! Argon2 (id/i/d, v0x13) emitting the PHC string.
//!
//! Design:
//! - The backend is initialised once per process and self-checked before use.
//! - Load latency is charged to `Stage::Load` and logged, never to `timeMs`.
//! - A failed load is not cached; the next call retries.
//!
//! Output grammar: `$<variant>$v=19$m=..,t=..,p=..$<saltB64>$<hashB64>`

use std::time::Instant;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::crypto::close_window;
use crate::crypto::types::{HashComponent, HashResult, SegmentColor};
use crate::params::{Argon2Params, Argon2Variant};
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::ComputationError;
use crate::utils::random_bytes;

const ALG: &str = "argon2";

const PROBE_PASSWORD: &[u8] = b"hashlab-probe";
const PROBE_SALT: &[u8] = b"hashlab-probe-salt";

/// Process-wide Argon2 handle.
#[derive(Debug)]
pub struct Argon2Backend {
    version: Version,
}

static BACKEND: OnceCell<Argon2Backend> = OnceCell::new();

impl Argon2Backend {
    /// Build the backend and prove it can hash and verify a probe.
    fn load() -> Result<Self, ComputationError> {
        let backend = Argon2Backend { version: Version::V0x13 };

        let params = Params::new(8, 1, 1, None).map_err(|e| ComputationError::primitive(ALG, e))?;
        let hasher = backend.hasher(Argon2Variant::Argon2id, params);
        let salt = SaltString::encode_b64(PROBE_SALT).map_err(|e| ComputationError::primitive(ALG, e))?;
        let encoded = hasher
            .hash_password(PROBE_PASSWORD, &salt)
            .map_err(|e| ComputationError::primitive(ALG, format!("self-test hash failed: {e}")))?
            .to_string();
        let parsed = PasswordHash::new(&encoded).map_err(|e| ComputationError::primitive(ALG, e))?;
        hasher
            .verify_password(PROBE_PASSWORD, &parsed)
            .map_err(|e| ComputationError::primitive(ALG, format!("self-test verify failed: {e}")))?;

        Ok(backend)
    }

    fn hasher(&self, variant: Argon2Variant, params: Params) -> Argon2<'static> {
        let algorithm = match variant {
            Argon2Variant::Argon2id => Algorithm::Argon2id,
            Argon2Variant::Argon2i  => Algorithm::Argon2i,
            Argon2Variant::Argon2d  => Algorithm::Argon2d,
        };
        Argon2::new(algorithm, self.version, params)
    }
}

/// Shared backend, loading it on first use.
pub fn backend(timer: &mut TelemetryTimer) -> Result<&'static Argon2Backend, ComputationError> {
    if let Some(b) = BACKEND.get() {
        return Ok(b);
    }

    let started = Instant::now();
    let loaded = BACKEND.get_or_try_init(Argon2Backend::load);
    let load_time = started.elapsed();
    timer.add_stage_time(Stage::Load, load_time);

    match loaded {
        Ok(b) => {
            info!(load_ms = load_time.as_secs_f64() * 1_000.0, "argon2 backend loaded");
            Ok(b)
        }
        Err(e) => {
            warn!(error = %e, "argon2 backend failed to load");
            Err(e)
        }
    }
}

/// True once the backend has been initialised in this process.
pub fn is_loaded() -> bool {
    BACKEND.get().is_some()
}

pub fn hash(password: &str, params: &Argon2Params) -> Result<HashResult, ComputationError> {
    params.validate()?;

    let mut timer = TelemetryTimer::new();
    let backend = backend(&mut timer)?;
    timer.restart();

    let argon_params = Params::new(
        params.memory,
        params.time,
        params.parallelism,
        Some(params.hash_length),
    )
    .map_err(|e| ComputationError::primitive(ALG, e))?;
    let hasher = backend.hasher(params.variant, argon_params);

    let salt_bytes = timer.stage(Stage::Salt, || random_bytes(params.salt_length));
    let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| ComputationError::primitive(ALG, e))?;

    let phc = timer
        .stage(Stage::Compute, || hasher.hash_password(password.as_bytes(), &salt))
        .map_err(|e| ComputationError::primitive(ALG, e))?;
    let encoded = timer.stage(Stage::Encode, || phc.to_string());
    let time_ms = close_window(&mut timer, ALG);

    let breakdown = breakdown(&encoded)?;
    Ok(HashResult { hash: encoded, time_ms, breakdown })
}

/// Split a PHC string into its five `$`-delimited fields.
pub fn breakdown(encoded: &str) -> Result<Vec<HashComponent>, ComputationError> {
    let fields: Vec<&str> = encoded.split('$').collect();
    let [lead, alg, ver, cost, salt, digest] = fields.as_slice() else {
        return Err(ComputationError::primitive(ALG, format!("malformed PHC string: {encoded}")));
    };
    if !lead.is_empty() {
        return Err(ComputationError::primitive(ALG, format!("malformed PHC string: {encoded}")));
    }

    Ok(vec![
        HashComponent::new("Alg", *alg, "Argon2 variant", SegmentColor::Cyan),
        HashComponent::new("Ver", *ver, "Version 19 (0x13)", SegmentColor::Gray),
        HashComponent::new("Params", *cost, "Memory, Time, Parallelism", SegmentColor::Purple),
        HashComponent::new("Salt", *salt, "Base64 encoded salt", SegmentColor::Yellow),
        HashComponent::new("Hash", *digest, "Compute result", SegmentColor::Green),
    ])
}
