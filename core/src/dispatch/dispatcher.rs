//! dispatch/dispatcher.rs
//! Routes a parameter record to its computation unit.
//!
//! Design:
//! - `compute` is an exhaustive match; it does no cryptography itself.
//! - `dispatch` is total: every failure, including a panic inside a unit,
//!   comes back as the response's `error` string.
//! - The algorithm is taken from the record's own `name` tag only.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use tracing::{debug, warn};

use crate::crypto::digest::{self, DigestAlg};
use crate::crypto::{argon2, bcrypt, block, pbkdf2, scrypt, stream, twofish, HashResult};
use crate::dispatch::types::{WorkerRequest, WorkerResponse};
use crate::params::HashingParams;
use crate::types::ComputationError;

/// Run the unit matching `params`.
pub fn compute(password: &str, params: &HashingParams) -> Result<HashResult, ComputationError> {
    match params {
        HashingParams::Bcrypt(p)    => bcrypt::hash(password, p),
        HashingParams::Argon2(p)    => argon2::hash(password, p),
        HashingParams::Pbkdf2(p)    => pbkdf2::hash(password, p),
        HashingParams::Scrypt(p)    => scrypt::hash(password, p),
        HashingParams::Md5(p)       => digest::hash(DigestAlg::Md5, password, p),
        HashingParams::Sha1(p)      => digest::hash(DigestAlg::Sha1, password, p),
        HashingParams::Sha256(p)    => digest::hash(DigestAlg::Sha256, password, p),
        HashingParams::Sha512(p)    => digest::hash(DigestAlg::Sha512, password, p),
        HashingParams::Sha3(p)      => digest::hash(DigestAlg::Keccak512, password, p),
        HashingParams::Sha3_128(p)  => digest::hash(DigestAlg::Keccak128, password, p),
        HashingParams::Ripemd160(p) => digest::hash(DigestAlg::Ripemd160, password, p),
        HashingParams::Aes(p)       => block::aes(password, p),
        HashingParams::Des(p)       => block::des(password, p),
        HashingParams::TripleDes(p) => block::triple_des(password, p),
        HashingParams::Blowfish(p)  => block::blowfish(password, p),
        HashingParams::Twofish(p)   => twofish::encrypt(password, p),
        HashingParams::Chacha20(p)  => stream::encrypt(password, p),
    }
}

/// Handle one request. Never fails; errors travel in the response.
pub fn dispatch(request: WorkerRequest) -> WorkerResponse {
    let WorkerRequest { id, password, params } = request;

    let log_id = id.clone();
    run_guarded(id, || {
        let parsed = HashingParams::from_value(&params)?;
        debug!(id = %log_id, algorithm = %parsed.algorithm(), "dispatching");
        compute(&password, &parsed)
    })
}

/// Run `work` for request `id`, turning its error or panic into a response.
fn run_guarded<F>(id: String, work: F) -> WorkerResponse
where
    F: FnOnce() -> Result<HashResult, ComputationError>,
{
    match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(Ok(result)) => {
            debug!(id = %id, time_ms = result.time_ms, "computed");
            WorkerResponse::ok(id, result)
        }
        Ok(Err(e)) => {
            warn!(id = %id, error = %e, "computation failed");
            WorkerResponse::err(id, e.to_string())
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(id = %id, error = %message, "computation panicked");
            WorkerResponse::err(id, message)
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("computation panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("computation panicked: {s}")
    } else {
        String::from("computation panicked")
    }
}

/// JSON in, JSON out.
///
/// A request that does not parse still gets a response; its `id` is
/// recovered when present, otherwise left empty.
pub fn handle_message(message: &str) -> String {
    let response = match serde_json::from_str::<WorkerRequest>(message) {
        Ok(request) => dispatch(request),
        Err(e) => {
            let id = serde_json::from_str::<Value>(message)
                .ok()
                .and_then(|v| v.get("id").and_then(Value::as_str).map(str::to_owned))
                .unwrap_or_default();
            warn!(id = %id, error = %e, "malformed request");
            WorkerResponse::err(id, format!("malformed request: {e}"))
        }
    };

    serde_json::to_string(&response).unwrap_or_else(|e| {
        serde_json::json!({ "id": response.id, "error": format!("unserialisable response: {e}") })
            .to_string()
    })
}
