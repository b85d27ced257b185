//! crypto/mod.rs
//! Per-algorithm computation units.
//!
//! Contract (every unit):
//! - `fn(password: &str, params: &Record) -> Result<HashResult, ComputationError>`
//! - validate params, draw fresh randomness, time the compute window
//! - build the breakdown from the unit's own output grammar
//!
//! There is no shared output parser; each encoding is owned by its unit.

pub mod types;
pub mod bcrypt;
pub mod argon2;
pub mod pbkdf2;
pub mod scrypt;
pub mod digest;
pub mod evp;
pub mod block;
pub mod twofish;
pub mod stream;

pub use types::*;

use tracing::trace;

use crate::telemetry::{Stage, TelemetryTimer};

/// Close the compute window and return it in milliseconds.
pub(crate) fn close_window(timer: &mut TelemetryTimer, algorithm: &'static str) -> f64 {
    timer.finish();
    let elapsed = timer.elapsed_ms();
    trace!(
        algorithm,
        elapsed_ms = elapsed,
        salt_ms = timer.stage_times.get_ms(Stage::Salt),
        compute_ms = timer.stage_times.get_ms(Stage::Compute),
        "unit finished"
    );
    elapsed
}
