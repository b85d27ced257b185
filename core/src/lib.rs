//! hashlab-core
//!
//! Pure Rust KDF / digest / cipher playground engine.
//! Validates a parameter record, runs the matching algorithm, times it and
//! returns the encoded output together with a labeled breakdown.
//! No UI, no transport, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod utils;

// Parameter model and computation units
pub mod params;
pub mod crypto;
pub mod telemetry;

// Routing and the isolation boundary
pub mod dispatch;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::crypto::{HashComponent, HashResult, SegmentColor};
    pub use crate::dispatch::{
        compute, dispatch, handle_message, HashWorker, WorkerConfig, WorkerError, WorkerRequest,
        WorkerResponse,
    };
    pub use crate::params::{AlgorithmId, Family, HashingParams};
    pub use crate::types::ComputationError;
}
