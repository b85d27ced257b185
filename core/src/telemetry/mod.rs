//! telemetry/mod.rs
//! Stage timers and worker counters.
//!
//! Notes:
//! - `TelemetryTimer` measures the compute window reported as `timeMs`.
//! - One-time costs (argon2 backend load) go under `Stage::Load` and are logged, not reported.
//! - Counters are owned by the worker thread and merged on shutdown, no atomics.

pub mod counters;
pub mod timers;

pub use counters::*;
pub use timers::*;
