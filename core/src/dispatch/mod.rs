//! dispatch/mod.rs
//! Request/response shapes, the dispatcher, algorithm metadata and the worker.
//!
//! Flow:
//! - Host builds a `WorkerRequest` (id, input, loosely-typed params)
//! - `HashWorker` carries it to a dedicated thread
//! - `dispatch` parses params, runs the unit, wraps the outcome
//! - `WorkerResponse` carries exactly one of result / error back

pub mod types;
pub mod dispatcher;
pub mod registry;
pub mod worker;

pub use types::{WorkerRequest, WorkerResponse};
pub use dispatcher::{compute, dispatch, handle_message};
pub use registry::{catalog, resolve, resolve_name, AlgorithmInfo};
pub use worker::{HashWorker, WorkerConfig, WorkerError};
