//! telemetry/counters.rs
//! Request counters kept by the worker thread.
//!
//! Summary: Plain integers owned by one thread, returned on shutdown.

use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerCounters {
    pub requests: u64,
    pub succeeded: u64,
    pub failed: u64,
}

impl WorkerCounters {
    /// Record one answered request.
    pub fn record(&mut self, ok: bool) {
        self.requests += 1;
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn merge(&mut self, other: &WorkerCounters) {
        self.requests += other.requests;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}

impl AddAssign for WorkerCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
