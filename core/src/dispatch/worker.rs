//! dispatch/worker.rs
//! Dedicated worker thread behind a pair of crossbeam channels.
//!
//! Design:
//! - One OS thread, requests served strictly in order, one in flight.
//! - Bounded request queue (`queue_depth`), unbounded response channel.
//! - `terminate` drops both ends and detaches: coarse cancellation, results lost.
//! - `shutdown` closes the queue and joins, returning the thread's counters.
//! - A dead thread surfaces as `WorkerError::Disconnected`, never as a
//!   computation error.

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::dispatch::dispatcher::dispatch;
use crate::dispatch::types::{WorkerRequest, WorkerResponse};
use crate::telemetry::WorkerCounters;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
    #[error("worker disconnected")]
    Disconnected,
    #[error("timed out waiting for worker")]
    Timeout,
    #[error("worker thread panicked")]
    Panicked,
}

/// Worker thread settings. Loadable from JSON; missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkerConfig {
    /// Requests that may wait while one is being computed (min 1).
    pub queue_depth: usize,
    pub thread_name: String,
    pub stack_size: Option<usize>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue_depth: 1,
            thread_name: String::from("hashlab-worker"),
            stack_size: None,
        }
    }
}

impl WorkerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_queue_depth(mut self, depth: usize) -> Self {
        self.queue_depth = depth;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

pub struct HashWorker {
    tx: Sender<WorkerRequest>,
    rx: Receiver<WorkerResponse>,
    handle: JoinHandle<WorkerCounters>,
}

impl HashWorker {
    pub fn spawn(config: WorkerConfig) -> Result<Self, WorkerError> {
        let (req_tx, req_rx) = channel::bounded::<WorkerRequest>(config.queue_depth.max(1));
        let (resp_tx, resp_rx) = channel::unbounded::<WorkerResponse>();

        let mut builder = thread::Builder::new().name(config.thread_name.clone());
        if let Some(bytes) = config.stack_size {
            builder = builder.stack_size(bytes);
        }
        let handle = builder.spawn(move || run(req_rx, resp_tx))?;

        info!(thread = %config.thread_name, queue_depth = config.queue_depth.max(1), "worker spawned");
        Ok(Self { tx: req_tx, rx: resp_rx, handle })
    }

    /// Queue a request; blocks while the queue is full.
    pub fn post(&self, request: WorkerRequest) -> Result<(), WorkerError> {
        self.tx.send(request).map_err(|_| WorkerError::Disconnected)
    }

    pub fn recv(&self) -> Result<WorkerResponse, WorkerError> {
        self.rx.recv().map_err(|_| WorkerError::Disconnected)
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<WorkerResponse, WorkerError> {
        self.rx.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => WorkerError::Timeout,
            RecvTimeoutError::Disconnected => WorkerError::Disconnected,
        })
    }

    /// Post and wait for the response carrying the same id.
    ///
    /// Responses to earlier requests that arrive first are dropped.
    pub fn request(&self, request: WorkerRequest) -> Result<WorkerResponse, WorkerError> {
        let id = request.id.clone();
        self.post(request)?;
        loop {
            let response = self.recv()?;
            if response.id == id {
                return Ok(response);
            }
            debug!(expected = %id, got = %response.id, "dropping stale response");
        }
    }

    /// Drop both channel ends and detach the thread.
    ///
    /// An in-flight computation runs to completion on its own, and its
    /// result is discarded.
    pub fn terminate(self) {
        let HashWorker { tx, rx, handle } = self;
        drop(tx);
        drop(rx);
        drop(handle);
        info!("worker terminated");
    }

    /// Close the queue, wait for queued work to finish, return counters.
    pub fn shutdown(self) -> Result<WorkerCounters, WorkerError> {
        let HashWorker { tx, rx, handle } = self;
        drop(tx);
        let counters = handle.join().map_err(|_| WorkerError::Panicked)?;
        drop(rx);
        Ok(counters)
    }
}

fn run(rx: Receiver<WorkerRequest>, tx: Sender<WorkerResponse>) -> WorkerCounters {
    let mut counters = WorkerCounters::default();
    info!("worker started");

    while let Ok(request) = rx.recv() {
        let response = dispatch(request);
        counters.record(response.is_ok());
        if tx.send(response).is_err() {
            break;
        }
    }

    info!(
        requests = counters.requests,
        succeeded = counters.succeeded,
        failed = counters.failed,
        "worker stopped"
    );
    counters
}
