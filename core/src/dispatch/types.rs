//! dispatch/types.rs
//! Messages exchanged across the worker boundary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::crypto::HashResult;
use crate::params::HashingParams;

/// One computation request.
///
/// `params` stays loosely typed until the dispatcher parses it, so an
/// unrecognised algorithm name can still be answered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub id: String,
    pub password: String,
    pub params: Value,
}

impl WorkerRequest {
    pub fn new(id: impl Into<String>, password: impl Into<String>, params: Value) -> Self {
        Self { id: id.into(), password: password.into(), params }
    }

    /// Build a request from a typed record.
    pub fn from_params(
        id: impl Into<String>,
        password: impl Into<String>,
        params: &HashingParams,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(id, password, serde_json::to_value(params)?))
    }
}

/// Answer to one request. Exactly one of `result` / `error` is set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<HashResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorkerResponse {
    pub fn ok(id: impl Into<String>, result: HashResult) -> Self {
        Self { id: id.into(), result: Some(result), error: None }
    }

    pub fn err(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { id: id.into(), result: None, error: Some(message.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_some()
    }

    pub fn into_result(self) -> Result<HashResult, String> {
        match (self.result, self.error) {
            (Some(r), _) => Ok(r),
            (None, Some(e)) => Err(e),
            (None, None) => Err(String::from("empty response")),
        }
    }
}
