//! types.rs
//! Unified computation error shared by every unit and the dispatcher.
//!
//! Design notes:
//! - Units raise `ComputationError`; only the dispatcher turns it into a string.
//! - `UnknownAlgorithm` renders exactly `Unknown algorithm: <name>`, callers match on it.
//! - Messages are stable and contextual so they can be shown to users verbatim.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComputationError {
    /// A parameter violates its documented range or shape.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    /// The underlying primitive failed (bad key length, backend unavailable, ...).
    #[error("{algorithm} failure: {reason}")]
    PrimitiveFailure { algorithm: &'static str, reason: String },

    /// Identifier not recognised by the dispatcher.
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

impl ComputationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ComputationError::InvalidParameter { field, reason: reason.into() }
    }

    pub fn primitive(algorithm: &'static str, reason: impl ToString) -> Self {
        ComputationError::PrimitiveFailure { algorithm, reason: reason.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_algorithm_message_is_exact() {
        let e = ComputationError::UnknownAlgorithm("not-real".into());
        assert_eq!(e.to_string(), "Unknown algorithm: not-real");
    }

    #[test]
    fn invalid_parameter_names_the_field() {
        let e = ComputationError::invalid("cost", "must be between 4 and 31");
        assert_eq!(e.to_string(), "invalid parameter `cost`: must be between 4 and 31");
    }
}
