//! Error types for canonicalization

use thiserror::Error;

/// Errors that can occur during canonicalization or hashing
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalError {
    #[error("Non-integer numbers are not allowed in canonical JSON. Use strings instead (e.g., \"0.7\" instead of 0.7)")]
    UnsupportedNumber,

    #[error("JSON serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for CanonicalError {
    fn from(err: serde_json::Error) -> Self {
        CanonicalError::SerializationError(err.to_string())
    }
}
