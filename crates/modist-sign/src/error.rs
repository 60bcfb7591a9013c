//! Error types for signing and verification

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    /// Operator setup error: key generation has not been run yet
    #[error("No private key at {0}. Run keygen first")]
    MissingPrivateKey(PathBuf),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Manifest is not signed")]
    Unsigned,

    #[error("Unknown key_id '{0}': not among the trusted keys")]
    UnknownKeyId(String),

    #[error("Invalid signature encoding: {0}")]
    InvalidSignature(String),

    #[error("Signature verification failed")]
    BadSignature,

    #[error("Canonicalization error: {0}")]
    Canonical(#[from] modist_canonical::CanonicalError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
