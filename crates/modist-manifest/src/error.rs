//! Error types for manifest loading and storage

use crate::validation::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading or saving a manifest file
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}
