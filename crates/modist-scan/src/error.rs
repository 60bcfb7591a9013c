//! Error types for directory scanning

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning the models directory
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Models path is not a directory: {0}")]
    NotADirectory(PathBuf),
}
