//! Notebook reading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a notebook document
#[derive(Debug, Error)]
pub enum NotebookError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Notebook is not valid JSON or does not match the nbformat schema")]
    Json(#[from] serde_json::Error),

    #[error("Notebook format version {found} is not supported (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}
