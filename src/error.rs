use std::path::PathBuf;

use thiserror::Error;

/// Failures that turn into an `{"error": ...}` summary.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("An unexpected error occurred during processing: {0}")]
    Unexpected(String),
}

impl ProcessError {
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        ProcessError::Unexpected(err.to_string())
    }
}

impl From<csv::Error> for ProcessError {
    fn from(err: csv::Error) -> Self {
        ProcessError::unexpected(err)
    }
}
