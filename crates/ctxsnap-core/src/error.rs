//! Core error types.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur while building a snapshot.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The project root does not exist or is not a directory.
    #[error("Project root is not a directory: {0}")]
    InvalidRoot(PathBuf),

    /// The project config file could not be parsed.
    #[error("Invalid config file {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Create an invalid root error.
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot(path.into())
    }

    /// Create an invalid config error.
    pub fn invalid_config(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            source,
        }
    }
}
