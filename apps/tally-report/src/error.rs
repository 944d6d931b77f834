//! Error types for the report CLI.

use std::path::PathBuf;

use tally_core::ReportError;

use crate::config::ConfigError;

/// Anything that makes the CLI exit non-zero.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output error: {0}")]
    Stdout(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
