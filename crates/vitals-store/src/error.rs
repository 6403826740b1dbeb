//! Error types for vitals-store.

use std::path::PathBuf;

use crate::config::ConfigError;

/// Result type for vitals-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vitals-store.
///
/// A missing, empty, or unparseable data file is not an error: the store
/// treats all three as an empty table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to create the data directory.
    #[error("Failed to create data directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV encoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
