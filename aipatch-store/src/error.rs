//! Store error types.

use thiserror::Error;

/// Error type for configuration persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing a config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
