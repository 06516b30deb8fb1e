//! Core error types for ai-patch.

use thiserror::Error;

/// Core error type for ai-patch operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Provider not found or not recognized.
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}
