//! Check error types.
//!
//! These errors never escape a check's `run`; they exist so the HTTP layer
//! can report precisely what went wrong before the check folds the failure
//! into its report.

use thiserror::Error;

/// Error type for check HTTP operations.
#[derive(Debug, Error)]
pub enum CheckError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The server answered with a non-success status the check treats as
    /// fatal.
    #[error("HTTP {0}")]
    Status(u16),
}
