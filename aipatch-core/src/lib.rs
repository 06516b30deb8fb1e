// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # AI Patch Core
//!
//! Core types and models for the ai-patch diagnostic CLI.
//!
//! This crate provides the foundational abstractions used across all other
//! ai-patch crates, including:
//!
//! - Provider identification and resolved endpoint configuration
//! - Check result types (findings, metrics, statuses)
//! - Error types
//!
//! ## Key Types
//!
//! ### Provider Types
//! - [`ProviderKind`] - Enum of supported provider API families
//! - [`ProviderConfig`] - Resolved endpoint configuration for one run
//!
//! ### Check Types
//! - [`CheckReport`] - Result of a single diagnostic check
//! - [`Finding`] - One observation made during a check
//! - [`Severity`] - Finding severity levels
//! - [`CheckStatus`] - Per-check verdict
//! - [`RunStatus`] - Aggregated verdict across all checks of a run

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Check types
    CheckReport,
    CheckStatus,
    Finding,
    RunStatus,
    Severity,
    // Provider types
    ProviderConfig,
    ProviderKind,
};
