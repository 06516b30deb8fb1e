// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # AI Patch Store
//!
//! Configuration for the ai-patch CLI:
//!
//! - [`detect`] - resolves a [`aipatch_core::ProviderConfig`] from
//!   environment variables (per-provider endpoints, gateway overrides,
//!   the shared `MODEL` override)
//! - [`config`] - the saved configuration file (telemetry opt-out, the
//!   persisted install id)
//! - [`persistence`] - secure JSON file helpers and default paths

pub mod config;
pub mod detect;
pub mod error;
pub mod persistence;

pub use config::{get_or_create_install_id, SavedConfig};
pub use detect::resolve;
pub use error::StoreError;
pub use persistence::{default_config_dir, default_config_path};
