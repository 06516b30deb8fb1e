// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # AI Patch Telemetry
//!
//! Anonymous, best-effort usage telemetry for the ai-patch CLI.
//!
//! Purpose: help maintainers understand which AI issues users are facing.
//! Privacy: no user identification, tracking, or sensitive data collection.
//!
//! Collected data:
//! - install id (random UUID, generated once, persisted by `aipatch-store`)
//! - CLI version
//! - OS and CPU architecture
//! - check target, provider family, run status, duration bucket, timestamp
//!
//! Strictly forbidden in any event field:
//! - Prompts, payloads, request bodies
//! - API keys, base URLs, file paths
//! - Repo names, model names
//! - Any user or company identifiers
//!
//! Delivery is fire-and-forget: [`TelemetryClient::emit`] returns
//! immediately, dispatch runs on a detached task with a hard timeout, and
//! every failure is silently discarded. Telemetry can never change the
//! CLI's output, timing, or exit code.

pub mod bucket;
pub mod emitter;
pub mod event;
pub mod gate;

pub use bucket::DurationBucket;
pub use emitter::{TelemetryClient, TelemetryConfig};
pub use event::TelemetryEvent;
pub use gate::{is_enabled, TELEMETRY_ENV};
