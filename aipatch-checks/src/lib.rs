// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # AI Patch Checks
//!
//! The diagnostic checks the `ai-patch doctor` runs against a provider
//! endpoint, plus the HTTP plumbing they share.
//!
//! ## Checks
//!
//! Each check issues at most one synthetic chat-completion request and
//! reports what it observed:
//!
//! - [`checks::RetriesCheck`] - rate-limit signaling (429, `retry-after`,
//!   remaining quota). Deliberately sends exactly one request with no
//!   retry: the absence of retry behavior is the probe's subject matter.
//! - [`checks::StreamingCheck`] - SSE stalls, TTFB, inter-chunk gaps
//! - [`checks::CostCheck`] - offline model pricing lookup
//! - [`checks::TraceCheck`] - request-id propagation and correlation
//!
//! Checks never return errors. Transport failures collapse into a
//! [`aipatch_core::CheckReport`] with `fail` status and one error finding;
//! rate limiting is always a `warn`, never a `fail` — it is an expected
//! condition, not an exceptional one.
//!
//! ## Infrastructure
//!
//! - [`client::HttpClient`] - reqwest wrapper with URL validation
//! - [`context::CheckContext`] - shared client and timeouts, built once per run
//! - [`check::Check`] - the trait every check implements
//! - [`runner::CheckRunner`] - executes a target's checks in order

pub mod check;
pub mod checks;
pub mod client;
pub mod context;
pub mod error;
pub mod runner;
pub mod signal;

// Re-export key types at crate root

pub use check::{Check, CheckTarget};
pub use checks::{CostCheck, RetriesCheck, StreamingCheck, TraceCheck};
pub use client::HttpClient;
pub use context::{CheckContext, CheckContextBuilder};
pub use error::CheckError;
pub use runner::{CheckOutcome, CheckRunner};
pub use signal::RateLimitSignal;
