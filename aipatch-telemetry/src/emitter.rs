//! Fire-and-forget event dispatch.

use reqwest::header::USER_AGENT;
use std::time::Duration;

use crate::event::TelemetryEvent;

/// Default telemetry ingestion endpoint.
const DEFAULT_ENDPOINT: &str = "https://telemetry.aibadgr.com/v1/telemetry/events";

/// Hard timeout for a single dispatch.
const DEFAULT_TIMEOUT_SECS: u64 = 2;

// ============================================================================
// Telemetry Config
// ============================================================================

/// Dispatch configuration.
///
/// Injected rather than read from module globals so tests can point the
/// client at a local server.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Ingestion endpoint URL.
    pub endpoint: String,
    /// Hard timeout applied inside the detached dispatch task.
    pub timeout: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// ============================================================================
// Telemetry Client
// ============================================================================

/// Dispatches telemetry events without ever blocking the caller.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    config: TelemetryConfig,
    http: reqwest::Client,
}

impl TelemetryClient {
    /// Creates a client with the given configuration.
    ///
    /// Falls back to an unconfigured client if the builder fails; emission
    /// is best-effort either way.
    pub fn new(config: TelemetryConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { config, http }
    }

    /// Sends one event, fire-and-forget.
    ///
    /// Returns immediately. Dispatch runs on a detached task bounded by the
    /// configured timeout; any failure (DNS, connection, timeout, non-2xx,
    /// serialization) is discarded without logging. The detached task does
    /// not keep the process alive — an exit before completion is an
    /// accepted loss.
    pub fn emit(&self, event: TelemetryEvent) {
        // Outside a runtime there is nowhere to dispatch from; emit still
        // must not fail, so the event is dropped.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };

        let http = self.http.clone();
        let endpoint = self.config.endpoint.clone();
        let user_agent = format!("ai-patch-cli/{}", event.cli_version);

        handle.spawn(async move {
            let _ = http
                .post(&endpoint)
                .header(USER_AGENT, user_agent)
                .json(&event)
                .send()
                .await;
        });
    }
}

impl Default for TelemetryClient {
    fn default() -> Self {
        Self::new(TelemetryConfig::default())
    }
}

// ============================================================================
// Tests
// ============================================================================
