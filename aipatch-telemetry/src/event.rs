//! Telemetry event schema.

use aipatch_core::{ProviderKind, RunStatus};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::bucket::DurationBucket;

/// Event name for a doctor run.
pub const DOCTOR_RUN_EVENT: &str = "doctor_run";

// ============================================================================
// Telemetry Event
// ============================================================================

/// One anonymous telemetry event.
///
/// The schema is fixed; no field may carry free-form user content,
/// credentials, URLs, file paths, or model names. Events are constructed,
/// serialized, dispatched once, and discarded.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryEvent {
    /// Event name, always [`DOCTOR_RUN_EVENT`] for doctor runs.
    pub event: &'static str,
    /// Random per-installation identifier, persisted by `aipatch-store`.
    pub install_id: String,
    /// CLI version string.
    pub cli_version: String,
    /// Operating system name.
    pub os: &'static str,
    /// CPU architecture.
    pub arch: &'static str,
    /// Check target label (e.g. "retries", "all").
    pub target: String,
    /// Provider family, never a concrete endpoint.
    pub provider_type: ProviderKind,
    /// Aggregated run status.
    pub status: RunStatus,
    /// Coarse duration bucket.
    pub duration_bucket: DurationBucket,
    /// ISO-8601 UTC timestamp.
    pub timestamp: String,
}

impl TelemetryEvent {
    /// Builds a doctor_run event.
    ///
    /// OS name and CPU architecture come from the runtime environment;
    /// the elapsed duration is bucketed before it ever enters the event.
    pub fn doctor_run(
        install_id: impl Into<String>,
        cli_version: impl Into<String>,
        target: impl Into<String>,
        provider: ProviderKind,
        status: RunStatus,
        duration_secs: f64,
    ) -> Self {
        Self {
            event: DOCTOR_RUN_EVENT,
            install_id: install_id.into(),
            cli_version: cli_version.into(),
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            target: target.into(),
            provider_type: provider,
            status,
            duration_bucket: DurationBucket::from_secs(duration_secs),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> TelemetryEvent {
        TelemetryEvent::doctor_run(
            "11111111-2222-3333-4444-555555555555",
            "0.1.0",
            "retries",
            ProviderKind::Anthropic,
            RunStatus::Warning,
            7.3,
        )
    }

    #[test]
    fn test_schema_is_fixed() {
        let value = serde_json::to_value(sample_event()).unwrap();
        let object = value.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "arch",
                "cli_version",
                "duration_bucket",
                "event",
                "install_id",
                "os",
                "provider_type",
                "status",
                "target",
                "timestamp",
            ]
        );
    }

    #[test]
    fn test_field_values() {
        let value = serde_json::to_value(sample_event()).unwrap();
        assert_eq!(value["event"], "doctor_run");
        assert_eq!(value["provider_type"], "anthropic");
        assert_eq!(value["status"], "warning");
        assert_eq!(value["duration_bucket"], "5-10s");
    }

    #[test]
    fn test_no_sensitive_content() {
        // Everything outside install_id/cli_version/target is either a
        // closed enum or produced by the runtime; serialize and make sure
        // nothing resembling a secret or URL slipped in.
        let json = serde_json::to_string(&sample_event()).unwrap();
        assert!(!json.contains("http://"));
        assert!(!json.contains("https://"));
        assert!(!json.contains("sk-"));
        assert!(!json.contains("Bearer"));
    }

    #[test]
    fn test_timestamp_is_utc_iso8601() {
        let event = sample_event();
        assert!(event.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&event.timestamp).is_ok());
    }
}
