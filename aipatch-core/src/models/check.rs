//! Check result types.
//!
//! This module contains the types every diagnostic check produces:
//! - [`Severity`] - Finding severity levels
//! - [`Finding`] - One observation made during a check
//! - [`CheckStatus`] - Per-check verdict
//! - [`RunStatus`] - Aggregated verdict across a whole run
//! - [`CheckReport`] - Findings plus metrics plus status

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Severity
// ============================================================================

/// Severity of a single finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational observation.
    Info,
    /// Something worth fixing but the check still completed.
    Warning,
    /// The check could not complete or observed a hard failure.
    Error,
}

impl Severity {
    /// Returns an uppercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }

    /// Returns true for warning or error severity.
    pub fn is_actionable(&self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Finding
// ============================================================================

/// One observation made during a check run.
///
/// Findings are appended in detection order; the order is preserved in
/// reports but carries no semantic weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// How serious the observation is.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    /// Creates an info finding.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Creates a warning finding.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Creates an error finding.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

// ============================================================================
// Check Status
// ============================================================================

/// Verdict of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// No issues detected.
    #[default]
    Pass,
    /// The check completed but flagged something.
    Warn,
    /// The check could not complete.
    Fail,
    /// The check did not run.
    Skipped,
}

impl CheckStatus {
    /// Returns a lowercase label matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Warn => "warn",
            Self::Fail => "fail",
            Self::Skipped => "skipped",
        }
    }

    /// Returns a status glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Pass => "✅",
            Self::Warn => "⚠️",
            Self::Fail => "❌",
            Self::Skipped => "•",
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Run Status
// ============================================================================

/// Aggregated verdict across every check of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// All checks passed.
    #[default]
    Success,
    /// At least one check warned.
    Warning,
    /// At least one check failed.
    Error,
}

impl RunStatus {
    /// Aggregates per-check statuses: any fail wins over any warn wins
    /// over success. Skipped checks are neutral.
    pub fn from_checks<'a>(statuses: impl IntoIterator<Item = &'a CheckStatus>) -> Self {
        let mut result = Self::Success;
        for status in statuses {
            match status {
                CheckStatus::Fail => return Self::Error,
                CheckStatus::Warn => result = Self::Warning,
                CheckStatus::Pass | CheckStatus::Skipped => {}
            }
        }
        result
    }

    /// Returns a lowercase label matching the serialized form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// Returns a status glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Warning => "⚠️",
            Self::Error => "❌",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Check Report
// ============================================================================

/// Result of one diagnostic check.
///
/// Checks never return errors; transport failures collapse into a report
/// with [`CheckStatus::Fail`] and a single error finding.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckReport {
    /// Overall verdict.
    pub status: CheckStatus,
    /// Observations in detection order.
    pub findings: Vec<Finding>,
    /// Raw measurements keyed by metric name.
    ///
    /// Values are stored verbatim; in particular `retry_after_s` stays a
    /// string because providers send both integer-seconds and HTTP-date
    /// forms.
    pub metrics: BTreeMap<String, serde_json::Value>,
}

impl CheckReport {
    /// Creates an empty passing report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a failed report carrying a single error finding.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: CheckStatus::Fail,
            findings: vec![Finding::error(message)],
            metrics: BTreeMap::new(),
        }
    }

    /// Appends a finding.
    pub fn push_finding(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Records a metric value.
    pub fn set_metric(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.metrics.insert(name.into(), value);
    }

    /// Derives `warn`/`pass` from the collected findings.
    ///
    /// Used by checks that completed: any warning or error finding makes
    /// the verdict `warn`, otherwise `pass`.
    pub fn derive_warn_status(&mut self) {
        self.status = if self.findings.iter().any(|f| f.severity.is_actionable()) {
            CheckStatus::Warn
        } else {
            CheckStatus::Pass
        };
    }

    /// Returns true if any finding has the given severity.
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.findings.iter().any(|f| f.severity == severity)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Info.label(), "INFO");
        assert_eq!(Severity::Error.label(), "ERROR");
        assert!(!Severity::Info.is_actionable());
        assert!(Severity::Warning.is_actionable());
    }

    #[test]
    fn test_check_status_serialization() {
        assert_eq!(
            serde_json::to_string(&CheckStatus::Pass).unwrap(),
            "\"pass\""
        );
        assert_eq!(
            serde_json::to_string(&CheckStatus::Skipped).unwrap(),
            "\"skipped\""
        );
    }

    #[test]
    fn test_run_status_aggregation() {
        use CheckStatus::{Fail, Pass, Skipped, Warn};

        let none: [CheckStatus; 0] = [];
        assert_eq!(RunStatus::from_checks(none.iter()), RunStatus::Success);
        assert_eq!(
            RunStatus::from_checks([Pass, Skipped].iter()),
            RunStatus::Success
        );
        assert_eq!(
            RunStatus::from_checks([Pass, Warn].iter()),
            RunStatus::Warning
        );
        assert_eq!(
            RunStatus::from_checks([Warn, Fail, Pass].iter()),
            RunStatus::Error
        );
    }

    #[test]
    fn test_derive_warn_status() {
        let mut report = CheckReport::new();
        report.push_finding(Finding::info("headers look fine"));
        report.derive_warn_status();
        assert_eq!(report.status, CheckStatus::Pass);

        report.push_finding(Finding::warning("running low"));
        report.derive_warn_status();
        assert_eq!(report.status, CheckStatus::Warn);
    }

    #[test]
    fn test_failed_report_shape() {
        let report = CheckReport::failed("boom");
        assert_eq!(report.status, CheckStatus::Fail);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Error);
    }

    #[test]
    fn test_metrics_keep_strings_verbatim() {
        let mut report = CheckReport::new();
        report.set_metric("retry_after_s", serde_json::Value::String("5".into()));
        assert_eq!(
            report.metrics.get("retry_after_s"),
            Some(&serde_json::Value::String("5".into()))
        );
    }
}
