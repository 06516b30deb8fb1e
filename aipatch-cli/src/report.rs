//! Run reports.
//!
//! Every doctor run produces a [`RunReport`] that is displayed, and unless
//! suppressed, written to `ai-patch-reports/<timestamp>/` as both
//! `report.json` and `report.md`. Reports are local files and may name the
//! probed endpoint; telemetry never does.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use aipatch_core::{CheckReport, ProviderKind, RunStatus};
use aipatch_checks::CheckOutcome;

/// Directory (relative to the working directory) where reports land.
pub const REPORTS_DIR: &str = "ai-patch-reports";

// ============================================================================
// Run Report
// ============================================================================

/// Aggregated result of one doctor run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// What was diagnosed ("all" or a single target name).
    pub target: String,
    /// Provider family probed.
    pub provider: ProviderKind,
    /// Endpoint base URL (local report only, never telemetered).
    pub base_url: String,
    /// When the run happened, ISO-8601 UTC.
    pub timestamp: String,
    /// Wall-clock duration in seconds.
    pub duration_s: f64,
    /// Per-check results in execution order.
    pub checks: Vec<CheckEntry>,
    /// Aggregated verdict.
    pub summary: RunSummary,
}

/// One check's result inside a report.
#[derive(Debug, Clone, Serialize)]
pub struct CheckEntry {
    /// Check id (target name).
    pub id: String,
    /// The check's report.
    #[serde(flatten)]
    pub report: CheckReport,
}

/// Aggregated verdict plus a suggested next step.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Aggregated status across all checks.
    pub status: RunStatus,
    /// Human-readable suggestion for what to do next.
    pub next_step: String,
}

impl RunReport {
    /// Builds a report from check outcomes.
    pub fn build(
        target: impl Into<String>,
        provider: ProviderKind,
        base_url: impl Into<String>,
        outcomes: Vec<CheckOutcome>,
        duration_s: f64,
    ) -> Self {
        let status = RunStatus::from_checks(outcomes.iter().map(|o| &o.report.status));

        let checks = outcomes
            .into_iter()
            .map(|o| CheckEntry {
                id: o.id.to_string(),
                report: o.report,
            })
            .collect();

        Self {
            target: target.into(),
            provider,
            base_url: base_url.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            duration_s: (duration_s * 100.0).round() / 100.0,
            checks,
            summary: RunSummary {
                status,
                next_step: next_step_for(status).to_string(),
            },
        }
    }

    /// Writes `report.json` and `report.md` under a timestamped directory.
    ///
    /// Returns the directory the report was written to.
    pub fn save(&self, root: &Path) -> Result<PathBuf> {
        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let dir = root.join(REPORTS_DIR).join(stamp);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating report directory {}", dir.display()))?;

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(dir.join("report.json"), json)?;
        std::fs::write(dir.join("report.md"), self.to_markdown())?;

        Ok(dir)
    }

    /// Renders the report as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# AI Patch Report\n\n");
        md.push_str(&format!("- **Target**: {}\n", self.target));
        md.push_str(&format!("- **Provider**: {}\n", self.provider));
        md.push_str(&format!("- **Endpoint**: {}\n", self.base_url));
        md.push_str(&format!("- **Generated**: {}\n", self.timestamp));
        md.push_str(&format!("- **Duration**: {}s\n", self.duration_s));
        md.push_str(&format!("- **Status**: {}\n", self.summary.status));

        md.push_str("\n## Checks\n");
        for entry in &self.checks {
            md.push_str(&format!("\n### {} — {}\n\n", entry.id, entry.report.status));

            if entry.report.findings.is_empty() {
                md.push_str("No findings.\n");
            } else {
                for finding in &entry.report.findings {
                    md.push_str(&format!(
                        "- **{}**: {}\n",
                        finding.severity, finding.message
                    ));
                }
            }

            if !entry.report.metrics.is_empty() {
                md.push_str("\nMetrics:\n\n");
                for (name, value) in &entry.report.metrics {
                    md.push_str(&format!("- `{}` = {}\n", name, value));
                }
            }
        }

        md.push_str(&format!("\n## Next step\n\n{}\n", self.summary.next_step));
        md.push_str("\nGenerated by AI Patch — re-run: ai-patch doctor\n");

        md
    }
}

/// Suggested next step per aggregated status.
fn next_step_for(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Success => "No issues detected. Re-run before your next deploy.",
        RunStatus::Warning => {
            "Review the warnings above and re-run 'ai-patch doctor' after changes."
        }
        RunStatus::Error => "Fix the failing checks above, then re-run 'ai-patch doctor'.",
    }
}

// ============================================================================
// Tests
// ============================================================================
