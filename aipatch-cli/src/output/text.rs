//! Text output formatting with colors.

use aipatch_core::{CheckReport, Severity};

use crate::report::{RunReport, RunSummary};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats a full run report.
    pub fn format_report(&self, report: &RunReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} ({} @ {})",
            self.bold(&format!("Target: {}", report.target)),
            report.provider,
            report.base_url
        ));
        lines.push(String::new());

        for entry in &report.checks {
            lines.push(self.format_check(&entry.id, &entry.report));
        }

        lines.push(self.format_summary(&report.summary));
        lines.join("\n")
    }

    /// Formats one check's result.
    pub fn format_check(&self, id: &str, report: &CheckReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "{} {:<10} {}",
            report.status.glyph(),
            id,
            self.dim(report.status.label())
        ));

        for finding in &report.findings {
            lines.push(format!(
                "   {}: {}",
                self.severity_label(finding.severity),
                finding.message
            ));
        }

        for (name, value) in &report.metrics {
            lines.push(self.dim(&format!("   {} = {}", name, value)));
        }

        lines.push(String::new());
        lines.join("\n")
    }

    /// Formats the run summary.
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        format!(
            "{} {}\n→ Next: {}",
            summary.status.glyph(),
            self.bold(&summary.status.label().to_uppercase()),
            summary.next_step
        )
    }

    /// Colors a severity label.
    fn severity_label(&self, severity: Severity) -> String {
        if !self.use_colors {
            return severity.label().to_string();
        }
        let color = match severity {
            Severity::Info => CYAN,
            Severity::Warning => YELLOW,
            Severity::Error => RED,
        };
        format!("{}{}{}", color, severity.label(), RESET)
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", BOLD, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", DIM, text, RESET)
        } else {
            text.to_string()
        }
    }
}
