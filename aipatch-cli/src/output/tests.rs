//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::TextFormatter;
    use crate::report::RunReport;
    use aipatch_checks::CheckOutcome;
    use aipatch_core::{CheckReport, CheckStatus, Finding, ProviderKind};
    use serde_json::Value;

    fn warned_outcome() -> CheckOutcome {
        let mut report = CheckReport::new();
        report.push_finding(Finding::warning("Rate limiting detected (HTTP 429)"));
        report.set_metric("retry_after_s", Value::String("5".into()));
        report.derive_warn_status();
        CheckOutcome {
            id: "retries",
            report,
        }
    }

    fn sample_report() -> RunReport {
        RunReport::build(
            "retries",
            ProviderKind::OpenAiCompatible,
            "https://api.openai.com",
            vec![warned_outcome()],
            0.42,
        )
    }

    #[test]
    fn test_check_shows_status_and_findings() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_check("retries", &warned_outcome().report);

        assert!(output.contains("retries"));
        assert!(output.contains("warn"));
        assert!(output.contains("WARNING: Rate limiting detected (HTTP 429)"));
        assert!(output.contains("retry_after_s = \"5\""));
    }

    #[test]
    fn test_plain_output_has_no_ansi() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_report(&sample_report());
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_colored_output_marks_warnings() {
        let formatter = TextFormatter::new(true);
        let output = formatter.format_report(&sample_report());
        assert!(output.contains("\x1b[33m"), "warnings should be yellow");
    }

    #[test]
    fn test_report_includes_summary_and_next_step() {
        let formatter = TextFormatter::new(false);
        let output = formatter.format_report(&sample_report());

        assert!(output.contains("WARNING"));
        assert!(output.contains("→ Next:"));
    }

    #[test]
    fn test_passing_check_has_no_finding_lines() {
        let formatter = TextFormatter::new(false);
        let mut report = CheckReport::new();
        report.status = CheckStatus::Pass;

        let output = formatter.format_check("cost", &report);
        assert!(output.contains("cost"));
        assert!(!output.contains("WARNING"));
        assert!(!output.contains("ERROR"));
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use serde_json::json;

    #[test]
    fn test_compact_output() {
        let formatter = JsonFormatter::new(false);
        let output = formatter.format(&json!({"status": "pass"})).unwrap();
        assert_eq!(output, r#"{"status":"pass"}"#);
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let formatter = JsonFormatter::new(true);
        let output = formatter.format(&json!({"status": "pass"})).unwrap();
        assert!(output.contains('\n'));
    }
}
