//! Retries check - 429s, Retry-After, backoff signals.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use aipatch_core::{CheckReport, Finding, ProviderConfig};

use crate::check::{Check, CheckTarget};
use crate::context::CheckContext;
use crate::signal::RateLimitSignal;

use super::synthetic_body;

/// Remaining-quota count below which a warning is raised.
const REMAINING_WARN_THRESHOLD: i64 = 10;

// ============================================================================
// Retries Check
// ============================================================================

/// Probes how the provider signals rate limiting.
///
/// Sends exactly one synthetic request — no retry, no backoff. Whether the
/// endpoint answers 429, hints `retry-after`, or reports dwindling quota
/// is the measurement; retrying would contaminate it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetriesCheck;

impl RetriesCheck {
    /// Creates the check.
    pub fn new() -> Self {
        Self
    }

    /// Folds a classified signal into findings and metrics.
    fn apply_signal(signal: &RateLimitSignal, report: &mut CheckReport) {
        if let Some(retry_after) = &signal.retry_after {
            report.push_finding(Finding::info(format!(
                "Retry-After header: {}s",
                retry_after
            )));
            report.set_metric("retry_after_s", Value::String(retry_after.clone()));
        }

        if let Some(remaining) = &signal.remaining {
            report.set_metric("ratelimit_remaining", Value::String(remaining.clone()));

            if let Some(count) = signal.remaining_count() {
                if count < REMAINING_WARN_THRESHOLD {
                    report.push_finding(Finding::warning(format!(
                        "Rate limit remaining: {} requests",
                        remaining
                    )));
                }
            }
        }

        if signal.throttled {
            report.push_finding(Finding::warning("Rate limiting detected (HTTP 429)"));
        }
    }
}

#[async_trait]
impl Check for RetriesCheck {
    fn target(&self) -> CheckTarget {
        CheckTarget::Retries
    }

    async fn run(&self, config: &ProviderConfig, ctx: &CheckContext) -> CheckReport {
        let url = config.chat_completions_url();
        let body = synthetic_body(config, "Test", 10, false);

        let mut report = CheckReport::new();

        match ctx.http().post_json_with_auth(&url, &config.api_key, &body).await {
            Ok(response) => {
                // One classification step for every well-formed response,
                // whatever its status. A non-429 error status without
                // rate-limit headers therefore passes: this check reads
                // throttling signals, nothing else.
                let signal = RateLimitSignal::classify(response.status(), response.headers());
                debug!(status = %response.status(), throttled = signal.throttled, "Classified response");

                Self::apply_signal(&signal, &mut report);
                report.derive_warn_status();
            }
            Err(e) => {
                report = CheckReport::failed(format!("Retries check failed: {}", e));
            }
        }

        report
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use aipatch_core::{CheckStatus, ProviderKind, Severity};
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> ProviderConfig {
        ProviderConfig::new(
            server.uri(),
            "sk-test",
            ProviderKind::OpenAiCompatible,
            None,
        )
    }

    #[tokio::test]
    async fn test_429_with_retry_after_warns() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "5"))
            .mount(&server)
            .await;

        let report = RetriesCheck::new()
            .run(&config_for(&server), &CheckContext::new())
            .await;

        assert_eq!(report.status, CheckStatus::Warn);
        assert!(report
            .findings
            .iter()
            .any(|f| f.severity == Severity::Warning && f.message.contains("Rate limiting")));
        assert_eq!(
            report.metrics.get("retry_after_s"),
            Some(&Value::String("5".into()))
        );
    }

    #[tokio::test]
    async fn test_low_remaining_quota_warns() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).insert_header("x-ratelimit-remaining", "3"))
            .mount(&server)
            .await;

        let report = RetriesCheck::new()
            .run(&config_for(&server), &CheckContext::new())
            .await;

        assert_eq!(report.status, CheckStatus::Warn);
        let warnings: Vec<_> = report
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
            .collect();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("3 requests"));
        assert_eq!(
            report.metrics.get("ratelimit_remaining"),
            Some(&Value::String("3".into()))
        );
    }

    #[tokio::test]
    async fn test_healthy_remaining_quota_passes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).insert_header("x-ratelimit-remaining", "950"))
            .mount(&server)
            .await;

        let report = RetriesCheck::new()
            .run(&config_for(&server), &CheckContext::new())
            .await;

        assert_eq!(report.status, CheckStatus::Pass);
        assert!(report.findings.is_empty());
        assert!(report.metrics.contains_key("ratelimit_remaining"));
    }

    #[tokio::test]
    async fn test_clean_200_passes_with_empty_findings() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let report = RetriesCheck::new()
            .run(&config_for(&server), &CheckContext::new())
            .await;

        assert_eq!(report.status, CheckStatus::Pass);
        assert!(report.findings.is_empty());
        assert!(report.metrics.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_without_headers_passes() {
        // Known gap, preserved on purpose: a non-429 error status with no
        // rate-limit headers carries no throttling signal.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let report = RetriesCheck::new()
            .run(&config_for(&server), &CheckContext::new())
            .await;

        assert_eq!(report.status, CheckStatus::Pass);
        assert!(report.findings.is_empty());
    }

    #[tokio::test]
    async fn test_timeout_fails_without_raising() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .mount(&server)
            .await;

        let ctx = CheckContext::builder()
            .timeout(Duration::from_millis(200))
            .build();
        let report = RetriesCheck::new().run(&config_for(&server), &ctx).await;

        assert_eq!(report.status, CheckStatus::Fail);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].severity, Severity::Error);
        assert!(report.findings[0].message.contains("Retries check failed"));
    }

    #[tokio::test]
    async fn test_unroutable_endpoint_fails() {
        let config = ProviderConfig::new(
            "http://127.0.0.1:9",
            "sk-test",
            ProviderKind::OpenAiCompatible,
            None,
        );
        let ctx = CheckContext::builder()
            .timeout(Duration::from_millis(500))
            .build();

        let report = RetriesCheck::new().run(&config, &ctx).await;

        assert_eq!(report.status, CheckStatus::Fail);
        assert_eq!(report.findings.len(), 1);
    }
}
