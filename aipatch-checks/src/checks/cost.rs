//! Cost check - model pricing lookup.
//!
//! Fully offline: no request is sent. The check surfaces the list price of
//! the configured model so cost spikes can be sanity-checked against it.

use async_trait::async_trait;
use serde_json::json;

use aipatch_core::{CheckReport, CheckStatus, Finding, ProviderConfig};

use crate::check::{Check, CheckTarget};
use crate::context::CheckContext;

/// USD per 1M input/output tokens, matched by model-name prefix.
///
/// Longer prefixes first so `gpt-4o-mini` does not match `gpt-4`.
const PRICING_PER_1M: &[(&str, f64, f64)] = &[
    ("gpt-4o-mini", 0.15, 0.6),
    ("gpt-4-turbo", 10.0, 30.0),
    ("gpt-4o", 2.5, 10.0),
    ("gpt-4", 30.0, 60.0),
    ("gpt-3.5-turbo", 0.5, 1.5),
];

/// Fallback pricing when the model is unknown.
const FALLBACK_PRICING: (f64, f64) = (0.5, 1.5);

// ============================================================================
// Cost Check
// ============================================================================

/// Reports list pricing for the configured model.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCheck;

impl CostCheck {
    /// Creates the check.
    pub fn new() -> Self {
        Self
    }

    /// Looks up pricing by model-name prefix.
    fn pricing_for(model: &str) -> (f64, f64) {
        PRICING_PER_1M
            .iter()
            .find(|(prefix, _, _)| model.starts_with(prefix))
            .map_or(FALLBACK_PRICING, |(_, input, output)| (*input, *output))
    }
}

#[async_trait]
impl Check for CostCheck {
    fn target(&self) -> CheckTarget {
        CheckTarget::Cost
    }

    async fn run(&self, config: &ProviderConfig, _ctx: &CheckContext) -> CheckReport {
        let model = config.model_or_default();
        let (input_price, output_price) = Self::pricing_for(model);

        let mut report = CheckReport::new();
        report.set_metric("input_price_per_1m", json!(input_price));
        report.set_metric("output_price_per_1m", json!(output_price));
        report.push_finding(Finding::info(format!(
            "Model pricing: ${}/1M input tokens, ${}/1M output tokens",
            input_price, output_price
        )));
        report.status = CheckStatus::Pass;
        report
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use aipatch_core::ProviderKind;

    #[test]
    fn test_prefix_matching_prefers_longest() {
        assert_eq!(CostCheck::pricing_for("gpt-4o-mini-2024"), (0.15, 0.6));
        assert_eq!(CostCheck::pricing_for("gpt-4o"), (2.5, 10.0));
        assert_eq!(CostCheck::pricing_for("gpt-4-turbo-preview"), (10.0, 30.0));
        assert_eq!(CostCheck::pricing_for("gpt-4-0613"), (30.0, 60.0));
    }

    #[test]
    fn test_unknown_model_falls_back() {
        assert_eq!(CostCheck::pricing_for("claude-3-5-sonnet"), FALLBACK_PRICING);
    }

    #[tokio::test]
    async fn test_always_passes_with_pricing_metrics() {
        let config = ProviderConfig::new(
            "https://api.openai.com",
            "sk-test",
            ProviderKind::OpenAiCompatible,
            Some("gpt-4o".to_string()),
        );

        let report = CostCheck::new().run(&config, &CheckContext::new()).await;

        assert_eq!(report.status, CheckStatus::Pass);
        assert_eq!(report.metrics["input_price_per_1m"], json!(2.5));
        assert_eq!(report.metrics["output_price_per_1m"], json!(10.0));
        assert_eq!(report.findings.len(), 1);
        assert!(report.findings[0].message.contains("Model pricing"));
    }
}
