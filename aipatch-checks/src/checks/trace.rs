//! Trace check - request IDs and duplicate detection.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use ring::digest::{digest, SHA256};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use aipatch_core::{CheckReport, CheckStatus, Finding, ProviderConfig};

use crate::check::{Check, CheckTarget};
use crate::context::CheckContext;
use crate::error::CheckError;

use super::synthetic_body;

/// Header used to correlate the outgoing request.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Response headers that may carry a provider-side request id, in lookup
/// order.
const PROVIDER_ID_HEADERS: &[&str] = &["x-request-id", "openai-request-id", "cf-ray"];

/// Hex characters kept from the request hash.
const REQUEST_HASH_LEN: usize = 16;

// ============================================================================
// Trace Check
// ============================================================================

/// Checks whether requests can be correlated across the provider boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceCheck;

impl TraceCheck {
    /// Creates the check.
    pub fn new() -> Self {
        Self
    }

    /// Truncated SHA-256 of the serialized payload, for duplicate
    /// detection.
    fn request_hash(body: &Value) -> String {
        let serialized = body.to_string();
        let hash = digest(&SHA256, serialized.as_bytes());

        let mut hex = String::with_capacity(REQUEST_HASH_LEN);
        for byte in hash.as_ref() {
            if hex.len() >= REQUEST_HASH_LEN {
                break;
            }
            hex.push_str(&format!("{:02x}", byte));
        }
        hex.truncate(REQUEST_HASH_LEN);
        hex
    }

    /// First provider request id found in the response headers.
    fn provider_request_id(headers: &HeaderMap) -> Option<String> {
        PROVIDER_ID_HEADERS.iter().find_map(|name| {
            headers
                .get(*name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        })
    }
}

#[async_trait]
impl Check for TraceCheck {
    fn target(&self) -> CheckTarget {
        CheckTarget::Trace
    }

    async fn run(&self, config: &ProviderConfig, ctx: &CheckContext) -> CheckReport {
        let url = config.chat_completions_url();
        let body = synthetic_body(config, "Test", 10, false);

        let request_id = Uuid::new_v4().to_string();
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(REQUEST_ID_HEADER, value);
        }

        let outcome: Result<HeaderMap, CheckError> = async {
            let response = ctx
                .http()
                .post_json_with_headers(&url, &config.api_key, headers, &body)
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CheckError::Status(status.as_u16()));
            }

            Ok(response.headers().clone())
        }
        .await;

        let response_headers = match outcome {
            Ok(headers) => headers,
            Err(e) => return CheckReport::failed(format!("Trace check failed: {}", e)),
        };

        let mut report = CheckReport::new();

        match Self::provider_request_id(&response_headers) {
            Some(provider_id) => {
                debug!(provider_id = %provider_id, "Provider request id present");
                report.push_finding(Finding::info(format!(
                    "Provider request ID found: {}",
                    provider_id
                )));
                report.set_metric("provider_request_id", Value::String(provider_id));
            }
            None => {
                report.push_finding(Finding::warning(
                    "No provider request ID found in response headers",
                ));
            }
        }

        let request_hash = Self::request_hash(&body);
        report.set_metric("request_hash", Value::String(request_hash.clone()));
        report.push_finding(Finding::info(format!(
            "Generated request hash: {} (for duplicate detection)",
            request_hash
        )));

        report.push_finding(Finding::info(
            "Always include X-Request-ID header for request correlation",
        ));
        report.push_finding(Finding::info(
            "Log request hashes to detect duplicate API calls",
        ));
        report.push_finding(Finding::info(
            "Capture provider request IDs from response headers for support tickets",
        ));

        // A missing provider id is advice, not a defect in the endpoint.
        report.status = CheckStatus::Pass;
        report
    }
}

// ============================================================================
// Tests
// ============================================================================
