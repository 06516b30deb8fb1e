//! HTTP client wrapper shared by all checks.

use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use crate::error::CheckError;

/// Default request timeout for probe traffic.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent string for probe requests.
const USER_AGENT: &str = concat!("ai-patch/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing and URL validation.
///
/// Intentionally retry-free: the checks measure what a single request
/// observes, and a transparent retry layer would distort exactly the
/// signals being probed.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client with the default probe timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This should only occur
    /// if the system's TLS/SSL configuration is fundamentally broken,
    /// making network operations impossible. This is considered
    /// unrecoverable at runtime.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                panic!(
                    "Failed to create HTTP client: {}. \
                    This usually indicates a broken TLS/SSL configuration.",
                    e
                )
            });

        Self { inner: client }
    }

    /// Rejects URLs that do not parse before a request is attempted.
    fn validate_url(url: &str) -> Result<(), CheckError> {
        Url::parse(url).map_err(|e| CheckError::InvalidUrl(e.to_string()))?;
        Ok(())
    }

    /// Performs a POST with a JSON body and bearer authorization.
    ///
    /// Returns the response for any HTTP status; callers decide whether a
    /// non-success status is fatal.
    #[instrument(skip(self, api_key, body), fields(url = %url))]
    pub async fn post_json_with_auth<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        body: &T,
    ) -> Result<Response, CheckError> {
        Self::validate_url(url)?;
        debug!("POST request with JSON");

        let response = self
            .inner
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .json(body)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }

    /// Performs a POST with a JSON body, bearer authorization, and extra
    /// headers.
    #[instrument(skip(self, api_key, headers, body), fields(url = %url))]
    pub async fn post_json_with_headers<T: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        api_key: &str,
        headers: HeaderMap,
        body: &T,
    ) -> Result<Response, CheckError> {
        Self::validate_url(url)?;
        debug!("POST request with JSON and headers");

        let response = self
            .inner
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", api_key))
            .headers(headers)
            .json(body)
            .send()
            .await?;
        debug!(status = %response.status(), "Response received");
        Ok(response)
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_rejected() {
        assert!(HttpClient::validate_url("not-a-valid-url").is_err());
        assert!(HttpClient::validate_url("https://api.openai.com/v1/chat/completions").is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_sending() {
        let client = HttpClient::new();
        let result = client
            .post_json_with_auth("::nope::", "key", &serde_json::json!({}))
            .await;
        assert!(matches!(result, Err(CheckError::InvalidUrl(_))));
    }
}
