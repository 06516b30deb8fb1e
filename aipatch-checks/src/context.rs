//! Shared context for check execution.

use std::time::Duration;

use crate::client::{HttpClient, DEFAULT_TIMEOUT_SECS};

// ============================================================================
// Check Context
// ============================================================================

/// Shared resources for one doctor run.
///
/// Built once and passed to every check so they share a single HTTP client
/// and timeout policy. Tests shrink the timeout to exercise the failure
/// paths quickly.
#[derive(Debug, Clone)]
pub struct CheckContext {
    http: HttpClient,
    timeout: Duration,
}

impl CheckContext {
    /// Creates a context with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a builder for customized contexts.
    pub fn builder() -> CheckContextBuilder {
        CheckContextBuilder::default()
    }

    /// The shared HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// The per-request timeout in effect.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for CheckContext {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`CheckContext`].
#[derive(Debug, Default)]
pub struct CheckContextBuilder {
    timeout: Option<Duration>,
}

impl CheckContextBuilder {
    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the context.
    pub fn build(self) -> CheckContext {
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        CheckContext {
            http: HttpClient::with_timeout(timeout),
            timeout,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timeout() {
        let ctx = CheckContext::new();
        assert_eq!(ctx.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_timeout_override() {
        let ctx = CheckContext::builder()
            .timeout(Duration::from_millis(250))
            .build();
        assert_eq!(ctx.timeout(), Duration::from_millis(250));
    }
}
