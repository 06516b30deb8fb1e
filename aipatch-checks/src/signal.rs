//! Rate-limit signal classification.
//!
//! A provider can surface throttling three ways: a 429 status, a
//! `retry-after` hint, or a dwindling `x-ratelimit-remaining` count. This
//! module reduces any well-formed response to one [`RateLimitSignal`] in a
//! single inspection step, so the verdict does not depend on which layer
//! noticed the condition first.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

/// Retry hint header, integer-seconds or HTTP-date form.
const RETRY_AFTER: &str = "retry-after";

/// Remaining-quota header.
const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";

// ============================================================================
// Rate Limit Signal
// ============================================================================

/// What a single response says about rate limiting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitSignal {
    /// Verbatim `retry-after` value, if present. Kept as a string:
    /// providers send both integer-seconds and HTTP-date forms.
    pub retry_after: Option<String>,
    /// Verbatim `x-ratelimit-remaining` value, if present.
    pub remaining: Option<String>,
    /// True when the status code is exactly 429.
    pub throttled: bool,
}

impl RateLimitSignal {
    /// Classifies a response's status and headers.
    ///
    /// Header lookup is case-insensitive (reqwest normalizes header
    /// names). Non-UTF-8 header values are treated as absent.
    pub fn classify(status: StatusCode, headers: &HeaderMap) -> Self {
        let header_value = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };

        Self {
            retry_after: header_value(RETRY_AFTER),
            remaining: header_value(RATELIMIT_REMAINING),
            throttled: status == StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// The remaining quota parsed as an integer, when it is one.
    pub fn remaining_count(&self) -> Option<i64> {
        self.remaining.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

// ============================================================================
// Tests
// ============================================================================
