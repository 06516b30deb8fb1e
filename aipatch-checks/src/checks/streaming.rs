//! Streaming check - SSE stalls, chunk gaps, time to first byte.

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

use aipatch_core::{CheckReport, CheckStatus, Finding, ProviderConfig, Severity};

use crate::check::{Check, CheckTarget};
use crate::context::CheckContext;
use crate::error::CheckError;

use super::synthetic_body;

/// TTFB above this many seconds raises a warning.
const TTFB_WARN_SECS: f64 = 5.0;

/// Inter-chunk gap above this raises a warning.
const GAP_WARN_SECS: f64 = 10.0;

/// Inter-chunk gap above this raises an error (likely proxy idle timeout).
const GAP_ERROR_SECS: f64 = 30.0;

// ============================================================================
// Streaming Check
// ============================================================================

/// Measures streaming delivery: TTFB, chunk cadence, stalls.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreamingCheck;

/// Raw measurements from one streamed response.
struct StreamTimings {
    ttfb_ms: Option<u64>,
    total_time_s: f64,
    chunk_count: u64,
    max_chunk_gap_s: f64,
}

impl StreamingCheck {
    /// Creates the check.
    pub fn new() -> Self {
        Self
    }

    /// Drives the byte stream to completion, timing every chunk.
    async fn measure(response: reqwest::Response) -> Result<StreamTimings, CheckError> {
        let start = Instant::now();
        let mut ttfb_ms = None;
        let mut chunk_count = 0u64;
        let mut last_chunk = start;
        let mut max_gap_s = 0.0f64;

        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            chunk?;
            let now = Instant::now();

            if ttfb_ms.is_none() {
                ttfb_ms = Some(now.duration_since(start).as_millis() as u64);
            }

            let gap_s = now.duration_since(last_chunk).as_secs_f64();
            max_gap_s = max_gap_s.max(gap_s);
            last_chunk = now;
            chunk_count += 1;
        }

        Ok(StreamTimings {
            ttfb_ms,
            total_time_s: start.elapsed().as_secs_f64(),
            chunk_count,
            max_chunk_gap_s: max_gap_s,
        })
    }

    fn apply_timings(timings: &StreamTimings, report: &mut CheckReport) {
        report.set_metric(
            "ttfb_ms",
            timings.ttfb_ms.map_or(Value::Null, |v| json!(v)),
        );
        report.set_metric("total_time_s", json!(round2(timings.total_time_s)));
        report.set_metric("chunk_count", json!(timings.chunk_count));
        report.set_metric("max_chunk_gap_s", json!(round2(timings.max_chunk_gap_s)));

        if let Some(ttfb_ms) = timings.ttfb_ms {
            let ttfb_s = ttfb_ms as f64 / 1000.0;
            if ttfb_s > TTFB_WARN_SECS {
                report.push_finding(Finding::warning(format!(
                    "High TTFB: {:.2}s (>{:.0}s). Check network or proxy settings.",
                    ttfb_s, TTFB_WARN_SECS
                )));
            }
        }

        if timings.max_chunk_gap_s > GAP_ERROR_SECS {
            report.push_finding(Finding::error(format!(
                "Large chunk gap: {:.2}s (>{:.0}s). Possible SSE stall or proxy idle timeout.",
                timings.max_chunk_gap_s, GAP_ERROR_SECS
            )));
        } else if timings.max_chunk_gap_s > GAP_WARN_SECS {
            report.push_finding(Finding::warning(format!(
                "Chunk gap: {:.2}s (>{:.0}s). Monitor for potential stalls.",
                timings.max_chunk_gap_s, GAP_WARN_SECS
            )));
        }

        // Unlike the retries probe, a stalled stream is a hard failure.
        report.status = if report.has_severity(Severity::Error) {
            CheckStatus::Fail
        } else if report.findings.is_empty() {
            CheckStatus::Pass
        } else {
            CheckStatus::Warn
        };
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[async_trait]
impl Check for StreamingCheck {
    fn target(&self) -> CheckTarget {
        CheckTarget::Streaming
    }

    async fn run(&self, config: &ProviderConfig, ctx: &CheckContext) -> CheckReport {
        let url = config.chat_completions_url();
        let body = synthetic_body(config, "Say hello", 50, true);

        let outcome: Result<StreamTimings, CheckError> = async {
            let response = ctx
                .http()
                .post_json_with_auth(&url, &config.api_key, &body)
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(CheckError::Status(status.as_u16()));
            }

            Self::measure(response).await
        }
        .await;

        match outcome {
            Ok(timings) => {
                debug!(
                    chunks = timings.chunk_count,
                    max_gap_s = timings.max_chunk_gap_s,
                    "Stream complete"
                );
                let mut report = CheckReport::new();
                Self::apply_timings(&timings, &mut report);
                report
            }
            Err(e) => CheckReport::failed(format!("Streaming check failed: {}", e)),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
