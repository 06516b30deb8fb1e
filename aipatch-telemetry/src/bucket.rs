//! Duration bucketing for anonymization.
//!
//! Elapsed run time is reported only as one of six coarse buckets so the
//! value cannot identify a workload.

use serde::{Deserialize, Serialize};

// ============================================================================
// Duration Bucket
// ============================================================================

/// Coarse, non-identifying quantization of elapsed seconds.
///
/// Buckets are half-open on the lower bound: `1.0` falls in `1-5s`,
/// `60.0` falls in `>60s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    /// `[0, 1)` seconds.
    #[serde(rename = "<1s")]
    Under1s,
    /// `[1, 5)` seconds.
    #[serde(rename = "1-5s")]
    From1To5s,
    /// `[5, 10)` seconds.
    #[serde(rename = "5-10s")]
    From5To10s,
    /// `[10, 30)` seconds.
    #[serde(rename = "10-30s")]
    From10To30s,
    /// `[30, 60)` seconds.
    #[serde(rename = "30-60s")]
    From30To60s,
    /// `[60, ∞)` seconds.
    #[serde(rename = ">60s")]
    Over60s,
}

impl DurationBucket {
    /// Buckets an elapsed duration in seconds.
    ///
    /// Total over all inputs: negatives and NaN clamp to zero.
    pub fn from_secs(seconds: f64) -> Self {
        let seconds = if seconds.is_nan() || seconds < 0.0 {
            0.0
        } else {
            seconds
        };

        if seconds < 1.0 {
            Self::Under1s
        } else if seconds < 5.0 {
            Self::From1To5s
        } else if seconds < 10.0 {
            Self::From5To10s
        } else if seconds < 30.0 {
            Self::From10To30s
        } else if seconds < 60.0 {
            Self::From30To60s
        } else {
            Self::Over60s
        }
    }

    /// Returns the bucket label as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under1s => "<1s",
            Self::From1To5s => "1-5s",
            Self::From5To10s => "5-10s",
            Self::From10To30s => "10-30s",
            Self::From30To60s => "30-60s",
            Self::Over60s => ">60s",
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_bounds_are_inclusive() {
        assert_eq!(DurationBucket::from_secs(0.0), DurationBucket::Under1s);
        assert_eq!(DurationBucket::from_secs(1.0), DurationBucket::From1To5s);
        assert_eq!(DurationBucket::from_secs(5.0), DurationBucket::From5To10s);
        assert_eq!(DurationBucket::from_secs(10.0), DurationBucket::From10To30s);
        assert_eq!(DurationBucket::from_secs(30.0), DurationBucket::From30To60s);
        assert_eq!(DurationBucket::from_secs(60.0), DurationBucket::Over60s);
    }

    #[test]
    fn test_upper_bounds_are_exclusive() {
        assert_eq!(DurationBucket::from_secs(0.999), DurationBucket::Under1s);
        assert_eq!(DurationBucket::from_secs(4.999), DurationBucket::From1To5s);
        assert_eq!(
            DurationBucket::from_secs(59.999),
            DurationBucket::From30To60s
        );
    }

    #[test]
    fn test_negative_and_nan_clamp_to_zero() {
        assert_eq!(DurationBucket::from_secs(-3.0), DurationBucket::Under1s);
        assert_eq!(DurationBucket::from_secs(f64::NAN), DurationBucket::Under1s);
    }

    #[test]
    fn test_large_values() {
        assert_eq!(DurationBucket::from_secs(3600.0), DurationBucket::Over60s);
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(
            serde_json::to_string(&DurationBucket::Under1s).unwrap(),
            "\"<1s\""
        );
        assert_eq!(
            serde_json::to_string(&DurationBucket::Over60s).unwrap(),
            "\">60s\""
        );
    }
}
