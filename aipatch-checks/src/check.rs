//! Check trait and target selection.

use async_trait::async_trait;
use aipatch_core::{CheckReport, ProviderConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::context::CheckContext;

// ============================================================================
// Check Target
// ============================================================================

/// The failure classes a user can ask the doctor about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckTarget {
    /// SSE stalls, partial output, slow first byte.
    Streaming,
    /// 429s, Retry-After, rate-limit chaos.
    Retries,
    /// Cost spikes and token pricing.
    Cost,
    /// Request IDs and duplicate detection.
    Trace,
}

impl CheckTarget {
    /// Returns all targets in their canonical run order.
    pub fn all() -> &'static [CheckTarget] {
        &[Self::Streaming, Self::Retries, Self::Cost, Self::Trace]
    }

    /// Returns the CLI name for this target.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Streaming => "streaming",
            Self::Retries => "retries",
            Self::Cost => "cost",
            Self::Trace => "trace",
        }
    }

    /// Looks up a target by CLI name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "streaming" => Some(Self::Streaming),
            "retries" => Some(Self::Retries),
            "cost" => Some(Self::Cost),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

impl fmt::Display for CheckTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Check Trait
// ============================================================================

/// A diagnostic check against a provider endpoint.
///
/// ## Implementing a Check
///
/// ```ignore
/// struct RetriesCheck;
///
/// #[async_trait]
/// impl Check for RetriesCheck {
///     fn target(&self) -> CheckTarget {
///         CheckTarget::Retries
///     }
///
///     async fn run(&self, config: &ProviderConfig, ctx: &CheckContext) -> CheckReport {
///         // Issue one request, classify what came back.
///     }
/// }
/// ```
#[async_trait]
pub trait Check: Send + Sync {
    /// The target this check diagnoses.
    fn target(&self) -> CheckTarget;

    /// Unique identifier, also used as the report key.
    fn id(&self) -> &'static str {
        self.target().name()
    }

    /// Runs the check.
    ///
    /// Infallible by contract: transport and protocol failures are folded
    /// into the returned report, never raised to the caller.
    async fn run(&self, config: &ProviderConfig, ctx: &CheckContext) -> CheckReport;
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_name_round_trip() {
        for target in CheckTarget::all() {
            assert_eq!(CheckTarget::from_name(target.name()), Some(*target));
        }
        assert_eq!(CheckTarget::from_name("bogus"), None);
    }

    #[test]
    fn test_target_serialization() {
        assert_eq!(
            serde_json::to_string(&CheckTarget::Retries).unwrap(),
            "\"retries\""
        );
    }
}
