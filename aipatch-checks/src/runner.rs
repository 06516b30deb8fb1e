//! Check execution.

use tracing::{debug, info};

use aipatch_core::{CheckReport, ProviderConfig};

use crate::check::{Check, CheckTarget};
use crate::checks::{CostCheck, RetriesCheck, StreamingCheck, TraceCheck};
use crate::context::CheckContext;

// ============================================================================
// Check Outcome
// ============================================================================

/// One check's report, keyed by its id.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    /// The check id (same as its target name).
    pub id: &'static str,
    /// What the check observed.
    pub report: CheckReport,
}

// ============================================================================
// Check Runner
// ============================================================================

/// Runs a set of checks in order and collects their reports.
///
/// Execution is sequential on purpose: the checks share one endpoint, and
/// concurrent probes would distort the rate-limit and streaming
/// measurements being taken.
pub struct CheckRunner {
    checks: Vec<Box<dyn Check>>,
}

impl CheckRunner {
    /// Creates a runner for a single target.
    pub fn for_target(target: CheckTarget) -> Self {
        Self {
            checks: vec![build_check(target)],
        }
    }

    /// Creates a runner for several targets, preserving order.
    pub fn for_targets(targets: &[CheckTarget]) -> Self {
        Self {
            checks: targets.iter().copied().map(build_check).collect(),
        }
    }

    /// Creates a runner covering every target.
    pub fn all() -> Self {
        Self::for_targets(CheckTarget::all())
    }

    /// Returns the ids of the checks this runner will execute.
    pub fn check_ids(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.id()).collect()
    }

    /// Executes every check in order.
    pub async fn execute(&self, config: &ProviderConfig, ctx: &CheckContext) -> Vec<CheckOutcome> {
        let mut outcomes = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            info!(check = check.id(), "Running check");
            let report = check.run(config, ctx).await;
            debug!(check = check.id(), status = %report.status, "Check finished");

            outcomes.push(CheckOutcome {
                id: check.id(),
                report,
            });
        }

        outcomes
    }
}

/// Instantiates the check for a target.
fn build_check(target: CheckTarget) -> Box<dyn Check> {
    match target {
        CheckTarget::Streaming => Box::new(StreamingCheck::new()),
        CheckTarget::Retries => Box::new(RetriesCheck::new()),
        CheckTarget::Cost => Box::new(CostCheck::new()),
        CheckTarget::Trace => Box::new(TraceCheck::new()),
    }
}

// ============================================================================
// Tests
// ============================================================================
