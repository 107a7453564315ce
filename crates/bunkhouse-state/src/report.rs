//! Stored summary of the last automatic plan.

use serde::{Deserialize, Serialize};

/// What the host saw after the last solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    /// Digest of the solver inputs the plan was computed from.
    pub fingerprint: String,
    pub reasoning: String,
    pub conflicts: Vec<String>,
    /// Unix timestamp (milliseconds).
    pub created_at: u64,
}
