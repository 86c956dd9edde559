//! Prior dashboard snapshot (optional engine input)
//!
//! Only the nested usage-summary limit is consulted, as a paid-plan hint;
//! everything else a snapshot may carry is ignored and preserved untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A previously rendered dashboard state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Usage summary from the prior run, if one was recorded
    #[serde(default)]
    pub usage_summary: Option<UsageSummarySnapshot>,

    /// Additional untyped fields (forward compatibility)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Nested usage summary inside a snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummarySnapshot {
    /// Usage-plan limit; strictly positive means a paid plan was active
    #[serde(default)]
    pub limit: Option<f64>,
}

impl DashboardSnapshot {
    /// The plan limit recorded in the snapshot, if any
    pub fn plan_limit(&self) -> Option<f64> {
        self.usage_summary.as_ref().and_then(|s| s.limit)
    }
}
