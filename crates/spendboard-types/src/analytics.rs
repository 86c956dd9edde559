//! Analytics result types produced by the engine
//!
//! Everything here is an immutable value: the engine builds a
//! [`UsageAnalyticsResult`] per evaluation and never mutates one after
//! construction, so results can be shared freely across threads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{Appearance, UsageEvent};

/// Aggregation resolution/strategy tag (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UsageAggregationPreset {
    /// Fixed 5-hour blocks within a local calendar day
    FiveHourBlocks,
    /// Local calendar days
    Daily,
    /// Local calendar weeks (Monday start)
    Weekly,
    /// Local calendar months
    Monthly,
    /// Gap-segmented activity runs (30-minute threshold)
    Sessions,
    /// Per-provider running totals (synthetic "now" bounds)
    ProviderTotals,
}

/// One aggregated bucket of usage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAggregationRow {
    /// Preset this row belongs to
    pub preset: UsageAggregationPreset,
    /// Bucket start instant
    pub start: DateTime<Utc>,
    /// Bucket end instant (`end >= start` always)
    pub end: DateTime<Utc>,
    /// Requests summed into this bucket
    pub request_count: u64,
    /// Spend in cents summed into this bucket
    pub spend_cents: u64,
    /// Provider identifier; present only on provider-total rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// All rows of one preset, ordered ascending by start instant
/// (provider-total rows keep input order and carry identical bounds)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAggregationMetric {
    /// Preset tag
    pub preset: UsageAggregationPreset,
    /// Bucket rows
    pub rows: Vec<UsageAggregationRow>,
}

impl UsageAggregationMetric {
    /// Sum of request counts across all rows
    pub fn total_request_count(&self) -> u64 {
        self.rows.iter().map(|r| r.request_count).sum()
    }

    /// Sum of spend cents across all rows
    pub fn total_spend_cents(&self) -> u64 {
        self.rows.iter().map(|r| r.spend_cents).sum()
    }
}

/// Severity of a forecast warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForecastSeverity {
    /// Projection is within the threshold ("no concern", not absence)
    Info,
    /// Projection meets or exceeds the threshold
    Warning,
    /// Projection meets or exceeds twice the threshold
    Critical,
}

/// A short-horizon spend projection compared against the configured threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastWarning {
    /// Horizon preset (always monthly today)
    pub preset: UsageAggregationPreset,
    /// Instant of computation
    pub computed_at: DateTime<Utc>,
    /// Human-readable message with the projected amount formatted in the
    /// personalization currency
    pub message: String,
    /// Severity bucket
    pub severity: ForecastSeverity,
    /// Projected monthly spend in cents
    pub projected_spend_cents: u64,
    /// Threshold in cents the projection was compared against
    pub threshold_cents: u64,
}

/// Rolling last-hour burn-rate view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveUsageMetrics {
    /// Instant this view was computed
    pub last_updated: DateTime<Utc>,
    /// Spend of the last hour in cents per hour (the window is one hour,
    /// so the sum is already the rate)
    pub burn_rate_cents_per_hour: f64,
    /// Events inside the window, ascending by timestamp
    pub events: Vec<UsageEvent>,
    /// Per-event spend in currency units (cents / 100), same order as
    /// `events`; feeds a sparkline directly
    pub sparkline: Vec<f64>,
}

impl LiveUsageMetrics {
    /// Zero-valued view for "events exist but none recent"
    pub fn idle(last_updated: DateTime<Utc>) -> Self {
        Self {
            last_updated,
            burn_rate_cents_per_hour: 0.0,
            events: Vec::new(),
            sparkline: Vec::new(),
        }
    }
}

/// Resolved locale/timezone/currency/appearance context applied uniformly
/// across all derived outputs; recomputed on every evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationProfile {
    /// Locale identifier (e.g. "en-US")
    pub locale: String,
    /// IANA timezone identifier (e.g. "Europe/Paris")
    pub timezone: String,
    /// ISO 4217 currency code (e.g. "USD")
    pub currency_code: String,
    /// Appearance copied from settings
    pub appearance: Appearance,
    /// Inferred plan label, when the prior snapshot hinted at one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferred_plan: Option<String>,
}

/// One-line status export (the engine computes the string and path;
/// writing is a collaborator's job)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperExport {
    /// Single-line status string
    pub status_line: String,
    /// Resolved destination path (home-relative `~` already expanded)
    pub export_path: PathBuf,
    /// Evaluation instant stamped as the write time
    pub written_at: DateTime<Utc>,
}

/// The complete output bundle of one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageAnalyticsResult {
    /// Aggregation metrics in fixed preset order
    pub aggregations: Vec<UsageAggregationMetric>,
    /// Forecast warnings (exactly one when events were supplied, else empty)
    pub warnings: Vec<ForecastWarning>,
    /// Live view; `None` only when the input had no events at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveUsageMetrics>,
    /// Resolved personalization context
    pub personalization: PersonalizationProfile,
    /// Computed status export
    pub export: DeveloperExport,
}

impl UsageAnalyticsResult {
    /// Look up the metric for a preset, if it was emitted
    pub fn metric(&self, preset: UsageAggregationPreset) -> Option<&UsageAggregationMetric> {
        self.aggregations.iter().find(|m| m.preset == preset)
    }
}
