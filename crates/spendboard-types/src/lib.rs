//! spendboard-types - Shared data types for spendboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No tokio, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - spendboard-core (the analytics engine and its collaborators)
//! - downstream renderers and exporters

pub mod analytics;
pub mod models;

// Re-export analytics result types
pub use analytics::{
    DeveloperExport, ForecastSeverity, ForecastWarning, LiveUsageMetrics, PersonalizationProfile,
    UsageAggregationMetric, UsageAggregationPreset, UsageAggregationRow, UsageAnalyticsResult,
};

// Re-export model types
pub use models::{
    AdvancedSettings, AppSettings, Appearance, DashboardSnapshot, OverviewSettings,
    ProviderSettings, ProviderUsageTotal, UsageEvent, UsageSummarySnapshot,
};
