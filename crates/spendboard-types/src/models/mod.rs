//! Input-side data models: usage events, provider totals, settings, snapshot

pub mod event;
pub mod settings;
pub mod snapshot;

pub use event::{ProviderUsageTotal, UsageEvent};
pub use settings::{
    AdvancedSettings, AppSettings, Appearance, OverviewSettings, ProviderSettings,
};
pub use snapshot::{DashboardSnapshot, UsageSummarySnapshot};
