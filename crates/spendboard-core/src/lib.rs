//! spendboard-core - Core library for spendboard
//!
//! Provides the usage-analytics engine (a deterministic, single-pass
//! evaluation over usage events and provider totals) together with the
//! collaborators around it: system-context detection, settings/snapshot
//! loading, and the status-export writer.

pub mod analytics;
pub mod context;
pub mod currency;
pub mod error;
pub mod export;
pub mod settings;

pub use analytics::AnalyticsEngine;
pub use context::SystemContext;
pub use error::CoreError;
pub use export::write_status_export;
pub use settings::{load_settings, load_snapshot};
