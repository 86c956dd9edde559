//! The deterministic usage-analytics engine
//!
//! One synchronous [`AnalyticsEngine::evaluate`] call runs five pure
//! builders over immutable inputs: personalization resolves first, then
//! aggregation, forecast, and live metrics fan out across the thread pool,
//! and the status export composes from their outputs.

use crate::context::SystemContext;
use spendboard_types::{
    AppSettings, DashboardSnapshot, ProviderUsageTotal, UsageAnalyticsResult, UsageEvent,
};
use tracing::debug;

pub mod aggregation;
pub mod forecast;
pub mod live;
pub mod personalization;
pub mod status;


pub use aggregation::aggregate_usage;
pub use forecast::forecast_spend;
pub use live::sample_live_metrics;
pub use personalization::resolve_personalization;
pub use status::compose_status;

/// Stateless, re-entrant entry point over the five builders
///
/// The engine holds no mutable state; concurrent `evaluate` calls with
/// different inputs never interfere.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine {
    context: SystemContext,
}

impl AnalyticsEngine {
    /// Engine over the detected system context
    pub fn new() -> Self {
        Self {
            context: SystemContext::detect(),
        }
    }

    /// Engine over an explicit context.
    ///
    /// With a fixed context, results are reproducible bit for bit.
    pub fn with_context(context: SystemContext) -> Self {
        Self { context }
    }

    /// The context this engine evaluates against
    pub fn context(&self) -> &SystemContext {
        &self.context
    }

    /// Run one full evaluation.
    ///
    /// The clock is sampled exactly once up front, so every stamped instant
    /// in the result agrees. The three builders that depend only on the
    /// inputs run in parallel; the status export waits for all of them.
    pub fn evaluate(
        &self,
        events: &[UsageEvent],
        provider_totals: &[ProviderUsageTotal],
        settings: &AppSettings,
        snapshot: Option<&DashboardSnapshot>,
    ) -> UsageAnalyticsResult {
        let now = self.context.now();
        let personalization = resolve_personalization(settings, snapshot, &self.context);

        let ((aggregations, warnings), live) = rayon::join(
            || {
                rayon::join(
                    || {
                        aggregate_usage(events, provider_totals, &personalization, &self.context, now)
                    },
                    || forecast_spend(events, &personalization, settings, &self.context, now),
                )
            },
            || sample_live_metrics(events, now),
        );

        let export = compose_status(
            &aggregations,
            &warnings,
            settings,
            &personalization,
            &self.context,
            now,
        );

        debug!(
            metrics = aggregations.len(),
            warnings = warnings.len(),
            live = live.is_some(),
            "Composed analytics result"
        );

        UsageAnalyticsResult {
            aggregations,
            warnings,
            live,
            personalization,
            export,
        }
    }
}

impl Default for AnalyticsEngine {
    fn default() -> Self {
        Self::new()
    }
}
