//! Status-line composition for the developer export

use crate::context::SystemContext;
use crate::currency::format_cents;
use chrono::{DateTime, Utc};
use spendboard_types::{
    AppSettings, DeveloperExport, ForecastWarning, PersonalizationProfile, UsageAggregationMetric,
    UsageAggregationPreset,
};

/// Marker text when no warning needs surfacing
const STABLE_STATUS: &str = "stable";

/// Compose the one-line developer export from the other builders' outputs.
///
/// Latest spend is the last (most recent) daily row, 0 without one; the
/// status text is the first warning's message when any exist. The export
/// path comes from settings with a leading `~` expanded. No file is
/// written here; [`crate::export::write_status_export`] does that.
pub fn compose_status(
    aggregations: &[UsageAggregationMetric],
    warnings: &[ForecastWarning],
    settings: &AppSettings,
    personalization: &PersonalizationProfile,
    context: &SystemContext,
    now: DateTime<Utc>,
) -> DeveloperExport {
    let latest_spend_cents = aggregations
        .iter()
        .find(|metric| metric.preset == UsageAggregationPreset::Daily)
        .and_then(|metric| metric.rows.last())
        .map(|row| row.spend_cents)
        .unwrap_or(0);

    let status_text = warnings
        .first()
        .map(|warning| warning.message.as_str())
        .unwrap_or(STABLE_STATUS);

    let status_line = format!(
        "{} | {}",
        format_cents(latest_spend_cents, &personalization.currency_code),
        status_text
    );

    DeveloperExport {
        status_line,
        export_path: context.expand_home(&settings.advanced.status_export_path),
        written_at: now,
    }
}
