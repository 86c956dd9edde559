//! Monthly spend projection against the notification threshold
//!
//! A deliberately blunt model: the 90th-percentile daily spend, spread over
//! a fixed 30-day month. Whenever at least one event carries a usable
//! timestamp, exactly one warning is emitted, with `info` severity standing
//! for "no concern".

use crate::context::SystemContext;
use crate::currency::format_cents;
use chrono::{DateTime, NaiveDate, Utc};
use spendboard_types::{
    AppSettings, ForecastSeverity, ForecastWarning, PersonalizationProfile,
    UsageAggregationPreset, UsageEvent,
};
use std::collections::HashMap;

/// Project monthly spend and classify it against the configured threshold.
///
/// Events without a usable timestamp produce no warnings (there is nothing
/// to project from); otherwise exactly one warning comes back, its severity
/// `critical` at twice the threshold, `warning` at the threshold, `info`
/// below it.
pub fn forecast_spend(
    events: &[UsageEvent],
    personalization: &PersonalizationProfile,
    settings: &AppSettings,
    context: &SystemContext,
    now: DateTime<Utc>,
) -> Vec<ForecastWarning> {
    if events.is_empty() {
        return Vec::new();
    }

    let tz = context.resolve_tz(&personalization.timezone);

    let mut daily_spend: HashMap<NaiveDate, u64> = HashMap::new();
    for event in events {
        let Some(ts) = event.occurrence() else {
            continue;
        };
        let day = ts.with_timezone(&tz).date_naive();
        *daily_spend.entry(day).or_insert(0) += event.spend_cents;
    }
    if daily_spend.is_empty() {
        return Vec::new();
    }

    let p90_day_cents = percentile_90(daily_spend.into_values().collect());
    let hourly_burn = p90_day_cents as f64 / 24.0;
    // Fixed 30-day month approximation, integer-truncated
    let projected_spend_cents = (hourly_burn * 24.0 * 30.0) as u64;

    let threshold_cents = (settings.overview.refresh_interval as f64
        * settings.advanced.notification_threshold_percent
        * 100.0) as u64;

    let severity = if projected_spend_cents >= threshold_cents.saturating_mul(2) {
        ForecastSeverity::Critical
    } else if projected_spend_cents >= threshold_cents {
        ForecastSeverity::Warning
    } else {
        ForecastSeverity::Info
    };

    let amount = format_cents(projected_spend_cents, &personalization.currency_code);
    let message = match severity {
        ForecastSeverity::Critical => {
            format!("Projected monthly spend {} is at least double the alert threshold", amount)
        }
        ForecastSeverity::Warning => {
            format!("Projected monthly spend {} exceeds the alert threshold", amount)
        }
        ForecastSeverity::Info => {
            format!("Projected monthly spend {} is within the alert threshold", amount)
        }
    };

    vec![ForecastWarning {
        preset: UsageAggregationPreset::Monthly,
        computed_at: now,
        message,
        severity,
        projected_spend_cents,
        threshold_cents,
    }]
}

/// Nearest-rank 90th percentile: the value at index floor((n-1) * 0.9) of
/// the ascending-sorted values, no interpolation. Empty input yields 0.
fn percentile_90(mut values: Vec<u64>) -> u64 {
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let index = ((values.len() - 1) as f64 * 0.9).floor() as usize;
    values[index.min(values.len() - 1)]
}
