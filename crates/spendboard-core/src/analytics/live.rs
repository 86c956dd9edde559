//! Live metrics over the trailing hour

use chrono::{DateTime, Duration, Utc};
use spendboard_types::{LiveUsageMetrics, UsageEvent};

/// Sample the burn rate and sparkline from events in the last hour.
///
/// Returns `None` only when there are no events at all. Events exist but
/// none recent yields a zeroed record instead, keeping "nothing tracked"
/// and "currently idle" apart.
pub fn sample_live_metrics(events: &[UsageEvent], now: DateTime<Utc>) -> Option<LiveUsageMetrics> {
    if events.is_empty() {
        return None;
    }

    let cutoff = now - Duration::hours(1);
    let mut recent: Vec<(DateTime<Utc>, &UsageEvent)> = events
        .iter()
        .filter_map(|event| event.occurrence().map(|ts| (ts, event)))
        .filter(|(ts, _)| *ts >= cutoff)
        .collect();

    if recent.is_empty() {
        return Some(LiveUsageMetrics::idle(now));
    }

    recent.sort_by_key(|(ts, _)| *ts);

    // The window is at most an hour wide, so the plain cent sum already is
    // a per-hour rate
    let burn_rate_cents_per_hour: f64 = recent
        .iter()
        .map(|(_, event)| event.spend_cents as f64)
        .sum();
    let sparkline: Vec<f64> = recent
        .iter()
        .map(|(_, event)| event.spend_cents as f64 / 100.0)
        .collect();
    let events = recent.into_iter().map(|(_, event)| event.clone()).collect();

    Some(LiveUsageMetrics {
        last_updated: now,
        burn_rate_cents_per_hour,
        events,
        sparkline,
    })
}
