//! Calendar-grid aggregation, session segmentation, and provider totals
//!
//! Events are bucketed on four calendar grids in the personalization
//! timezone, segmented into gap-bounded sessions, and topped off with the
//! provider totals handed in alongside. Everything here is pure: inputs in,
//! metrics out, evaluation instant passed by the caller.

use crate::context::SystemContext;
use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use rayon::prelude::*;
use spendboard_types::{
    PersonalizationProfile, ProviderUsageTotal, UsageAggregationMetric, UsageAggregationPreset,
    UsageAggregationRow, UsageEvent,
};
use std::collections::HashMap;
use tracing::warn;

/// Maximum silence between two consecutive events of one session
const SESSION_GAP_MINUTES: i64 = 30;

/// Build the full metric set for one evaluation.
///
/// With no events at all, only the provider-totals metric is emitted (and
/// nothing when those are empty too). Otherwise the ordering is fixed:
/// 5-hour blocks, daily, weekly, monthly, sessions, then provider totals.
pub fn aggregate_usage(
    events: &[UsageEvent],
    provider_totals: &[ProviderUsageTotal],
    personalization: &PersonalizationProfile,
    context: &SystemContext,
    now: DateTime<Utc>,
) -> Vec<UsageAggregationMetric> {
    if events.is_empty() {
        return provider_totals_metric(provider_totals, now)
            .into_iter()
            .collect();
    }

    let tz = context.resolve_tz(&personalization.timezone);
    let parsed = parse_chronological(events);

    let mut metrics: Vec<UsageAggregationMetric> = GRID_RESOLUTIONS
        .par_iter()
        .map(|resolution| grid_metric(*resolution, &parsed, tz))
        .collect();
    metrics.push(session_metric(&parsed));
    if let Some(providers) = provider_totals_metric(provider_totals, now) {
        metrics.push(providers);
    }
    metrics
}

/// Parse timestamps and order events chronologically.
///
/// Events whose timestamp fails to parse are excluded from all downstream
/// aggregation; the sort is stable, so same-instant events keep their input
/// order.
pub(super) fn parse_chronological(events: &[UsageEvent]) -> Vec<(DateTime<Utc>, &UsageEvent)> {
    let mut parsed: Vec<(DateTime<Utc>, &UsageEvent)> = events
        .iter()
        .filter_map(|event| event.occurrence().map(|ts| (ts, event)))
        .collect();
    let dropped = events.len() - parsed.len();
    if dropped > 0 {
        warn!(dropped, "Excluding events with unparseable timestamps");
    }
    parsed.sort_by_key(|(ts, _)| *ts);
    parsed
}

/// Calendar grids, each with its own bucket-key and bucket-end derivation
#[derive(Debug, Clone, Copy)]
enum GridResolution {
    FiveHourBlocks,
    Daily,
    Weekly,
    Monthly,
}

const GRID_RESOLUTIONS: [GridResolution; 4] = [
    GridResolution::FiveHourBlocks,
    GridResolution::Daily,
    GridResolution::Weekly,
    GridResolution::Monthly,
];

impl GridResolution {
    fn preset(self) -> UsageAggregationPreset {
        match self {
            Self::FiveHourBlocks => UsageAggregationPreset::FiveHourBlocks,
            Self::Daily => UsageAggregationPreset::Daily,
            Self::Weekly => UsageAggregationPreset::Weekly,
            Self::Monthly => UsageAggregationPreset::Monthly,
        }
    }

    /// Local start of the bucket containing `local`
    fn bucket_start(self, local: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::FiveHourBlocks => {
                // 0-4 → 0, 5-9 → 5, 10-14 → 10, 15-19 → 15, 20-23 → 20
                let block_hour = (local.hour() / 5) * 5;
                local.date().and_hms_opt(block_hour, 0, 0)
            }
            Self::Daily => local.date().and_hms_opt(0, 0, 0),
            Self::Weekly => {
                let monday = local
                    .date()
                    .checked_sub_signed(Duration::days(
                        local.weekday().num_days_from_monday() as i64
                    ))?;
                monday.and_hms_opt(0, 0, 0)
            }
            Self::Monthly => local.date().with_day(1)?.and_hms_opt(0, 0, 0),
        }
    }

    /// Local end (exclusive) of the bucket starting at `start`
    fn bucket_end(self, start: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Self::FiveHourBlocks => start.checked_add_signed(Duration::hours(5)),
            Self::Daily => start.checked_add_signed(Duration::days(1)),
            Self::Weekly => start.checked_add_signed(Duration::days(7)),
            Self::Monthly => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)
            }
        }
    }
}

#[derive(Default)]
struct BucketTotals {
    request_count: u64,
    spend_cents: u64,
}

fn grid_metric(
    resolution: GridResolution,
    parsed: &[(DateTime<Utc>, &UsageEvent)],
    tz: Tz,
) -> UsageAggregationMetric {
    let mut buckets: HashMap<NaiveDateTime, BucketTotals> = HashMap::new();
    for (ts, event) in parsed {
        let local = ts.with_timezone(&tz).naive_local();
        let Some(start) = resolution.bucket_start(local) else {
            continue;
        };
        let totals = buckets.entry(start).or_default();
        totals.request_count += event.request_count;
        totals.spend_cents += event.spend_cents;
    }

    // Hash order is not emission order; rows sort ascending by bucket start
    let mut starts: Vec<NaiveDateTime> = buckets.keys().copied().collect();
    starts.sort_unstable();

    let rows = starts
        .into_iter()
        .filter_map(|start| {
            let end = resolution.bucket_end(start)?;
            let totals = buckets.remove(&start)?;
            Some(UsageAggregationRow {
                preset: resolution.preset(),
                start: to_instant(tz, start),
                end: to_instant(tz, end),
                request_count: totals.request_count,
                spend_cents: totals.spend_cents,
                provider: None,
            })
        })
        .collect();

    UsageAggregationMetric {
        preset: resolution.preset(),
        rows,
    }
}

/// Resolve a local wall time to a UTC instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant; times skipped
/// by a DST gap resolve one hour later, and as a last resort the wall time
/// is read as UTC.
fn to_instant(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(first, second) => first.min(second).with_timezone(&Utc),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .single()
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|| Utc.from_utc_datetime(&naive)),
    }
}

struct OpenSession {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    request_count: u64,
    spend_cents: u64,
}

impl OpenSession {
    fn into_row(self) -> UsageAggregationRow {
        UsageAggregationRow {
            preset: UsageAggregationPreset::Sessions,
            start: self.start,
            end: self.end,
            request_count: self.request_count,
            spend_cents: self.spend_cents,
            provider: None,
        }
    }
}

/// Segment chronologically ordered events into sessions.
///
/// A session is a maximal run of events where consecutive timestamps are at
/// most the gap threshold apart; a gap strictly greater closes the run.
/// Single pass over the pre-sorted slice; single-event sessions have
/// start == end.
fn session_metric(parsed: &[(DateTime<Utc>, &UsageEvent)]) -> UsageAggregationMetric {
    let gap = Duration::minutes(SESSION_GAP_MINUTES);
    let mut rows: Vec<UsageAggregationRow> = Vec::new();
    let mut open: Option<OpenSession> = None;

    for (ts, event) in parsed {
        match open.as_mut() {
            Some(session) if *ts - session.end <= gap => {
                session.end = *ts;
                session.request_count += event.request_count;
                session.spend_cents += event.spend_cents;
            }
            _ => {
                if let Some(finished) = open.take() {
                    rows.push(finished.into_row());
                }
                open = Some(OpenSession {
                    start: *ts,
                    end: *ts,
                    request_count: event.request_count,
                    spend_cents: event.spend_cents,
                });
            }
        }
    }
    if let Some(finished) = open {
        rows.push(finished.into_row());
    }

    UsageAggregationMetric {
        preset: UsageAggregationPreset::Sessions,
        rows,
    }
}

/// One row per provider total, stamped at evaluation time; `None` when no
/// totals were supplied.
fn provider_totals_metric(
    provider_totals: &[ProviderUsageTotal],
    now: DateTime<Utc>,
) -> Option<UsageAggregationMetric> {
    if provider_totals.is_empty() {
        return None;
    }

    let rows = provider_totals
        .iter()
        .map(|total| UsageAggregationRow {
            preset: UsageAggregationPreset::ProviderTotals,
            start: now,
            end: now,
            request_count: total.request_count,
            spend_cents: total.spend_cents,
            provider: Some(total.provider.clone()),
        })
        .collect();

    Some(UsageAggregationMetric {
        preset: UsageAggregationPreset::ProviderTotals,
        rows,
    })
}
