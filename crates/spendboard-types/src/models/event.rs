//! Usage event and provider running-total records

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A single discrete usage event.
///
/// The occurrence timestamp arrives as an epoch-millisecond numeric string
/// (the upstream feed encodes it that way); [`UsageEvent::occurrence`] is the
/// one place it gets parsed. Costs are integer cents to keep aggregation
/// exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEvent {
    /// Occurrence timestamp: epoch milliseconds encoded as a numeric string
    pub occurred_at: String,
    /// Number of requests this event accounts for
    #[serde(default)]
    pub request_count: u64,
    /// Cost in integer cents
    #[serde(default)]
    pub spend_cents: u64,
}

impl UsageEvent {
    /// Parse the occurrence timestamp.
    ///
    /// Returns `None` when the string is not a valid epoch-millisecond
    /// value; callers treat `None` as "excluded from every time-based
    /// computation" rather than an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use spendboard_types::UsageEvent;
    ///
    /// let event = UsageEvent {
    ///     occurred_at: "1714857600000".to_string(),
    ///     request_count: 1,
    ///     spend_cents: 25,
    /// };
    /// assert!(event.occurrence().is_some());
    ///
    /// let bad = UsageEvent { occurred_at: "yesterday".to_string(), ..event };
    /// assert!(bad.occurrence().is_none());
    /// ```
    pub fn occurrence(&self) -> Option<DateTime<Utc>> {
        let millis: i64 = self.occurred_at.trim().parse().ok()?;
        Utc.timestamp_millis_opt(millis).single()
    }
}

/// Cumulative per-provider usage, independent of individual events.
///
/// Used as a fallback aggregation source when no per-event history exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUsageTotal {
    /// Provider identifier (e.g. "openai", "anthropic")
    pub provider: String,
    /// Cumulative request count
    #[serde(default)]
    pub request_count: u64,
    /// Cumulative spend in integer cents
    #[serde(default)]
    pub spend_cents: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(occurred_at: &str) -> UsageEvent {
        UsageEvent {
            occurred_at: occurred_at.to_string(),
            request_count: 1,
            spend_cents: 100,
        }
    }

    #[test]
    fn test_occurrence_parses_epoch_millis() {
        let ts = event("1714857600000").occurrence().unwrap();
        assert_eq!(ts.timestamp_millis(), 1_714_857_600_000);
    }

    #[test]
    fn test_occurrence_trims_whitespace() {
        assert!(event("  1714857600000 ").occurrence().is_some());
    }

    #[test]
    fn test_occurrence_rejects_non_numeric() {
        assert!(event("not-a-timestamp").occurrence().is_none());
        assert!(event("").occurrence().is_none());
        assert!(event("1714857600000.5").occurrence().is_none());
    }

    #[test]
    fn test_occurrence_rejects_out_of_range() {
        // i64::MAX millis is outside chrono's representable range
        assert!(event("9223372036854775807").occurrence().is_none());
    }

    #[test]
    fn test_event_wire_format_is_camel_case() {
        let json = serde_json::to_value(event("1714857600000")).unwrap();
        assert!(json.get("occurredAt").is_some());
        assert!(json.get("requestCount").is_some());
        assert!(json.get("spendCents").is_some());
    }

    #[test]
    fn test_provider_total_defaults() {
        let total: ProviderUsageTotal =
            serde_json::from_str(r#"{"provider":"openai"}"#).unwrap();
        assert_eq!(total.provider, "openai");
        assert_eq!(total.request_count, 0);
        assert_eq!(total.spend_cents, 0);
    }
}
