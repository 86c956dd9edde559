//! Ambient system context, made explicit and injectable
//!
//! Everything the engine would otherwise read from the environment (locale
//! identifier, timezone identifier, home directory, wall clock) travels
//! through a [`SystemContext`] value instead of direct system calls. A
//! detected context answers with live values; a fixed one freezes all four,
//! which makes `evaluate` fully deterministic under test.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::path::{Path, PathBuf};
use tracing::warn;

const FALLBACK_LOCALE: &str = "en-US";
const FALLBACK_TIMEZONE: &str = "UTC";

/// Resolved ambient identifiers plus the clock
#[derive(Debug, Clone)]
pub struct SystemContext {
    locale: String,
    timezone: String,
    home_dir: Option<PathBuf>,
    frozen_now: Option<DateTime<Utc>>,
}

impl SystemContext {
    /// Detect the context from the running system.
    ///
    /// Locale comes from `LC_ALL`/`LC_MESSAGES`/`LANG` (first set wins,
    /// normalized to a BCP-47-style identifier), the timezone from the
    /// platform database, the home directory from the platform conventions.
    /// Every lookup has a defined fallback; detection never fails.
    pub fn detect() -> Self {
        let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find_map(|raw| normalize_locale(&raw))
            .unwrap_or_else(|| FALLBACK_LOCALE.to_string());

        let timezone = iana_time_zone::get_timezone()
            .unwrap_or_else(|_| FALLBACK_TIMEZONE.to_string());

        Self {
            locale,
            timezone,
            home_dir: dirs::home_dir(),
            frozen_now: None,
        }
    }

    /// Build a fully fixed context (frozen clock included).
    ///
    /// Two evaluations against the same fixed context and inputs produce
    /// bit-identical results.
    pub fn fixed(
        locale: impl Into<String>,
        timezone: impl Into<String>,
        home_dir: Option<PathBuf>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            locale: locale.into(),
            timezone: timezone.into(),
            home_dir,
            frozen_now: Some(now),
        }
    }

    /// System-default locale identifier
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// System-default IANA timezone identifier
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// Home directory, when one could be determined
    pub fn home_dir(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }

    /// Current instant: the frozen one if set, the wall clock otherwise
    pub fn now(&self) -> DateTime<Utc> {
        self.frozen_now.unwrap_or_else(Utc::now)
    }

    /// Resolve a timezone identifier to a [`Tz`].
    ///
    /// Unrecognized identifiers fall back to the context default, then to
    /// UTC; the engine never aborts on a bad timezone.
    pub fn resolve_tz(&self, identifier: &str) -> Tz {
        if let Ok(tz) = identifier.parse::<Tz>() {
            return tz;
        }
        warn!(identifier, "Unrecognized timezone, falling back to system default");
        self.timezone.parse::<Tz>().unwrap_or(Tz::UTC)
    }

    /// Expand a leading `~` to the home directory; other forms pass through.
    pub fn expand_home(&self, path: &str) -> PathBuf {
        if let Some(home) = &self.home_dir {
            if path == "~" {
                return home.clone();
            }
            if let Some(rest) = path.strip_prefix("~/") {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }
}

/// Normalize a POSIX locale string ("fr_FR.UTF-8") to a BCP-47-style
/// identifier ("fr-FR"). Returns `None` for the C/POSIX locales and empty
/// strings, which carry no language information.
fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw.split(['.', '@']).next().unwrap_or("");
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_context() -> SystemContext {
        SystemContext::fixed(
            "en-US",
            "Europe/Paris",
            Some(PathBuf::from("/home/tester")),
            Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale("fr_FR.UTF-8"), Some("fr-FR".to_string()));
        assert_eq!(normalize_locale("en_US"), Some("en-US".to_string()));
        assert_eq!(normalize_locale("ja_JP@mod"), Some("ja-JP".to_string()));
        assert_eq!(normalize_locale("de-DE"), Some("de-DE".to_string()));
        assert_eq!(normalize_locale("C"), None);
        assert_eq!(normalize_locale("C.UTF-8"), None);
        assert_eq!(normalize_locale("POSIX"), None);
        assert_eq!(normalize_locale(""), None);
    }

    #[test]
    fn test_fixed_context_freezes_clock() {
        let context = fixed_context();
        let first = context.now();
        let second = context.now();
        assert_eq!(first, second);
        assert_eq!(first, Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_tz_known_identifier() {
        let context = fixed_context();
        assert_eq!(context.resolve_tz("Asia/Tokyo"), chrono_tz::Asia::Tokyo);
    }

    #[test]
    fn test_resolve_tz_falls_back_to_context_default() {
        let context = fixed_context();
        assert_eq!(context.resolve_tz("Mars/Olympus"), chrono_tz::Europe::Paris);
    }

    #[test]
    fn test_resolve_tz_falls_back_to_utc_when_default_is_bad_too() {
        let context = SystemContext::fixed(
            "en-US",
            "Nowhere/Nothing",
            None,
            Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        );
        assert_eq!(context.resolve_tz("Mars/Olympus"), Tz::UTC);
    }

    #[test]
    fn test_expand_home() {
        let context = fixed_context();
        assert_eq!(
            context.expand_home("~/.spendboard/status.txt"),
            PathBuf::from("/home/tester/.spendboard/status.txt")
        );
        assert_eq!(context.expand_home("~"), PathBuf::from("/home/tester"));
        assert_eq!(
            context.expand_home("/var/run/status.txt"),
            PathBuf::from("/var/run/status.txt")
        );
        // A mid-path tilde is not a home marker
        assert_eq!(
            context.expand_home("/data/~backup/status.txt"),
            PathBuf::from("/data/~backup/status.txt")
        );
    }

    #[test]
    fn test_expand_home_without_home_dir_passes_through() {
        let context = SystemContext::fixed(
            "en-US",
            "UTC",
            None,
            Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        );
        assert_eq!(
            context.expand_home("~/status.txt"),
            PathBuf::from("~/status.txt")
        );
    }

    #[test]
    fn test_detect_never_panics() {
        let context = SystemContext::detect();
        assert!(!context.locale().is_empty());
        assert!(!context.timezone().is_empty());
    }
}
