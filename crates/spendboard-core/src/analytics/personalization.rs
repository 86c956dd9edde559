//! Personalization resolution
//!
//! Folds settings, the optional dashboard snapshot, and the ambient system
//! context into one [`PersonalizationProfile`] the other builders consume.
//! Every lookup has a defined fallback; resolution cannot fail.

use crate::context::SystemContext;
use crate::currency::currency_for_locale;
use spendboard_types::{AppSettings, DashboardSnapshot, PersonalizationProfile};

const FALLBACK_CURRENCY: &str = "USD";

/// Label attached when the snapshot reports a positive usage-plan limit
const INFERRED_PLAN_LABEL: &str = "Paid";

/// Resolve the profile driving locale, timezone, currency, appearance, and
/// plan inference.
///
/// With auto-detection enabled, locale and timezone come from the system,
/// the currency from the locale's region, and the plan from the snapshot
/// limit. With it disabled, the configured organization string substitutes
/// for the locale, currency is pinned to USD, and no plan is inferred.
pub fn resolve_personalization(
    settings: &AppSettings,
    snapshot: Option<&DashboardSnapshot>,
    context: &SystemContext,
) -> PersonalizationProfile {
    if settings.advanced.auto_detect_preferences {
        let locale = context.locale().to_string();
        let currency_code = currency_for_locale(&locale)
            .unwrap_or(FALLBACK_CURRENCY)
            .to_string();
        let inferred_plan = snapshot
            .and_then(DashboardSnapshot::plan_limit)
            .filter(|limit| *limit > 0.0)
            .map(|_| INFERRED_PLAN_LABEL.to_string());

        PersonalizationProfile {
            locale,
            timezone: context.timezone().to_string(),
            currency_code,
            appearance: settings.appearance,
            inferred_plan,
        }
    } else {
        // The organization string stands in for the locale when auto-detect
        // is off. Conflates two unrelated identifiers; kept deliberately,
        // see DESIGN.md before changing.
        let locale = settings
            .provider_settings
            .open_ai_organization
            .as_deref()
            .filter(|org| !org.is_empty())
            .unwrap_or(context.locale())
            .to_string();

        PersonalizationProfile {
            locale,
            timezone: context.timezone().to_string(),
            currency_code: FALLBACK_CURRENCY.to_string(),
            appearance: settings.appearance,
            inferred_plan: None,
        }
    }
}
