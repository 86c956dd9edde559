//! Application settings (read-only to the engine)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Appearance preference carried through to the personalization profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Follow the system appearance (default)
    #[default]
    System,
    /// Force light appearance
    Light,
    /// Force dark appearance
    Dark,
}

/// Top-level application settings (from settings.json)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Appearance preference
    #[serde(default)]
    pub appearance: Appearance,

    /// Advanced options (auto-detection, thresholds, export path)
    #[serde(default)]
    pub advanced: AdvancedSettings,

    /// Overview pane options
    #[serde(default)]
    pub overview: OverviewSettings,

    /// Per-provider options
    #[serde(default)]
    pub provider_settings: ProviderSettings,

    /// Additional untyped fields (forward compatibility)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Advanced settings group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    /// Auto-detect locale/timezone/currency instead of using fixed values
    #[serde(default)]
    pub auto_detect_preferences: bool,

    /// Notification threshold as a fraction (0.0-1.0)
    #[serde(default = "default_notification_threshold")]
    pub notification_threshold_percent: f64,

    /// Status export destination; a leading `~` is expanded to the home dir
    #[serde(default = "default_status_export_path")]
    pub status_export_path: String,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            auto_detect_preferences: false,
            notification_threshold_percent: default_notification_threshold(),
            status_export_path: default_status_export_path(),
        }
    }
}

fn default_notification_threshold() -> f64 {
    0.8
}

fn default_status_export_path() -> String {
    "~/.spendboard/status.txt".to_string()
}

/// Overview pane settings group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewSettings {
    /// Refresh interval; also feeds the forecast threshold formula
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u32,
}

impl Default for OverviewSettings {
    fn default() -> Self {
        Self {
            refresh_interval: default_refresh_interval(),
        }
    }
}

fn default_refresh_interval() -> u32 {
    60
}

/// Per-provider settings group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSettings {
    /// OpenAI organization; doubles as the locale hint when auto-detect is off
    #[serde(default, rename = "openAIOrganization")]
    pub open_ai_organization: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.appearance, Appearance::System);
        assert!(!settings.advanced.auto_detect_preferences);
        assert_eq!(settings.advanced.notification_threshold_percent, 0.8);
        assert_eq!(settings.advanced.status_export_path, "~/.spendboard/status.txt");
        assert_eq!(settings.overview.refresh_interval, 60);
        assert!(settings.provider_settings.open_ai_organization.is_none());
    }

    #[test]
    fn test_parse_camel_case_wire_format() {
        let json = r#"{
            "appearance": "dark",
            "advanced": {
                "autoDetectPreferences": true,
                "notificationThresholdPercent": 0.5,
                "statusExportPath": "/tmp/status.txt"
            },
            "overview": { "refreshInterval": 30 },
            "providerSettings": { "openAIOrganization": "acme" }
        }"#;

        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.appearance, Appearance::Dark);
        assert!(settings.advanced.auto_detect_preferences);
        assert_eq!(settings.advanced.notification_threshold_percent, 0.5);
        assert_eq!(settings.advanced.status_export_path, "/tmp/status.txt");
        assert_eq!(settings.overview.refresh_interval, 30);
        assert_eq!(
            settings.provider_settings.open_ai_organization.as_deref(),
            Some("acme")
        );
    }

    #[test]
    fn test_unknown_fields_land_in_extra() {
        let json = r#"{ "appearance": "light", "futureKnob": 42 }"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.appearance, Appearance::Light);
        assert_eq!(
            settings.extra.get("futureKnob"),
            Some(&serde_json::json!(42))
        );
    }

    #[test]
    fn test_missing_groups_use_defaults() {
        let settings: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, AppSettings::default());
    }
}
