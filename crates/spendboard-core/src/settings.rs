//! Loaders for the settings and dashboard-snapshot JSON files
//!
//! Each file has a strict loader returning [`CoreError`] and a graceful
//! wrapper the engine callers use: a missing or malformed settings file
//! degrades to defaults, a missing or malformed snapshot to `None`. The
//! engine itself never touches the filesystem; callers load here and pass
//! values in.

use crate::error::CoreError;
use spendboard_types::{AppSettings, DashboardSnapshot};
use std::path::Path;
use tracing::{debug, warn};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
    serde_json::from_str(&content).map_err(|e| CoreError::JsonParse {
        path: path.to_path_buf(),
        message: e.to_string(),
        source: e,
    })
}

/// Parse a settings file, surfacing read and parse failures.
pub fn try_load_settings(path: &Path) -> Result<AppSettings, CoreError> {
    read_json(path)
}

/// Load settings with graceful degradation: any failure yields defaults.
pub fn load_settings(path: &Path) -> AppSettings {
    match try_load_settings(path) {
        Ok(settings) => {
            debug!(?path, "Loaded settings");
            settings
        }
        Err(CoreError::FileNotFound { .. }) => {
            // Absent settings file is the common first-run case
            debug!(?path, "Settings file not found, using defaults");
            AppSettings::default()
        }
        Err(e) => {
            warn!(?path, error = %e, "Failed to parse settings, using defaults");
            AppSettings::default()
        }
    }
}

/// Parse a dashboard snapshot file, surfacing read and parse failures.
pub fn try_load_snapshot(path: &Path) -> Result<DashboardSnapshot, CoreError> {
    read_json(path)
}

/// Load a snapshot with graceful degradation: any failure yields `None`,
/// and plan inference is simply skipped downstream.
pub fn load_snapshot(path: &Path) -> Option<DashboardSnapshot> {
    match try_load_snapshot(path) {
        Ok(snapshot) => {
            debug!(?path, "Loaded dashboard snapshot");
            Some(snapshot)
        }
        Err(CoreError::FileNotFound { .. }) => {
            debug!(?path, "Snapshot file not found (optional)");
            None
        }
        Err(e) => {
            warn!(?path, error = %e, "Failed to parse snapshot, skipping");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendboard_types::Appearance;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_valid_settings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
            "appearance": "dark",
            "advanced": {{
                "autoDetectPreferences": true,
                "notificationThresholdPercent": 0.5
            }},
            "overview": {{ "refreshInterval": 120 }}
        }}"#
        )
        .unwrap();

        let settings = try_load_settings(file.path()).unwrap();
        assert_eq!(settings.appearance, Appearance::Dark);
        assert!(settings.advanced.auto_detect_preferences);
        assert_eq!(settings.advanced.notification_threshold_percent, 0.5);
        assert_eq!(settings.overview.refresh_interval, 120);
    }

    #[test]
    fn test_try_load_settings_missing_file() {
        let err = try_load_settings(Path::new("/nonexistent/settings.json")).unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_settings_degrades_to_defaults() {
        let defaults = load_settings(Path::new("/nonexistent/settings.json"));
        assert_eq!(defaults.overview.refresh_interval, 60);

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{{ not json").unwrap();
        let degraded = load_settings(file.path());
        assert_eq!(degraded.appearance, Appearance::System);
    }

    #[test]
    fn test_load_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"usageSummary": {{"limit": 40.0}}}}"#).unwrap();

        let snapshot = load_snapshot(file.path()).unwrap();
        assert_eq!(snapshot.plan_limit(), Some(40.0));
    }

    #[test]
    fn test_load_snapshot_degrades_to_none() {
        assert!(load_snapshot(Path::new("/nonexistent/snapshot.json")).is_none());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json at all").unwrap();
        assert!(load_snapshot(file.path()).is_none());
    }
}
