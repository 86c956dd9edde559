//! Writing the developer status export to disk
//!
//! The engine only composes the [`DeveloperExport`] value; putting it on
//! disk is this separate, caller-driven step, so evaluation itself stays
//! free of side effects.

use anyhow::{Context, Result};
use spendboard_types::DeveloperExport;

/// Write the status line to the export path (created/overwritten),
/// newline-terminated so `cat` and prompt integrations read it cleanly.
///
/// # Errors
/// Returns error if directory creation or the file write fails
pub fn write_status_export(export: &DeveloperExport) -> Result<()> {
    let path = &export.export_path;

    // Create parent directory if needed
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, format!("{}\n", export.status_line))
        .with_context(|| format!("Failed to write status file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample_export(path: std::path::PathBuf) -> DeveloperExport {
        DeveloperExport {
            status_line: "$4.20 today | burn rate elevated".to_string(),
            export_path: path,
            written_at: Utc.with_ymd_and_hms(2026, 2, 3, 14, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_write_status_export() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.txt");

        write_status_export(&sample_export(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "$4.20 today | burn rate elevated\n");
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join(".spendboard/exports/status.txt");

        write_status_export(&sample_export(nested.clone())).unwrap();

        assert!(nested.exists());
    }

    #[test]
    fn test_overwrites_previous_status() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.txt");
        std::fs::write(&path, "stale line\n").unwrap();

        write_status_export(&sample_export(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "$4.20 today | burn rate elevated\n");
    }
}
