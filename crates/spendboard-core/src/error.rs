//! Error types for spendboard-core
//!
//! The evaluate pass itself never fails; these errors belong to the
//! collaborator layer (settings/snapshot loading) where a caller may want
//! to distinguish a missing file from a malformed one.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for spendboard collaborator operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CoreError {
    /// Map an I/O error to the matching variant, keeping NotFound distinct
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::FileRead {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}
