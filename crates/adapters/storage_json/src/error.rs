//! Storage-specific error type wrapping IO and JSON errors.

use std::path::PathBuf;

use osmlinks_domain::error::OsmLinksError;

/// Errors originating from the JSON file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing the file failed.
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not the expected JSON document.
    #[error("failed to decode {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<StorageError> for OsmLinksError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
