//! File implementation of [`PreferenceStore`].

use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;

use osmlinks_app::ports::PreferenceStore;
use osmlinks_domain::catalog::expect_object;
use osmlinks_domain::error::OsmLinksError;
use osmlinks_domain::prefs::Preferences;

use crate::error::StorageError;

/// Stores preferences as `{"targetBlank":..,"showVisited":..}` in one file.
///
/// A missing file reads as the default preferences.
pub struct JsonPreferenceFile {
    path: PathBuf,
}

impl JsonPreferenceFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PreferenceStore for JsonPreferenceFile {
    fn load(&self) -> impl Future<Output = Result<Preferences, OsmLinksError>> + Send {
        let path = self.path.clone();
        async move {
            let content = match tokio::fs::read(&path).await {
                Ok(content) => content,
                Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Preferences::default()),
                Err(source) => return Err(StorageError::Io { path, source }.into()),
            };
            let prefs = decode(&content).map_err(|source| StorageError::Json { path, source })?;
            Ok(prefs)
        }
    }

    fn save(&self, prefs: Preferences) -> impl Future<Output = Result<(), OsmLinksError>> + Send {
        let path = self.path.clone();
        async move {
            let content = serde_json::to_vec(&prefs).map_err(|source| StorageError::Json {
                path: path.clone(),
                source,
            })?;
            tokio::fs::write(&path, content)
                .await
                .map_err(|source| StorageError::Io {
                    path: path.clone(),
                    source,
                })?;
            tracing::debug!(path = %path.display(), ?prefs, "preferences saved");
            Ok(())
        }
    }
}

/// Decode a stored document, which must be an object.
fn decode(content: &[u8]) -> Result<Preferences, serde_json::Error> {
    let document: serde_json::Value = serde_json::from_slice(content)?;
    expect_object(&document, "preferences")?;
    serde_json::from_value(document)
}
