//! File implementation of [`CatalogSource`].

use std::future::Future;
use std::path::{Path, PathBuf};

use osmlinks_app::ports::CatalogSource;
use osmlinks_domain::catalog::{self, RawCatalog};
use osmlinks_domain::error::OsmLinksError;

use crate::error::StorageError;

/// Reads the catalog from a `services.json` file on every fetch.
pub struct JsonCatalogFile {
    path: PathBuf,
}

impl JsonCatalogFile {
    /// Create a source for the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalogFile {
    fn fetch(&self) -> impl Future<Output = Result<RawCatalog, OsmLinksError>> + Send {
        let path = self.path.clone();
        async move {
            let content = tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| StorageError::Io {
                    path: path.clone(),
                    source,
                })?;
            let raw = catalog::parse(&content)
                .map_err(|source| StorageError::Json { path: path.clone(), source })?;
            tracing::debug!(path = %path.display(), entries = raw.len(), "catalog file read");
            Ok(raw)
        }
    }
}
