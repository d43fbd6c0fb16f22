//! Catalog service: fetch the raw catalog and normalize it.

use osmlinks_domain::catalog::{self, RawCatalog};
use osmlinks_domain::error::{OsmLinksError, ValidationError};
use osmlinks_domain::normalize::{self, Catalog};

use crate::ports::CatalogSource;

/// Application service that turns a [`CatalogSource`] into a [`Catalog`].
pub struct CatalogService<S> {
    source: S,
}

impl<S: CatalogSource> CatalogService<S> {
    /// Create a new service reading from the given source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetch the catalog and build the normalized model.
    ///
    /// # Errors
    ///
    /// Returns [`OsmLinksError::Validation`] when an entry is malformed, or
    /// a storage error propagated from the source.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<Catalog, OsmLinksError> {
        let raw = self.source.fetch().await?;
        let catalog = normalize::normalize(&raw)?;
        let hidden = catalog
            .services()
            .iter()
            .filter(|service| service.definition.hidden)
            .count();
        tracing::info!(
            services = catalog.len(),
            hidden,
            categories = catalog.groups().count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Fetch the catalog and report every schema problem found.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the catalog cannot be read or decoded.
    pub async fn check(&self) -> Result<Vec<ValidationError>, OsmLinksError> {
        let raw: RawCatalog = self.source.fetch().await?;
        let problems = catalog::validate(&raw);
        for problem in &problems {
            tracing::warn!(%problem, "catalog problem");
        }
        Ok(problems)
    }
}
