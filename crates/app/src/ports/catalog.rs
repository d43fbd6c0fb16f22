//! Catalog port: where the raw service catalog comes from.

use std::future::Future;

use osmlinks_domain::catalog::RawCatalog;
use osmlinks_domain::error::OsmLinksError;

/// Supplies the raw, un-normalized service catalog.
pub trait CatalogSource {
    /// Fetch and decode the whole catalog.
    fn fetch(&self) -> impl Future<Output = Result<RawCatalog, OsmLinksError>> + Send;
}

impl<T: CatalogSource + Send + Sync> CatalogSource for std::sync::Arc<T> {
    fn fetch(&self) -> impl Future<Output = Result<RawCatalog, OsmLinksError>> + Send {
        (**self).fetch()
    }
}
