//! Shared application state for axum handlers.

use std::sync::Arc;

use osmlinks_app::ports::PreferenceStore;
use osmlinks_app::services::directory_service::DirectoryService;

/// Application state shared across all axum handlers.
///
/// Generic over the preference store to avoid dynamic dispatch.
/// `Clone` is implemented manually so the store itself does not need to be
/// `Clone`: only the `Arc` wrapper is cloned.
pub struct AppState<P> {
    /// Directory service over the loaded catalog.
    pub directory_service: Arc<DirectoryService<P>>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            directory_service: Arc::clone(&self.directory_service),
        }
    }
}

impl<P> AppState<P>
where
    P: PreferenceStore + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(directory_service: DirectoryService<P>) -> Self {
        Self {
            directory_service: Arc::new(directory_service),
        }
    }

    /// Create a new application state from a pre-wrapped `Arc` service.
    pub fn from_arc(directory_service: Arc<DirectoryService<P>>) -> Self {
        Self { directory_service }
    }
}
