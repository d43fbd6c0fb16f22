//! Preferences port: persistence for display preferences.

use std::future::Future;

use osmlinks_domain::error::OsmLinksError;
use osmlinks_domain::prefs::Preferences;

/// Loads and saves [`Preferences`].
///
/// A store with nothing saved yet returns the defaults.
pub trait PreferenceStore {
    /// Read the stored preferences.
    fn load(&self) -> impl Future<Output = Result<Preferences, OsmLinksError>> + Send;

    /// Replace the stored preferences.
    fn save(&self, prefs: Preferences) -> impl Future<Output = Result<(), OsmLinksError>> + Send;
}

impl<T: PreferenceStore + Send + Sync> PreferenceStore for std::sync::Arc<T> {
    fn load(&self) -> impl Future<Output = Result<Preferences, OsmLinksError>> + Send {
        (**self).load()
    }

    fn save(&self, prefs: Preferences) -> impl Future<Output = Result<(), OsmLinksError>> + Send {
        (**self).save(prefs)
    }
}
