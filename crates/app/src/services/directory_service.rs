//! Directory service: use-cases for browsing the normalized catalog.

use serde::Serialize;

use osmlinks_domain::error::{NotFoundError, OsmLinksError};
use osmlinks_domain::normalize::Catalog;
use osmlinks_domain::params::ParameterSet;
use osmlinks_domain::prefs::{PreferenceKey, Preferences};
use osmlinks_domain::template::resolve_url;

use crate::ports::PreferenceStore;
use crate::state::DirectoryState;
use crate::view::{self, DirectoryView};

/// A definition together with its link for a given parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedLink {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
}

/// Application service over a loaded catalog and a preference store.
pub struct DirectoryService<P> {
    catalog: Catalog,
    prefs: P,
}

impl<P: PreferenceStore> DirectoryService<P> {
    /// Create a new service for an already normalized catalog.
    pub fn new(catalog: Catalog, prefs: P) -> Self {
        Self { catalog, prefs }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the session state for a fragment (or query string) and filter.
    ///
    /// Stored preferences that cannot be read fall back to the defaults.
    pub async fn state_for(&self, fragment: &str, filter: &str) -> DirectoryState {
        let prefs = match self.prefs.load().await {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load preferences, using defaults");
                Preferences::default()
            }
        };
        let mut state = DirectoryState::new(fragment, prefs);
        state.set_filter(filter);
        state
    }

    /// Render the directory for `state`.
    #[must_use]
    pub fn render(&self, state: &DirectoryState) -> DirectoryView {
        let view = view::build(&self.catalog, state);
        tracing::debug!(
            sections = view.sections.len(),
            filter = %state.filter,
            "directory rendered"
        );
        view
    }

    /// Current stored preferences.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the preference store.
    pub async fn preferences(&self) -> Result<Preferences, OsmLinksError> {
        self.prefs.load().await
    }

    /// Replace all stored preferences.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the preference store.
    #[tracing::instrument(skip(self))]
    pub async fn save_preferences(&self, prefs: Preferences) -> Result<(), OsmLinksError> {
        self.prefs.save(prefs).await
    }

    /// Change one preference flag and persist the result.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the preference store.
    #[tracing::instrument(skip(self))]
    pub async fn set_preference(
        &self,
        key: PreferenceKey,
        value: bool,
    ) -> Result<Preferences, OsmLinksError> {
        let mut prefs = self.prefs.load().await?;
        prefs.set(key, value);
        self.prefs.save(prefs).await?;
        Ok(prefs)
    }

    /// Resolve the link of one service or style.
    ///
    /// # Errors
    ///
    /// Returns [`OsmLinksError::NotFound`] when no definition has `id`.
    pub fn resolve(&self, id: &str, params: &ParameterSet) -> Result<ResolvedLink, OsmLinksError> {
        let definition = self.catalog.definition(id).ok_or_else(|| NotFoundError {
            kind: "Definition",
            id: id.to_string(),
        })?;
        Ok(ResolvedLink {
            id: definition.id.clone(),
            name: definition.name.clone(),
            url: resolve_url(definition, params),
        })
    }

    /// Resolve every service and style link, in catalog order.
    #[must_use]
    pub fn resolve_all(&self, params: &ParameterSet) -> Vec<ResolvedLink> {
        self.catalog
            .services()
            .iter()
            .flat_map(|service| {
                std::iter::once(&service.definition)
                    .chain(service.styles.iter().map(|style| &style.definition))
            })
            .map(|definition| ResolvedLink {
                id: definition.id.clone(),
                name: definition.name.clone(),
                url: resolve_url(definition, params),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osmlinks_domain::catalog::parse;
    use osmlinks_domain::normalize::normalize;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryPrefs {
        stored: Mutex<Option<Preferences>>,
    }

    impl PreferenceStore for InMemoryPrefs {
        fn load(&self) -> impl Future<Output = Result<Preferences, OsmLinksError>> + Send {
            let prefs = self.stored.lock().unwrap().unwrap_or_default();
            async move { Ok(prefs) }
        }

        fn save(&self, prefs: Preferences) -> impl Future<Output = Result<(), OsmLinksError>> + Send {
            *self.stored.lock().unwrap() = Some(prefs);
            async { Ok(()) }
        }
    }

    struct BrokenPrefs;

    impl PreferenceStore for BrokenPrefs {
        fn load(&self) -> impl Future<Output = Result<Preferences, OsmLinksError>> + Send {
            async { Err(OsmLinksError::Storage("disk on fire".into())) }
        }

        fn save(&self, _prefs: Preferences) -> impl Future<Output = Result<(), OsmLinksError>> + Send {
            async { Err(OsmLinksError::Storage("disk on fire".into())) }
        }
    }

    fn catalog() -> Catalog {
        normalize(
            &parse(
                r#"{
                    "osmorg": {
                        "name": "openstreetmap.org",
                        "url": "https://www.openstreetmap.org/",
                        "hash": { "map": "{{z}}/{{lat}}/{{lon}}" },
                        "styles": { "cycle": { "name": "CyclOSM", "query": { "layers": "Y" } } }
                    },
                    "wiki": { "name": "OSM Wiki", "cat": "sister" }
                }"#,
            )
            .unwrap(),
        )
        .unwrap()
    }

    fn make_service() -> DirectoryService<InMemoryPrefs> {
        DirectoryService::new(catalog(), InMemoryPrefs::default())
    }

    #[tokio::test]
    async fn should_build_state_from_fragment_and_stored_prefs() {
        let svc = make_service();
        svc.set_preference(PreferenceKey::TargetBlank, true)
            .await
            .unwrap();

        let state = svc.state_for("map=2/3/4", "osm").await;
        assert!(state.prefs.target_blank);
        assert_eq!(state.filter, "osm");
        assert_eq!(state.params.viewport().unwrap().to_string(), "2/3/4");
    }

    #[tokio::test]
    async fn should_fall_back_to_default_prefs_when_store_fails() {
        let svc = DirectoryService::new(catalog(), BrokenPrefs);
        let state = svc.state_for("", "").await;
        assert_eq!(state.prefs, Preferences::default());
    }

    #[tokio::test]
    async fn should_persist_preference_changes() {
        let svc = make_service();
        svc.set_preference(PreferenceKey::ShowVisited, true)
            .await
            .unwrap();
        let prefs = svc.set_preference(PreferenceKey::TargetBlank, true)
            .await
            .unwrap();

        assert!(prefs.show_visited);
        assert_eq!(svc.preferences().await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn should_propagate_store_error_when_setting_preference() {
        let svc = DirectoryService::new(catalog(), BrokenPrefs);
        let result = svc.set_preference(PreferenceKey::ShowVisited, true).await;
        assert!(matches!(result, Err(OsmLinksError::Storage(_))));
    }

    #[test]
    fn should_resolve_style_link_by_id() {
        let svc = make_service();
        let link = svc
            .resolve("osmorg-cycle", &ParameterSet::from_fragment("map=5/1/2"))
            .unwrap();
        assert_eq!(
            link.url.as_deref(),
            Some("https://www.openstreetmap.org/#map=5/1/2?layers=Y")
        );
    }

    #[test]
    fn should_return_not_found_for_unknown_id() {
        let svc = make_service();
        let result = svc.resolve("nope", &ParameterSet::new());
        assert!(matches!(result, Err(OsmLinksError::NotFound(_))));
    }

    #[test]
    fn should_resolve_all_definitions_in_catalog_order() {
        let svc = make_service();
        let links = svc.resolve_all(&ParameterSet::new());
        let ids: Vec<&str> = links.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["osmorg", "osmorg-cycle", "wiki"]);
        assert!(links[2].url.is_none());
    }

    #[test]
    fn should_render_view_from_state() {
        let svc = make_service();
        let view = svc.render(&DirectoryState::default());
        assert_eq!(view.sections.len(), 2);
    }
}
