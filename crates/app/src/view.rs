//! View model: what a renderer needs to draw the directory.
//!
//! Built fresh from the catalog and a [`DirectoryState`] on every render.
//! All hrefs are already resolved; renderers never touch templates.

use serde::Serialize;

use osmlinks_domain::normalize::{Catalog, Service, Style};
use osmlinks_domain::params::{ParameterSet, Viewport};
use osmlinks_domain::prefs::Preferences;
use osmlinks_domain::template::resolve_url;

use crate::state::DirectoryState;

/// Viewport used by the "Example" link when no viewport is set.
pub const EXAMPLE_VIEWPORT: &str = "14/39.9524/-75.1636";

/// The whole directory page.
#[derive(Debug, Clone, Serialize)]
pub struct DirectoryView {
    /// Set when zoom, lat and lon are all defined.
    pub viewport: Option<Viewport>,
    pub prefs: Preferences,
    pub filter: String,
    pub sections: Vec<SectionView>,
}

/// One category heading and its matching services.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub key: String,
    pub label: String,
    pub services: Vec<ServiceView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceView {
    pub id: String,
    pub name: String,
    /// `None` when the service is not clickable.
    pub href: Option<String>,
    pub icons: Vec<IconLink>,
    pub styles: Vec<StyleView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StyleView {
    pub id: String,
    pub name: String,
    pub href: Option<String>,
    /// Tooltip; defaults to "<style> on <service>".
    pub title: String,
}

/// Which external project page an icon points to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Github,
    Gitlab,
    OsmWiki,
}

impl IconKind {
    fn prefix(self) -> &'static str {
        match self {
            Self::Github => "https://github.com/",
            Self::Gitlab => "https://gitlab.com/",
            Self::OsmWiki => "https://wiki.openstreetmap.org/wiki/",
        }
    }

    /// Image shown for the icon.
    #[must_use]
    pub fn image(self) -> &'static str {
        match self {
            Self::Github => "img/github.svg",
            Self::Gitlab => "img/gitlab.svg",
            Self::OsmWiki => "img/osmwiki.svg",
        }
    }

    /// Accessible label for the icon.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Github => "GitHub",
            Self::Gitlab => "GitLab",
            Self::OsmWiki => "OSM Wiki",
        }
    }
}

/// A link to a project page, derived from an identifier without templating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconLink {
    pub kind: IconKind,
    pub href: String,
}

impl IconLink {
    fn new(kind: IconKind, id: &str) -> Self {
        Self {
            kind,
            href: format!("{}{id}", kind.prefix()),
        }
    }
}

/// Whether `service` matches an already trimmed, lower-cased filter.
///
/// An empty filter matches everything.
#[must_use]
pub fn matches_filter(service: &Service, filter: &str) -> bool {
    filter.is_empty()
        || service.definition.name.to_lowercase().contains(filter)
        || service.category_label.to_lowercase().contains(filter)
}

/// Build the directory view for `state`.
#[must_use]
pub fn build(catalog: &Catalog, state: &DirectoryState) -> DirectoryView {
    let filter = state.normalized_filter();

    let sections = catalog
        .groups()
        .filter_map(|group| {
            let services: Vec<ServiceView> = group
                .services
                .into_iter()
                .filter(|service| !service.definition.hidden)
                .filter(|service| matches_filter(service, &filter))
                .map(|service| service_view(service, &state.params))
                .collect();
            (!services.is_empty()).then(|| SectionView {
                key: group.key.to_string(),
                label: group.label.to_string(),
                services,
            })
        })
        .collect();

    DirectoryView {
        viewport: state.params.viewport(),
        prefs: state.prefs,
        filter: state.filter.clone(),
        sections,
    }
}

fn service_view(service: &Service, params: &ParameterSet) -> ServiceView {
    let icons = [
        (IconKind::Github, &service.github),
        (IconKind::Gitlab, &service.gitlab),
        (IconKind::OsmWiki, &service.osmwiki),
    ]
    .into_iter()
    .filter_map(|(kind, id)| id.as_deref().map(|id| IconLink::new(kind, id)))
    .collect();

    ServiceView {
        id: service.definition.id.clone(),
        name: service.definition.name.clone(),
        href: resolve_url(&service.definition, params),
        icons,
        styles: service
            .styles
            .iter()
            .filter(|style| !style.definition.hidden)
            .map(|style| style_view(style, params))
            .collect(),
    }
}

fn style_view(style: &Style, params: &ParameterSet) -> StyleView {
    StyleView {
        id: style.definition.id.clone(),
        name: style.definition.name.clone(),
        href: resolve_url(&style.definition, params),
        title: style
            .title
            .clone()
            .unwrap_or_else(|| format!("{} on {}", style.definition.name, style.parent_name)),
    }
}
