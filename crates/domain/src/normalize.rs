//! Catalog normalization: raw catalog in, inheritance-resolved model out.
//!
//! Styles receive their parent's `url`, `slug`, `hash` and `query` here,
//! once. Resolution only ever reads the normalized [`Definition`].

use indexmap::IndexMap;
use serde::Serialize;

use crate::catalog::{KeyValues, RawCatalog, RawService, RawStyle, is_blank, is_valid_id};
use crate::category::{self, DEFAULT_CATEGORY};
use crate::error::ValidationError;

/// Everything the URL resolver needs to build a link, plus its display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Definition {
    pub id: String,
    pub name: String,
    pub url: Option<String>,
    pub slug: Option<String>,
    pub hash: Option<KeyValues>,
    pub query: Option<KeyValues>,
    pub hidden: bool,
}

/// A top-level catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Service {
    #[serde(flatten)]
    pub definition: Definition,
    pub category: String,
    pub category_label: String,
    pub github: Option<String>,
    pub gitlab: Option<String>,
    pub osmwiki: Option<String>,
    pub styles: Vec<Style>,
}

/// A named variant of a service with the parent's templates merged in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    #[serde(flatten)]
    pub definition: Definition,
    pub parent_name: String,
    pub title: Option<String>,
}

/// The normalized catalog with its category index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    services: Vec<Service>,
    categories: IndexMap<String, Vec<usize>>,
}

/// One category and its services, in catalog order.
#[derive(Debug)]
pub struct CategoryGroup<'a> {
    pub key: &'a str,
    pub label: &'a str,
    pub services: Vec<&'a Service>,
}

impl Catalog {
    /// All services in catalog order.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Number of services (styles not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Services grouped by category.
    ///
    /// Categories appear in the order they were first seen, services in
    /// catalog order within each category.
    pub fn groups(&self) -> impl Iterator<Item = CategoryGroup<'_>> {
        self.categories.iter().map(|(key, indices)| {
            let services: Vec<&Service> = indices.iter().map(|&i| &self.services[i]).collect();
            let label = services
                .first()
                .map_or(key.as_str(), |s| s.category_label.as_str());
            CategoryGroup {
                key,
                label,
                services,
            }
        })
    }

    /// Look up a service or style definition by its id.
    #[must_use]
    pub fn definition(&self, id: &str) -> Option<&Definition> {
        self.services.iter().find_map(|service| {
            if service.definition.id == id {
                return Some(&service.definition);
            }
            service
                .styles
                .iter()
                .map(|style| &style.definition)
                .find(|def| def.id == id)
        })
    }
}

/// Build the normalized catalog from the raw one.
///
/// # Errors
///
/// Returns [`ValidationError`] for the first service whose key is not a
/// usable id, or the first service or style without a name.
pub fn normalize(raw: &RawCatalog) -> Result<Catalog, ValidationError> {
    let mut catalog = Catalog::default();

    for (service_id, raw_service) in raw {
        let service = normalize_service(service_id, raw_service)?;
        catalog
            .categories
            .entry(service.category.clone())
            .or_default()
            .push(catalog.services.len());
        catalog.services.push(service);
    }

    Ok(catalog)
}

fn normalize_service(id: &str, raw: &RawService) -> Result<Service, ValidationError> {
    if !is_valid_id(id) {
        return Err(ValidationError::InvalidId(id.to_string()));
    }
    let name = required(raw.name.as_deref()).ok_or_else(|| ValidationError::MissingName {
        service: id.to_string(),
    })?;
    let category = raw
        .cat
        .clone()
        .filter(|cat| !cat.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    let definition = Definition {
        id: id.to_string(),
        name,
        url: non_empty(raw.url.as_ref()),
        slug: non_empty(raw.slug.as_ref()),
        hash: raw.hash.clone(),
        query: raw.query.clone(),
        hidden: raw.hidden,
    };

    let styles = raw
        .styles
        .iter()
        .flatten()
        .map(|(style_id, raw_style)| inherit(&definition, style_id, raw_style))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Service {
        category_label: category::label(&category).to_string(),
        category,
        github: raw.github.clone(),
        gitlab: raw.gitlab.clone(),
        osmwiki: raw.osmwiki.clone(),
        styles,
        definition,
    })
}

fn inherit(parent: &Definition, style_id: &str, raw: &RawStyle) -> Result<Style, ValidationError> {
    let name = required(raw.name.as_deref()).ok_or_else(|| ValidationError::MissingStyleName {
        service: parent.id.clone(),
        style: style_id.to_string(),
    })?;

    Ok(Style {
        definition: Definition {
            id: format!("{}-{style_id}", parent.id),
            name,
            url: non_empty(raw.url.as_ref()).or_else(|| parent.url.clone()),
            slug: non_empty(raw.slug.as_ref()).or_else(|| parent.slug.clone()),
            hash: merge(parent.hash.as_ref(), raw.hash.as_ref()),
            query: merge(parent.query.as_ref(), raw.query.as_ref()),
            hidden: raw.hidden,
        },
        parent_name: parent.name.clone(),
        title: raw.title.clone(),
    })
}

/// Overlay `own` on a copy of `inherited`; `own` wins on key collisions.
///
/// Overridden keys keep the parent's position.
fn merge(inherited: Option<&KeyValues>, own: Option<&KeyValues>) -> Option<KeyValues> {
    let Some(inherited) = inherited else {
        return own.cloned();
    };
    let mut merged = inherited.clone();
    if let Some(own) = own {
        for (key, value) in own {
            merged.insert(key.clone(), value.clone());
        }
    }
    Some(merged)
}

fn required(value: Option<&str>) -> Option<String> {
    (!is_blank(value)).then(|| value.unwrap_or_default().to_string())
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
