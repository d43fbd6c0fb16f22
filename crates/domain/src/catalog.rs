//! Raw service catalog as decoded from `services.json`.
//!
//! The raw types mirror the JSON document one-to-one and keep key order.
//! They are turned into the normalized model by [`crate::normalize`].

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationError;

/// Ordered template mapping used for the `#...` and `?...` URL parts.
///
/// A `None` value renders as a bare key without `=value`.
pub type KeyValues = IndexMap<String, Option<String>>;

/// The whole catalog: service id → raw service, in document order.
pub type RawCatalog = IndexMap<String, RawService>;

/// A service entry exactly as written in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawService {
    pub name: Option<String>,
    pub cat: Option<String>,
    pub url: Option<String>,
    pub slug: Option<String>,
    pub hash: Option<KeyValues>,
    pub query: Option<KeyValues>,
    pub styles: Option<IndexMap<String, RawStyle>>,
    pub hidden: bool,
    pub github: Option<String>,
    pub gitlab: Option<String>,
    pub osmwiki: Option<String>,
}

/// A named variant of a service (e.g. an alternate map style).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawStyle {
    pub name: Option<String>,
    pub url: Option<String>,
    pub slug: Option<String>,
    pub hash: Option<KeyValues>,
    pub query: Option<KeyValues>,
    pub hidden: bool,
    pub title: Option<String>,
}

/// Decode a catalog document.
///
/// # Errors
///
/// Returns the underlying [`serde_json::Error`] when the document is not a
/// JSON object of service entries. Services and styles written as arrays
/// are rejected even though serde would accept them positionally.
pub fn parse(json: &str) -> Result<RawCatalog, serde_json::Error> {
    let document: Value = serde_json::from_str(json)?;
    let services = expect_object(&document, "catalog")?;
    for (service_id, service) in services {
        let service = expect_object(service, service_id)?;
        if let Some(styles) = service.get("styles").filter(|v| !v.is_null()) {
            for (style_id, style) in expect_object(styles, service_id)? {
                expect_object(style, style_id)?;
            }
        }
    }
    serde_json::from_value(document)
}

/// Borrow `value` as a JSON object, or fail naming `what`.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] when `value` is anything but an object.
pub fn expect_object<'a>(
    value: &'a Value,
    what: &str,
) -> Result<&'a serde_json::Map<String, Value>, serde_json::Error> {
    value
        .as_object()
        .ok_or_else(|| serde_json::Error::custom(format!("`{what}` must be a JSON object")))
}

/// Whether a service key can be used as an id.
pub(crate) fn is_valid_id(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(char::is_whitespace)
}

/// Check every entry of the catalog and collect all problems found.
///
/// This is the offline schema check run before publishing a catalog; the
/// normalizer only fails on the first missing name.
#[must_use]
pub fn validate(catalog: &RawCatalog) -> Vec<ValidationError> {
    let mut problems = Vec::new();

    for (service_id, service) in catalog {
        if !is_valid_id(service_id) {
            problems.push(ValidationError::InvalidId(service_id.clone()));
        }
        if is_blank(service.name.as_deref()) {
            problems.push(ValidationError::MissingName {
                service: service_id.clone(),
            });
        }
        let Some(styles) = &service.styles else {
            continue;
        };
        for (style_id, style) in styles {
            if is_blank(style.name.as_deref()) {
                problems.push(ValidationError::MissingStyleName {
                    service: service_id.clone(),
                    style: style_id.clone(),
                });
            }
        }
    }

    problems
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "osmorg": {
            "name": "openstreetmap.org",
            "cat": "general",
            "url": "https://www.openstreetmap.org/",
            "hash": { "map": "{{z}}/{{lat}}/{{lon}}" },
            "github": "openstreetmap/openstreetmap-website",
            "styles": {
                "cycle": { "name": "CyclOSM", "hash": { "layers": "Y" } }
            }
        },
        "overpass": {
            "name": "Overpass Turbo",
            "cat": "query",
            "url": "https://overpass-turbo.eu/",
            "query": { "C": "{{lat}};{{lon}};{{z}}", "R": null }
        }
    }"#;

    #[test]
    fn should_preserve_document_order() {
        let catalog = parse(SAMPLE).unwrap();
        let keys: Vec<&str> = catalog.keys().map(String::as_str).collect();
        assert_eq!(keys, ["osmorg", "overpass"]);
    }

    #[test]
    fn should_preserve_key_order_inside_templates() {
        let catalog = parse(
            r#"{ "s": { "name": "S", "query": { "z": "1", "a": "2", "m": null } } }"#,
        )
        .unwrap();
        let keys: Vec<&str> = catalog["s"]
            .query
            .as_ref()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn should_decode_null_values_as_bare_flags() {
        let catalog = parse(SAMPLE).unwrap();
        let query = catalog["overpass"].query.as_ref().unwrap();
        assert_eq!(query.get("R"), Some(&None));
        assert_eq!(
            query.get("C"),
            Some(&Some("{{lat}};{{lon}};{{z}}".to_string()))
        );
    }

    #[test]
    fn should_ignore_unknown_fields() {
        let catalog = parse(r#"{ "x": { "name": "X", "description": "extra" } }"#).unwrap();
        assert_eq!(catalog["x"].name.as_deref(), Some("X"));
    }

    #[test]
    fn should_reject_non_object_document() {
        assert!(parse("[1, 2, 3]").is_err());
    }

    #[test]
    fn should_reject_service_written_as_array() {
        assert!(parse(r#"{ "x": ["X"] }"#).is_err());
    }

    #[test]
    fn should_reject_style_written_as_array() {
        assert!(parse(r#"{ "x": { "name": "X", "styles": { "s": ["S"] } } }"#).is_err());
    }

    #[test]
    fn should_accept_null_styles() {
        let catalog = parse(r#"{ "x": { "name": "X", "styles": null } }"#).unwrap();
        assert!(catalog["x"].styles.is_none());
    }

    #[test]
    fn should_report_no_problems_for_valid_catalog() {
        let catalog = parse(SAMPLE).unwrap();
        assert!(validate(&catalog).is_empty());
    }

    #[test]
    fn should_report_every_missing_name() {
        let catalog = parse(
            r#"{
                "a": { "url": "https://a.example/" },
                "b": { "name": "B", "styles": { "s1": {}, "s2": { "name": " " } } }
            }"#,
        )
        .unwrap();

        let problems = validate(&catalog);
        assert_eq!(
            problems,
            vec![
                ValidationError::MissingName {
                    service: "a".to_string()
                },
                ValidationError::MissingStyleName {
                    service: "b".to_string(),
                    style: "s1".to_string()
                },
                ValidationError::MissingStyleName {
                    service: "b".to_string(),
                    style: "s2".to_string()
                },
            ]
        );
    }

    #[test]
    fn should_report_ids_with_whitespace() {
        let catalog = parse(r#"{ "bad id": { "name": "Bad" } }"#).unwrap();
        assert_eq!(
            validate(&catalog),
            vec![ValidationError::InvalidId("bad id".to_string())]
        );
    }
}
