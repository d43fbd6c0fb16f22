//! Category keys and their display labels.

/// Category assigned to services that do not declare one.
pub const DEFAULT_CATEGORY: &str = "general";

const LABELS: &[(&str, &str)] = &[
    ("3d", "3D"),
    ("aerial", "Aerial Imagery Sources"),
    ("carto", "Cartography Inspectors"),
    ("changeset", "Changesets"),
    ("compare", "Map Comparisons"),
    ("editor", "Editors"),
    ("general", "General"),
    ("indoor", "Indoor"),
    ("issue", "Validation Issues"),
    ("note", "Notes"),
    ("qa", "QA Visualizations"),
    ("query", "Query Tools"),
    ("mapstyle", "Map Styles"),
    ("router", "Routing Engines"),
    ("sister", "Sister Projects"),
    ("streetlevel", "Street-Level Imagery Sources"),
    ("thematic", "Thematic Viewers"),
    ("trail", "Trail Maps"),
];

/// Resolve a category key to its display label.
///
/// Unknown keys are returned unchanged.
#[must_use]
pub fn label(key: &str) -> &str {
    LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map_or(key, |(_, label)| label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_known_category() {
        assert_eq!(label("router"), "Routing Engines");
        assert_eq!(label(DEFAULT_CATEGORY), "General");
    }

    #[test]
    fn should_fall_back_to_raw_key_when_unknown() {
        assert_eq!(label("bicycle-parking"), "bicycle-parking");
    }
}
