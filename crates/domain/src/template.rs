//! URL templating: turn a [`Definition`] plus a [`ParameterSet`] into a link.
//!
//! Tokens look like `{{name}}` or `{{name|fallback}}`. A token whose
//! parameter is absent and has no fallback stays in the string verbatim;
//! callers detect that with [`is_resolved`] and drop the affected URL part:
//!
//! - the whole slug, when any of its tokens is unresolved;
//! - a single hash/query entry, when its value is unresolved.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::catalog::KeyValues;
use crate::normalize::Definition;
use crate::params::ParameterSet;

/// Opening marker of a token.
pub const TOKEN_MARKER: &str = "{{";

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{([^{}|]+)(?:\|([^{}]*))?\}\}").expect("token pattern is valid")
});

/// Whether `value` still contains a token marker.
#[must_use]
pub fn is_resolved(value: &str) -> bool {
    !value.contains(TOKEN_MARKER)
}

/// Substitute every token in `template` from `params`.
///
/// Strings without a token marker are returned unchanged (and unallocated).
#[must_use]
pub fn resolve_tokens<'a>(template: &'a str, params: &ParameterSet) -> Cow<'a, str> {
    if is_resolved(template) {
        return Cow::Borrowed(template);
    }
    TOKEN_RE.replace_all(template, |caps: &Captures<'_>| {
        let name = &caps[1];
        match (params.get(name), caps.get(2)) {
            (Some(value), _) => value.to_string(),
            (None, Some(fallback)) => fallback.as_str().to_string(),
            (None, None) => caps[0].to_string(),
        }
    })
}

/// Render an ordered hash/query mapping as `k=v&flag&positional`.
///
/// Entries whose value cannot be fully resolved are left out entirely.
#[must_use]
pub fn build_key_values(mapping: &KeyValues, params: &ParameterSet) -> String {
    let mut parts: Vec<Cow<'_, str>> = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let Some(value) = value else {
            parts.push(Cow::Borrowed(key.as_str()));
            continue;
        };
        let value = resolve_tokens(value, params);
        if !is_resolved(&value) {
            continue;
        }
        if key.is_empty() {
            parts.push(value);
        } else {
            parts.push(Cow::Owned(format!("{key}={value}")));
        }
    }

    parts.join("&")
}

/// Build the full link for `definition`.
///
/// Returns `None` when the definition has no base `url`, meaning it is not
/// clickable.
#[must_use]
pub fn resolve_url(definition: &Definition, params: &ParameterSet) -> Option<String> {
    let mut url = definition.url.clone()?;

    if let Some(slug) = &definition.slug {
        let slug = resolve_tokens(slug, params);
        if is_resolved(&slug) {
            url.push_str(&slug);
        }
    }
    if let Some(hash) = &definition.hash {
        append_part(&mut url, '#', &build_key_values(hash, params));
    }
    if let Some(query) = &definition.query {
        append_part(&mut url, '?', &build_key_values(query, params));
    }

    Some(url)
}

fn append_part(url: &mut String, separator: char, part: &str) {
    if !part.is_empty() {
        url.push(separator);
        url.push_str(part);
    }
}
