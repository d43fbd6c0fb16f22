//! Parameter set: the live substitution values used by URL templates.
//!
//! Values come from the `map=<zoom>/<lat>/<lon>` fragment entry and from
//! direct edits. A parameter can be explicitly absent, which is not the
//! same as being `0`.

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Zoom parameter name.
pub const ZOOM: &str = "z";
/// Latitude parameter name.
pub const LAT: &str = "lat";
/// Longitude parameter name.
pub const LON: &str = "lon";
/// Fragment key carrying the viewport.
pub const MAP_KEY: &str = "map";

static VIEWPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\d.]+)/(-?[\d.]+)/(-?[\d.]+)$").expect("viewport pattern is valid")
});

/// A defined parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Number(f64),
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => format_number(*n, f),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Format like a browser stringifies numbers: `-0` reads `0`, and very
/// small or very large magnitudes use exponent notation (`1e-7`, `1e+21`).
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n == 0.0 {
        return f.write_str("0");
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return fmt::Display::fmt(&n, f);
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => write!(f, "{mantissa}e+{power}"),
        _ => f.write_str(&exp),
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A map position: zoom level plus coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub lat: f64,
    pub lon: f64,
}

impl Viewport {
    /// Parse `<zoom>/<lat>/<lon>`.
    ///
    /// Zoom must be unsigned; lat and lon admit a leading minus sign. Each
    /// part is read up to its longest numeric prefix, so `1.2.3` reads as
    /// `1.2`. All three must yield finite numbers.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let caps = VIEWPORT_RE.captures(value)?;
        let number = |i: usize| {
            numeric_prefix(caps.get(i)?.as_str())
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
        };
        Some(Self {
            zoom: number(1)?,
            lat: number(2)?,
            lon: number(3)?,
        })
    }
}

/// Longest prefix of `value` shaped like `-?digits[.digits]`.
fn numeric_prefix(value: &str) -> &str {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in value.char_indices() {
        match c {
            '-' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            c if c.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    &value[..end]
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            ParamValue::Number(self.zoom),
            ParamValue::Number(self.lat),
            ParamValue::Number(self.lon)
        )
    }
}

/// Look up `key` in a fragment or query string (`a=1&b=2`).
///
/// A leading `#` or `?` is ignored and values are percent-decoded.
/// Returns the first matching value.
#[must_use]
pub fn fragment_value(fragment: &str, key: &str) -> Option<String> {
    let fragment = fragment.trim_start_matches(['#', '?']);
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Parameter name → value, where `None` marks an explicitly absent value.
///
/// Names are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    values: IndexMap<String, Option<ParamValue>>,
}

impl ParameterSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set whose viewport comes from `fragment`.
    #[must_use]
    pub fn from_fragment(fragment: &str) -> Self {
        let mut params = Self::new();
        params.load_from_fragment(fragment);
        params
    }

    /// Defined value of `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(&name.to_lowercase()).and_then(Option::as_ref)
    }

    /// Whether `name` currently has a defined value.
    #[must_use]
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set `name` to a defined value.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.values.insert(name.to_lowercase(), Some(value.into()));
    }

    /// Mark `name` as absent.
    pub fn unset(&mut self, name: &str) {
        self.values.insert(name.to_lowercase(), None);
    }

    /// Replace zoom/lat/lon from the fragment's `map` entry.
    ///
    /// When the entry is missing or malformed all three become absent;
    /// a partial parse is never merged. Other parameters are kept.
    pub fn load_from_fragment(&mut self, fragment: &str) {
        let viewport = fragment_value(fragment, MAP_KEY).and_then(|map| Viewport::parse(&map));
        self.set_viewport(viewport);
    }

    /// Replace zoom/lat/lon, or mark all three absent.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        match viewport {
            Some(vp) => {
                self.set(ZOOM, vp.zoom);
                self.set(LAT, vp.lat);
                self.set(LON, vp.lon);
            }
            None => {
                self.unset(ZOOM);
                self.unset(LAT);
                self.unset(LON);
            }
        }
    }

    /// Put the viewport at `0/0/0`, as when starting to add a location.
    pub fn reset_viewport_to_origin(&mut self) {
        self.set_viewport(Some(Viewport {
            zoom: 0.0,
            lat: 0.0,
            lon: 0.0,
        }));
    }

    /// The current viewport when zoom, lat and lon are all defined numbers.
    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        let number = |name| match self.get(name) {
            Some(ParamValue::Number(n)) => Some(*n),
            _ => None,
        };
        Some(Viewport {
            zoom: number(ZOOM)?,
            lat: number(LAT)?,
            lon: number(LON)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_viewport_with_negative_coordinates() {
        let vp = Viewport::parse("14/39.9524/-75.1636").unwrap();
        assert_eq!(vp.zoom, 14.0);
        assert_eq!(vp.lat, 39.9524);
        assert_eq!(vp.lon, -75.1636);
    }

    #[test]
    fn should_reject_viewport_with_negative_zoom() {
        assert!(Viewport::parse("-1/0/0").is_none());
    }

    #[test]
    fn should_reject_malformed_viewport() {
        assert!(Viewport::parse("14/39.95").is_none());
        assert!(Viewport::parse("a/b/c").is_none());
        assert!(Viewport::parse("./4/5").is_none());
        assert!(Viewport::parse("14/-/5").is_none());
        assert!(Viewport::parse("").is_none());
    }

    #[test]
    fn should_read_longest_numeric_prefix_of_each_part() {
        let vp = Viewport::parse("1.2.3/4/5").unwrap();
        assert_eq!(vp.to_string(), "1.2/4/5");

        let vp = Viewport::parse("14/1..5/-2.5.1").unwrap();
        assert_eq!(vp.to_string(), "14/1/-2.5");

        let vp = Viewport::parse("14./.5/5").unwrap();
        assert_eq!(vp.to_string(), "14/0.5/5");
    }

    #[test]
    fn should_format_viewport_like_the_fragment() {
        let vp = Viewport {
            zoom: 14.0,
            lat: 39.9524,
            lon: -75.1636,
        };
        assert_eq!(vp.to_string(), "14/39.9524/-75.1636");
    }

    #[test]
    fn should_read_fragment_value() {
        assert_eq!(
            fragment_value("#map=14/1/2&layer=C", "map").as_deref(),
            Some("14/1/2")
        );
        assert_eq!(
            fragment_value("?q=caf%C3%A9+bar", "q").as_deref(),
            Some("café bar")
        );
        assert!(fragment_value("map=1/2/3", "zoom").is_none());
    }

    #[test]
    fn should_load_viewport_from_fragment() {
        let params = ParameterSet::from_fragment("#map=14/39.9524/-75.1636");
        assert_eq!(params.get("z"), Some(&ParamValue::Number(14.0)));
        assert_eq!(params.get("lat"), Some(&ParamValue::Number(39.9524)));
        assert_eq!(params.get("lon"), Some(&ParamValue::Number(-75.1636)));
    }

    #[test]
    fn should_unset_whole_viewport_when_fragment_malformed() {
        let mut params = ParameterSet::from_fragment("map=10/1/2");
        params.load_from_fragment("map=10/1");
        assert!(!params.is_set(ZOOM));
        assert!(!params.is_set(LAT));
        assert!(!params.is_set(LON));
        assert!(params.viewport().is_none());
    }

    #[test]
    fn should_keep_other_parameters_when_reloading_fragment() {
        let mut params = ParameterSet::new();
        params.set("layer", "cycle");
        params.load_from_fragment("");
        assert_eq!(params.get("layer"), Some(&ParamValue::from("cycle")));
    }

    #[test]
    fn should_distinguish_origin_from_absent() {
        let mut params = ParameterSet::new();
        assert!(params.viewport().is_none());

        params.reset_viewport_to_origin();
        let vp = params.viewport().unwrap();
        assert_eq!((vp.zoom, vp.lat, vp.lon), (0.0, 0.0, 0.0));
    }

    #[test]
    fn should_match_names_case_insensitively() {
        let mut params = ParameterSet::new();
        params.set("Lat", 1.5);
        assert_eq!(params.get("LAT"), Some(&ParamValue::Number(1.5)));
    }

    #[test]
    fn should_display_negative_zero_as_zero() {
        assert_eq!(ParamValue::Number(-0.0).to_string(), "0");
        let params = ParameterSet::from_fragment("map=3/-0/0");
        assert_eq!(params.get(LAT).unwrap().to_string(), "0");
    }

    #[test]
    fn should_use_exponent_notation_for_extreme_magnitudes() {
        assert_eq!(ParamValue::Number(0.000_000_1).to_string(), "1e-7");
        assert_eq!(ParamValue::Number(-0.000_000_15).to_string(), "-1.5e-7");
        assert_eq!(ParamValue::Number(1e21).to_string(), "1e+21");
        assert_eq!(ParamValue::Number(0.000_001).to_string(), "0.000001");
    }

    #[test]
    fn should_display_integral_numbers_without_decimal_point() {
        assert_eq!(ParamValue::Number(14.0).to_string(), "14");
        assert_eq!(ParamValue::Number(-75.1636).to_string(), "-75.1636");
    }
}
