//! Computed style values as reported by the rendering surface.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A property → value map of resolved CSS values (`"background-color" → "rgb(255, 0, 0)"`).
/// Property names are kebab-case, as `getComputedStyle` reports them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComputedStyle(IndexMap<String, String>);

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    /// Returns the trimmed value of `property`, or `None` if it is missing or empty.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0
            .get(property)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Returns the value of `property`, or `""` if missing.
    pub fn value(&self, property: &str) -> &str {
        self.get(property).unwrap_or("")
    }

    /// Parses `property` as a pixel length.
    pub fn px(&self, property: &str) -> Option<f64> {
        self.get(property).and_then(parse_px)
    }

    /// Like [`ComputedStyle::px`], defaulting to `0.0`.
    pub fn px_or_zero(&self, property: &str) -> f64 {
        self.px(property).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_hidden(&self) -> bool {
        self.get("display") == Some("none") || self.get("visibility") == Some("hidden")
    }
}

/// Parses a CSS length in pixels (`"12px"`, `"12.5px"`, `"0"`). Other units yield `None`.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_px() {
        assert_eq!(parse_px("12px"), Some(12.0));
        assert_eq!(parse_px(" 0.5px "), Some(0.5));
        assert_eq!(parse_px("0"), Some(0.0));
        assert_eq!(parse_px("normal"), None);
        assert_eq!(parse_px("2em"), None);
        assert_eq!(parse_px(""), None);
    }

    #[test]
    fn test_empty_values_are_missing() {
        let style = ComputedStyle::from_pairs([("color", "  "), ("font-size", "16px")]);
        assert_eq!(style.get("color"), None);
        assert_eq!(style.value("color"), "");
        assert_eq!(style.px("font-size"), Some(16.0));
        assert_eq!(style.px_or_zero("letter-spacing"), 0.0);
    }
}
