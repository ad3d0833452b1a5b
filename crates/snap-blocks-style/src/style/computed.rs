//! Computed style values.

use std::collections::HashMap;

use crate::types::parse_px;

/// The resolved property values for one element.
///
/// Values are kept as text; typed accessors interpret the few properties the
/// blocks care about.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    values: HashMap<String, String>,
}

impl ComputedStyle {
    /// Create an empty computed style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a property value (what `getPropertyValue` would report).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Get a custom property value. Missing properties resolve to `""`.
    pub fn property_value(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// The `display` value, defaulting to `block`.
    pub fn display(&self) -> &str {
        self.get("display").unwrap_or("block")
    }

    /// Whether the element generates a box.
    pub fn is_rendered(&self) -> bool {
        !self.display().eq_ignore_ascii_case("none")
    }

    /// The `height` in pixels, if it resolves to a pixel length.
    pub fn height_px(&self) -> Option<f32> {
        self.get("height").and_then(parse_px)
    }

    /// Iterate over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub(crate) fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.values.remove(name);
    }
}
