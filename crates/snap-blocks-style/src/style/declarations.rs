//! Ordered property declarations (a rule body or a `style` attribute).

use std::fmt;

/// A single `name: value` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name. Standard properties are lowercased; custom properties
    /// (`--*`) keep their case.
    pub name: String,
    /// The raw value text, trimmed, without any `!important` marker.
    pub value: String,
    /// Whether the declaration carried `!important`.
    pub important: bool,
}

impl Declaration {
    /// Create a normal-importance declaration.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: normalize_name(name.into()),
            value: value.into().trim().to_string(),
            important: false,
        }
    }

    /// Whether this declares a custom property (`--name`).
    pub fn is_custom_property(&self) -> bool {
        is_custom_property(&self.name)
    }
}

/// Whether a property name denotes a custom property.
pub fn is_custom_property(name: &str) -> bool {
    name.starts_with("--")
}

pub(crate) fn normalize_name(name: String) -> String {
    if is_custom_property(&name) {
        name
    } else {
        name.to_ascii_lowercase()
    }
}

/// An ordered declaration block.
///
/// Setting a property that is already present replaces it in place, matching
/// how `element.style.setProperty` behaves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    entries: Vec<Declaration>,
}

impl Declarations {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a declaration list such as the contents of a `style` attribute.
    ///
    /// Malformed declarations are skipped.
    pub fn parse(text: &str) -> Self {
        crate::parser::parse_declaration_list(text)
    }

    /// Get the value of a property.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|declaration| declaration.name == name)
            .map(|declaration| declaration.value.as_str())
    }

    /// Set a property, replacing any existing declaration of it.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.push(Declaration::new(name, value));
    }

    /// Append a declaration, replacing any existing declaration of the same name.
    pub fn push(&mut self, declaration: Declaration) {
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|existing| existing.name == declaration.name)
        {
            *existing = declaration;
        } else {
            self.entries.push(declaration);
        }
    }

    /// Remove a property, returning its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let position = self.entries.iter().position(|d| d.name == name)?;
        Some(self.entries.remove(position).value)
    }

    /// Iterate declarations in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Declarations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, declaration) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}: {}", declaration.name, declaration.value)?;
            if declaration.important {
                write!(f, " !important")?;
            }
            write!(f, ";")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut declarations = Declarations::new();
        declarations.set("height", "120px");
        declarations.set("display", "none");
        declarations.set("HEIGHT", "80px");

        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations.get("height"), Some("80px"));
        assert_eq!(declarations.to_string(), "height: 80px; display: none;");
    }

    #[test]
    fn custom_properties_keep_case() {
        let mut declarations = Declarations::new();
        declarations.set("--Snap-Timing", "1s");
        assert_eq!(declarations.get("--Snap-Timing"), Some("1s"));
        assert_eq!(declarations.get("--snap-timing"), None);
    }

    #[test]
    fn remove_returns_previous_value() {
        let mut declarations = Declarations::new();
        declarations.set("display", "none");
        assert_eq!(declarations.remove("display").as_deref(), Some("none"));
        assert!(declarations.is_empty());
        assert_eq!(declarations.remove("display"), None);
    }
}
