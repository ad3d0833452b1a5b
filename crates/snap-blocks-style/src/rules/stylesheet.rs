//! Stylesheet collection and management.

use std::path::{Path, PathBuf};

use crate::rules::StyleRule;
use crate::selector::Selector;
use crate::style::Declarations;
use crate::{Error, Result};

/// Built-in defaults applied beneath every author stylesheet.
///
/// Only the properties the document model interprets are covered.
pub const USER_AGENT_CSS: &str = r#"
[hidden] { display: none; }
head, script, style, template, title, meta, link { display: none; }
span, a, button, strong, em, b, i, small, code, label, img { display: inline; }
"#;

/// Origin of a stylesheet in the cascade.
///
/// Higher priority styles override lower priority ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum StylePriority {
    /// Built-in defaults (lowest priority).
    UserAgent = 0,
    /// Stylesheets supplied with the page (`<style>` elements, files).
    Author = 1,
    /// `style` attribute declarations (highest priority).
    Inline = 2,
}

/// A stylesheet containing multiple rules.
#[derive(Debug, Clone)]
pub struct StyleSheet {
    /// The rules in this stylesheet.
    pub rules: Vec<StyleRule>,
    /// Priority level.
    pub priority: StylePriority,
    /// Source file path, when loaded from disk.
    pub source_path: Option<PathBuf>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new(priority: StylePriority) -> Self {
        Self {
            rules: vec![],
            priority,
            source_path: None,
        }
    }

    /// Create an empty author stylesheet.
    pub fn author() -> Self {
        Self::new(StylePriority::Author)
    }

    /// The built-in user agent stylesheet.
    ///
    /// Falls back to an empty sheet, with a warning, if the built-in CSS
    /// fails to parse.
    pub fn user_agent() -> Self {
        Self::from_css(USER_AGENT_CSS, StylePriority::UserAgent).unwrap_or_else(|e| {
            tracing::warn!(target: "snap_blocks_style", error = %e, "built-in user agent stylesheet failed to parse");
            Self::new(StylePriority::UserAgent)
        })
    }

    /// Load a stylesheet from a CSS file.
    pub fn from_file(path: impl AsRef<Path>, priority: StylePriority) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let mut sheet = Self::from_css(&content, priority)?;
        sheet.source_path = Some(path.to_path_buf());
        Ok(sheet)
    }

    /// Parse a stylesheet from CSS text.
    pub fn from_css(css: &str, priority: StylePriority) -> Result<Self> {
        let rules = crate::parser::parse_css(css)?;
        Ok(Self {
            rules,
            priority,
            source_path: None,
        })
    }

    /// Add a rule to the stylesheet.
    ///
    /// The rule's order is set from the current number of rules.
    pub fn add_rule(&mut self, selector: Selector, declarations: Declarations) {
        let order = self.rules.len() as u32;
        self.rules.push(StyleRule::new(selector, declarations, order));
    }

    /// Add a pre-built rule to the stylesheet.
    pub fn add_style_rule(&mut self, mut rule: StyleRule) {
        rule.order = self.rules.len() as u32;
        self.rules.push(rule);
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Clear all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::author()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn stylesheet_creation() {
        let mut sheet = StyleSheet::author();
        assert!(sheet.is_empty());

        sheet.add_rule(Selector::type_selector("div"), Declarations::parse("height: 4px"));
        sheet.add_rule(Selector::class("panel"), Declarations::new());

        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.rules[1].order, 1);
    }

    #[test]
    fn user_agent_sheet_parses() {
        assert!(StyleSheet::from_css(USER_AGENT_CSS, StylePriority::UserAgent).is_ok());

        let sheet = StyleSheet::user_agent();
        assert_eq!(sheet.priority, StylePriority::UserAgent);
        assert!(sheet.len() > 10);
    }

    #[test]
    fn priority_ordering() {
        assert!(StylePriority::Inline > StylePriority::Author);
        assert!(StylePriority::Author > StylePriority::UserAgent);
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ".accordion-panel {{ --snap-accordion-open-close-timing: 250ms; }}").unwrap();

        let sheet = StyleSheet::from_file(file.path(), StylePriority::Author).unwrap();

        assert_eq!(sheet.len(), 1);
        assert_eq!(sheet.source_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StyleSheet::from_file(dir.path().join("missing.css"), StylePriority::Author);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
