//! Human-readable dumps of a document tree.
//!
//! ```
//! use snap_blocks::dom::{Document, DocumentTreeDebug, TreeFormatOptions, TreeStyle};
//!
//! let doc = Document::parse(r#"<div id="faq"><p>Hi</p></div>"#).unwrap();
//! let options = TreeFormatOptions {
//!     style: TreeStyle::Ascii,
//!     ..TreeFormatOptions::minimal()
//! };
//! let dump = DocumentTreeDebug::with_options(&doc, options).to_string();
//! assert_eq!(dump, "#document\n   div\n|     p\n");
//! ```

use std::fmt::{self, Write};

use super::document::{Document, NodeId, NodeKind};

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show element attributes.
    pub show_attributes: bool,
    /// Whether to show text and comment nodes.
    pub show_text: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_attributes: true,
            show_text: false,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Attributes, text and comments.
    pub fn detailed() -> Self {
        Self {
            show_text: true,
            ..Default::default()
        }
    }

    /// Tag names only.
    pub fn minimal() -> Self {
        Self {
            show_attributes: false,
            show_text: false,
            ..Default::default()
        }
    }
}

/// Formats a document, or one of its subtrees, as an indented tree.
#[derive(Debug, Clone)]
pub struct DocumentTreeDebug<'a> {
    document: &'a Document,
    root: NodeId,
    options: TreeFormatOptions,
}

impl<'a> DocumentTreeDebug<'a> {
    /// Visualize the whole document with default options.
    pub fn new(document: &'a Document) -> Self {
        Self::with_options(document, TreeFormatOptions::default())
    }

    /// Visualize the whole document with custom options.
    pub fn with_options(document: &'a Document, options: TreeFormatOptions) -> Self {
        Self {
            document,
            root: document.root(),
            options,
        }
    }

    /// Restrict output to the subtree rooted at `node`.
    pub fn subtree(mut self, node: NodeId) -> Self {
        self.root = node;
        self
    }

    fn format_subtree_into(
        &self,
        id: NodeId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> fmt::Result {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let Some(kind) = self.document.kind(id) else {
            return Ok(());
        };

        let label = match kind {
            NodeKind::Document => "#document".to_string(),
            NodeKind::Element(data) => {
                let mut label = data.local_name().to_string();
                if self.options.show_attributes {
                    for (key, value) in data.attributes() {
                        if value.is_empty() {
                            write!(label, " {key}")?;
                        } else {
                            write!(label, " {key}=\"{value}\"")?;
                        }
                    }
                }
                label
            }
            NodeKind::Text(text) if self.options.show_text => format!("{:?}", text.trim()),
            NodeKind::Comment(text) if self.options.show_text => format!("<!--{text}-->"),
            NodeKind::Text(_) | NodeKind::Comment(_) => return Ok(()),
        };

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(&label);
        output.push('\n');

        let children: Vec<NodeId> = self
            .document
            .children(id)
            .iter()
            .copied()
            .filter(|&child| self.options.show_text || self.document.is_element(child))
            .collect();
        let child_count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.format_subtree_into(child, depth + 1, i == child_count - 1, output)?;
        }

        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, space) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "   "),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "- ", "- "),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }

        if is_last {
            prefix.push_str(space);
            if self.options.style == TreeStyle::Unicode {
                prefix.push(' ');
            }
        } else {
            prefix.push_str(corner);
            prefix.push(' ');
        }

        prefix
    }
}

impl fmt::Display for DocumentTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        self.format_subtree_into(self.root, 0, true, &mut output)?;
        f.write_str(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str = r#"<div data-accordion-group id="faq"><div data-accordion id="q1"><p>Answer</p></div><div data-accordion id="q2"></div></div>"#;

    #[test]
    fn unicode_tree_with_attributes() {
        let doc = Document::parse(MARKUP).unwrap();
        let group = doc.get_element_by_id("faq").unwrap();

        let dump = DocumentTreeDebug::new(&doc).subtree(group).to_string();
        let lines: Vec<&str> = dump.lines().collect();

        assert_eq!(lines[0], r#"div data-accordion-group id="faq""#);
        assert_eq!(lines[1], "\u{251c}\u{2500}\u{2500} div data-accordion id=\"q1\"");
        assert_eq!(lines[2], "\u{2502}  \u{2514}\u{2500}\u{2500} p");
        assert_eq!(lines[3], "\u{2514}\u{2500}\u{2500} div data-accordion id=\"q2\"");
    }

    #[test]
    fn max_depth_limits_output() {
        let doc = Document::parse(MARKUP).unwrap();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };

        let dump = DocumentTreeDebug::with_options(&doc, options).to_string();
        assert_eq!(dump.lines().count(), 2);
    }

    #[test]
    fn detailed_includes_text() {
        let doc = Document::parse("<p>Hello</p>").unwrap();
        let dump = DocumentTreeDebug::with_options(&doc, TreeFormatOptions::detailed()).to_string();

        assert!(dump.contains("\"Hello\""));
    }
}
