//! Inline and computed style access on [`Document`] elements.

use snap_blocks_style::resolve::StyleEngine;
use snap_blocks_style::prelude::{ComputedStyle, Declarations, StyleSheet};

use super::document::{Document, NodeId};
use super::element::ElementRef;
use super::error::DomResult;

impl Document {
    /// The engine holding the document's stylesheets.
    pub fn style_engine(&self) -> &StyleEngine {
        &self.styles
    }

    /// Add a stylesheet to the document.
    pub fn add_stylesheet(&mut self, stylesheet: StyleSheet) {
        self.styles.add_stylesheet(stylesheet);
    }

    /// The element's inline declarations.
    pub fn inline_style(&self, node: NodeId) -> Option<&Declarations> {
        self.element(node).map(|element| element.inline_style())
    }

    /// An inline style property (`element.style.getPropertyValue`).
    pub fn style_property(&self, node: NodeId, name: &str) -> Option<&str> {
        self.inline_style(node)?.get(name)
    }

    /// Set an inline style property. An empty value removes the property.
    pub fn set_style_property(&mut self, node: NodeId, name: &str, value: &str) -> DomResult<()> {
        if value.trim().is_empty() {
            self.remove_style_property(node, name)?;
            return Ok(());
        }
        let element = self.element_mut(node)?;
        element.inline_style.set(name, value);
        element.sync_style_attribute();
        Ok(())
    }

    /// Remove an inline style property, returning its previous value.
    pub fn remove_style_property(&mut self, node: NodeId, name: &str) -> DomResult<Option<String>> {
        let element = self.element_mut(node)?;
        let previous = element.inline_style.remove(name);
        element.sync_style_attribute();
        Ok(previous)
    }

    /// Resolve the element's computed style (`getComputedStyle`).
    ///
    /// Inherited properties are resolved against the element's ancestors.
    pub fn computed_style(&self, node: NodeId) -> Option<ComputedStyle> {
        self.element(node)?;

        let mut chain: Vec<NodeId> = self.ancestors(node).collect();
        chain.reverse();
        chain.push(node);

        let mut parent_style: Option<ComputedStyle> = None;
        for id in chain {
            let element = ElementRef::new(self, id)?;
            let style = self
                .styles
                .compute(&element, self.inline_style(id), parent_style.as_ref());
            parent_style = Some(style);
        }
        parent_style
    }

    /// Whether the element and all of its ancestors generate boxes.
    pub fn is_rendered(&self, node: NodeId) -> bool {
        if !self.is_connected(node) {
            return false;
        }
        let mut chain: Vec<NodeId> = self.ancestors(node).collect();
        chain.push(node);
        chain.into_iter().all(|id| {
            self.computed_style(id)
                .is_some_and(|style| style.is_rendered())
        })
    }

    /// The element's height in pixels, or `None` when it is not rendered or
    /// its height does not resolve to a pixel length.
    pub fn rendered_height(&self, node: NodeId) -> Option<f32> {
        if !self.is_rendered(node) {
            return None;
        }
        self.computed_style(node)?.height_px()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snap_blocks_style::rules::StylePriority;

    fn document(css: &str) -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        doc.add_stylesheet(StyleSheet::from_css(css, StylePriority::Author).unwrap());
        let group = doc.append_element(doc.root(), "div").unwrap();
        doc.set_attribute(group, "id", "faq").unwrap();
        let panel = doc.append_element(group, "div").unwrap();
        doc.set_attribute(panel, "class", "accordion-panel").unwrap();
        (doc, group, panel)
    }

    #[test]
    fn inline_properties_update_style_attribute() {
        let (mut doc, _, panel) = document("");

        doc.set_style_property(panel, "height", "120px").unwrap();
        doc.set_style_property(panel, "display", "none").unwrap();
        assert_eq!(doc.attribute(panel, "style"), Some("height: 120px; display: none;"));

        doc.set_style_property(panel, "display", "").unwrap();
        assert_eq!(doc.style_property(panel, "display"), None);
        assert_eq!(doc.attribute(panel, "style"), Some("height: 120px;"));

        assert_eq!(doc.remove_style_property(panel, "height").unwrap().as_deref(), Some("120px"));
        assert!(!doc.has_attribute(panel, "style"));
    }

    #[test]
    fn computed_style_inherits_custom_properties() {
        let (doc, _, panel) = document("#faq { --snap-accordion-open-close-timing: 300ms; }");

        let style = doc.computed_style(panel).unwrap();

        assert_eq!(style.property_value("--snap-accordion-open-close-timing"), "300ms");
    }

    #[test]
    fn inline_style_beats_stylesheet() {
        let (mut doc, _, panel) = document(".accordion-panel { height: 50px; }");
        assert_eq!(doc.rendered_height(panel), Some(50.0));

        doc.set_style_property(panel, "height", "80px").unwrap();
        assert_eq!(doc.rendered_height(panel), Some(80.0));
    }

    #[test]
    fn hidden_ancestors_hide_descendants() {
        let (mut doc, group, panel) = document(".accordion-panel { height: 50px; }");

        doc.set_style_property(group, "display", "none").unwrap();

        assert!(!doc.is_rendered(panel));
        assert_eq!(doc.rendered_height(panel), None);
        assert!(doc.computed_style(panel).unwrap().is_rendered());
    }

    #[test]
    fn detached_elements_are_not_rendered() {
        let (mut doc, _, _) = document("");
        let detached = doc.create_element("div");

        assert!(!doc.is_rendered(detached));
        assert!(doc.computed_style(detached).is_some());
    }
}
