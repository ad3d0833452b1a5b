//! Arena-backed document tree.
//!
//! Nodes live in a [`SlotMap`] owned by the [`Document`]; everything else
//! refers to them by [`NodeId`]. A removed node's id becomes invalid, and
//! every accessor reports that instead of panicking.

use slotmap::{SlotMap, new_key_type};
use snap_blocks_style::resolve::StyleEngine;
use snap_blocks_style::style::Declarations;

use super::error::{DomError, DomResult};

new_key_type! {
    /// Identifier of a node in a [`Document`].
    pub struct NodeId;
}

/// Per-element data.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub(crate) local_name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) inline_style: Declarations,
}

impl ElementData {
    fn new(local_name: &str) -> Self {
        Self {
            local_name: local_name.to_ascii_lowercase(),
            attributes: vec![],
            inline_style: Declarations::new(),
        }
    }

    /// The element's lowercase tag name.
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Attributes in source order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The declarations of the `style` attribute.
    pub fn inline_style(&self) -> &Declarations {
        &self.inline_style
    }

    fn write_attribute(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    fn delete_attribute(&mut self, name: &str) -> Option<String> {
        let position = self.attributes.iter().position(|(key, _)| key == name)?;
        Some(self.attributes.remove(position).1)
    }

    /// Keep the `style` attribute text in step with the parsed declarations.
    pub(crate) fn sync_style_attribute(&mut self) {
        if self.inline_style.is_empty() {
            self.delete_attribute("style");
        } else {
            let text = self.inline_style.to_string();
            self.write_attribute("style", text);
        }
    }
}

/// What a node is.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The document node at the top of the tree.
    Document,
    /// An element.
    Element(ElementData),
    /// A run of character data.
    Text(String),
    /// A comment.
    Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: vec![],
        }
    }
}

/// A mutable document: a node tree plus the stylesheets that apply to it.
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    pub(crate) root: NodeId,
    pub(crate) styles: StyleEngine,
}

impl Document {
    /// Create an empty document with the built-in user agent styles.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new(NodeKind::Document));
        Self {
            nodes,
            root,
            styles: StyleEngine::new(),
        }
    }

    /// The document node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, including the document node.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // =========================================================================
    // Node creation and tree structure
    // =========================================================================

    /// Create a detached element.
    pub fn create_element(&mut self, local_name: &str) -> NodeId {
        self.nodes
            .insert(NodeData::new(NodeKind::Element(ElementData::new(local_name))))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(NodeData::new(NodeKind::Text(text.into())))
    }

    /// Create a detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.nodes.insert(NodeData::new(NodeKind::Comment(text.into())))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_data = self.nodes.get(parent).ok_or(DomError::InvalidNode)?;
        if matches!(parent_data.kind, NodeKind::Text(_) | NodeKind::Comment(_)) {
            return Err(DomError::Hierarchy("character data cannot have children"));
        }
        if !self.nodes.contains_key(child) {
            return Err(DomError::InvalidNode);
        }
        if child == self.root {
            return Err(DomError::Hierarchy("the document node cannot be moved"));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(DomError::Hierarchy("a node cannot contain itself"));
        }

        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        Ok(())
    }

    /// Create an element and append it to `parent` in one step.
    pub fn append_element(&mut self, parent: NodeId, local_name: &str) -> DomResult<NodeId> {
        let element = self.create_element(local_name);
        self.append_child(parent, element)?;
        Ok(element)
    }

    /// Create a text node and append it to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> DomResult<NodeId> {
        let node = self.create_text(text);
        self.append_child(parent, node)?;
        Ok(node)
    }

    /// Detach a node and drop it together with its subtree.
    pub fn remove(&mut self, node: NodeId) -> DomResult<()> {
        if node == self.root {
            return Err(DomError::Hierarchy("the document node cannot be removed"));
        }
        if !self.nodes.contains_key(node) {
            return Err(DomError::InvalidNode);
        }
        self.detach(node);

        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if let Some(data) = self.nodes.remove(current) {
                pending.extend(data.children);
            }
        }
        Ok(())
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes.get_mut(node).and_then(|data| data.parent.take()) {
            if let Some(parent_data) = self.nodes.get_mut(parent) {
                parent_data.children.retain(|&c| c != node);
            }
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|data| data.parent);
        }
        false
    }

    /// Whether the id refers to a live node.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Whether the node is attached under the document node.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(node) && self.is_inclusive_ancestor(self.root, node)
    }

    /// The node's kind.
    pub fn kind(&self, node: NodeId) -> Option<&NodeKind> {
        self.nodes.get(node).map(|data| &data.kind)
    }

    /// Element data, if the node is an element.
    pub fn element(&self, node: NodeId) -> Option<&ElementData> {
        match self.kind(node)? {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node: NodeId) -> DomResult<&mut ElementData> {
        match &mut self.nodes.get_mut(node).ok_or(DomError::InvalidNode)?.kind {
            NodeKind::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement),
        }
    }

    /// Whether the node is an element.
    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    /// The element's lowercase tag name.
    pub fn local_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(ElementData::local_name)
    }

    /// The parent node.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    /// The parent, if it is an element.
    pub fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.parent(node).filter(|&parent| self.is_element(parent))
    }

    /// Child nodes in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    /// Child elements in order.
    pub fn element_children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&child| self.is_element(child))
    }

    /// Element ancestors, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_element(node), move |&id| self.parent_element(id))
    }

    /// Descendant elements of `scope` in document order, excluding `scope`.
    pub fn descendant_elements(&self, scope: NodeId) -> Vec<NodeId> {
        let mut result = vec![];
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.is_element(node) {
                result.push(node);
                stack.extend(self.children(node).iter().rev().copied());
            }
        }
        result
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            Some(NodeKind::Text(content)) => out.push_str(content),
            Some(NodeKind::Element(_)) | Some(NodeKind::Document) => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
            _ => {}
        }
    }

    /// Replace all children of an element with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: impl Into<String>) -> DomResult<()> {
        self.element_mut(node)?;
        for child in self.children(node).to_vec() {
            self.remove(child)?;
        }
        let text = text.into();
        if !text.is_empty() {
            self.append_text(node, text)?;
        }
        Ok(())
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    /// Value of an attribute.
    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    /// Whether the attribute is present.
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Set an attribute. Setting `style` re-parses the inline declarations.
    pub fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> DomResult<()> {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        let element = self.element_mut(node)?;
        if name == "style" {
            element.inline_style = Declarations::parse(&value);
        }
        element.write_attribute(&name, value);
        Ok(())
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) -> DomResult<Option<String>> {
        let element = self.element_mut(node)?;
        if name == "style" {
            element.inline_style = Declarations::new();
        }
        Ok(element.delete_attribute(name))
    }

    /// Value of a `data-*` attribute, e.g. `data_attribute(node, "is-multiple")`.
    pub fn data_attribute(&self, node: NodeId, key: &str) -> Option<&str> {
        self.element(node)?
            .attributes
            .iter()
            .find(|(name, _)| name.strip_prefix("data-") == Some(key))
            .map(|(_, value)| value.as_str())
    }

    /// The element's `id` attribute.
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.attribute(node, "id")
    }

    /// Tokens of the `class` attribute.
    pub fn classes(&self, node: NodeId) -> Vec<&str> {
        self.attribute(node, "class")
            .map(|classes| classes.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Whether the `class` attribute contains `class`.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).contains(&class)
    }

    /// Add a class if it is not already present.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        if self.has_class(node, class) {
            return Ok(());
        }
        let mut classes: Vec<String> = self.classes(node).into_iter().map(String::from).collect();
        classes.push(class.to_string());
        self.set_attribute(node, "class", classes.join(" "))
    }

    /// Remove a class.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> DomResult<()> {
        if !self.has_class(node, class) {
            return Ok(());
        }
        let remaining: Vec<String> = self
            .classes(node)
            .into_iter()
            .filter(|c| *c != class)
            .map(String::from)
            .collect();
        self.set_attribute(node, "class", remaining.join(" "))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let group = doc.append_element(doc.root(), "DIV").unwrap();
        let item = doc.append_element(group, "div").unwrap();
        let text = doc.append_text(item, "Question").unwrap();
        (doc, group, item, text)
    }

    #[test]
    fn build_tree() {
        let (doc, group, item, text) = sample();

        assert_eq!(doc.local_name(group), Some("div"));
        assert_eq!(doc.parent(item), Some(group));
        assert_eq!(doc.parent_element(group), None);
        assert_eq!(doc.children(item), &[text]);
        assert_eq!(doc.text_content(group), "Question");
        assert_eq!(doc.ancestors(item).collect::<Vec<_>>(), vec![group]);
        assert_eq!(doc.descendant_elements(doc.root()), vec![group, item]);
        assert!(doc.is_connected(text));
    }

    #[test]
    fn append_moves_nodes() {
        let (mut doc, group, item, _) = sample();
        let other = doc.append_element(doc.root(), "section").unwrap();

        doc.append_child(other, item).unwrap();

        assert!(doc.children(group).is_empty());
        assert_eq!(doc.parent(item), Some(other));
    }

    #[test]
    fn rejects_cycles_and_character_data_parents() {
        let (mut doc, group, item, text) = sample();

        assert!(matches!(doc.append_child(item, group), Err(DomError::Hierarchy(_))));
        assert!(matches!(doc.append_child(text, group), Err(DomError::Hierarchy(_))));
        assert!(matches!(doc.append_child(group, doc.root()), Err(DomError::Hierarchy(_))));
    }

    #[test]
    fn remove_drops_subtree() {
        let (mut doc, group, item, text) = sample();

        doc.remove(item).unwrap();

        assert!(!doc.contains(item));
        assert!(!doc.contains(text));
        assert!(doc.children(group).is_empty());
        assert!(matches!(doc.remove(item), Err(DomError::InvalidNode)));
        assert_eq!(doc.attribute(item, "id"), None);
    }

    #[test]
    fn attributes_and_data_attributes() {
        let (mut doc, group, _, text) = sample();

        doc.set_attribute(group, "data-is-multiple", "true").unwrap();
        doc.set_attribute(group, "ID", "faq").unwrap();

        assert_eq!(doc.data_attribute(group, "is-multiple"), Some("true"));
        assert_eq!(doc.id(group), Some("faq"));
        assert_eq!(doc.remove_attribute(group, "id").unwrap().as_deref(), Some("faq"));
        assert!(!doc.has_attribute(group, "id"));
        assert!(matches!(doc.set_attribute(text, "id", "x"), Err(DomError::NotAnElement)));
    }

    #[test]
    fn class_list() {
        let (mut doc, group, _, _) = sample();

        doc.add_class(group, "faq").unwrap();
        doc.add_class(group, "is-open").unwrap();
        doc.add_class(group, "faq").unwrap();
        assert_eq!(doc.attribute(group, "class"), Some("faq is-open"));

        doc.remove_class(group, "faq").unwrap();
        assert_eq!(doc.classes(group), vec!["is-open"]);
    }

    #[test]
    fn style_attribute_round_trips_through_declarations() {
        let (mut doc, group, _, _) = sample();

        doc.set_attribute(group, "style", "height:120px; display : none").unwrap();
        let element = doc.element(group).unwrap();

        assert_eq!(element.inline_style().get("display"), Some("none"));
        assert_eq!(element.inline_style().len(), 2);
    }

    #[test]
    fn set_text_content_replaces_children() {
        let (mut doc, _, item, text) = sample();

        doc.set_text_content(item, "Answer").unwrap();

        assert!(!doc.contains(text));
        assert_eq!(doc.text_content(item), "Answer");
    }
}
