//! Borrowed element handles used for selector matching.

use snap_blocks_style::selector::{MatchTarget, SiblingInfo};

use super::document::{Document, NodeId};

/// A read-only view of one element in a [`Document`].
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    document: &'a Document,
    node: NodeId,
    local_name: &'a str,
}

impl<'a> ElementRef<'a> {
    /// Wrap a node, returning `None` if it is not an element.
    pub fn new(document: &'a Document, node: NodeId) -> Option<Self> {
        let local_name = document.local_name(node)?;
        Some(Self {
            document,
            node,
            local_name,
        })
    }

    /// The wrapped node.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The owning document.
    pub fn document(&self) -> &'a Document {
        self.document
    }
}

impl MatchTarget for ElementRef<'_> {
    fn local_name(&self) -> &str {
        self.local_name
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.document.attribute(self.node, name)
    }

    fn parent_element(&self) -> Option<Self> {
        let parent = self.document.parent_element(self.node)?;
        ElementRef::new(self.document, parent)
    }

    fn sibling_info(&self) -> SiblingInfo {
        let Some(parent) = self.document.parent(self.node) else {
            return SiblingInfo { index: 0, count: 1 };
        };
        let siblings: Vec<NodeId> = self.document.element_children(parent).collect();
        SiblingInfo {
            index: siblings.iter().position(|&s| s == self.node).unwrap_or(0),
            count: siblings.len(),
        }
    }
}
