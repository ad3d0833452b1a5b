//! Finding accordion groups and their items in a document.

use snap_blocks_style::selector::SelectorList;

use super::error::{AccordionError, Result};
use crate::config::AccordionConfig;
use crate::dom::{Document, NodeId};

/// Parsed group and item selectors.
#[derive(Debug, Clone)]
pub(crate) struct Discovery {
    groups: SelectorList,
    items: SelectorList,
}

impl Discovery {
    pub(crate) fn new(config: &AccordionConfig) -> Result<Self> {
        Ok(Self {
            groups: parse_selector(&config.group_selector)?,
            items: parse_selector(&config.item_selector)?,
        })
    }

    /// Group containers at or under `root`, in document order.
    pub(crate) fn containers(&self, document: &Document, root: NodeId) -> Vec<NodeId> {
        let mut containers = vec![];
        if document.matches(root, &self.groups) {
            containers.push(root);
        }
        containers.extend(document.select_all(root, &self.groups));
        containers
    }

    /// Items belonging to `group`: matching descendants whose nearest
    /// enclosing group container is `group` itself.
    pub(crate) fn items_of(&self, document: &Document, group: NodeId) -> Vec<NodeId> {
        document
            .select_all(group, &self.items)
            .into_iter()
            .filter(|&item| {
                document
                    .ancestors(item)
                    .find(|&ancestor| document.matches(ancestor, &self.groups))
                    == Some(group)
            })
            .collect()
    }
}

fn parse_selector(selector: &str) -> Result<SelectorList> {
    SelectorList::parse(selector).map_err(|source| AccordionError::InvalidSelector {
        selector: selector.to_string(),
        source,
    })
}

/// A group that was bound by a discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundGroup {
    /// Index of the group on the page.
    pub index: usize,
    /// The group's id.
    pub id: String,
    /// Number of items bound.
    pub items: usize,
}

/// A group container that could not be bound.
#[derive(Debug)]
pub struct DiscoveryFailure {
    /// The container element.
    pub container: NodeId,
    /// Why it failed.
    pub error: AccordionError,
}

/// Outcome of [`Page::enable_accordions`](crate::page::Page::enable_accordions).
///
/// A malformed group never prevents the others from binding; its error is
/// reported here instead.
#[derive(Debug, Default)]
pub struct DiscoveryReport {
    /// Groups bound by this pass.
    pub initialised: Vec<BoundGroup>,
    /// Containers that failed to bind.
    pub failures: Vec<DiscoveryFailure>,
    /// Containers skipped because they were already bound.
    pub skipped: usize,
}

impl DiscoveryReport {
    /// Whether every container found was bound or already bound.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}
