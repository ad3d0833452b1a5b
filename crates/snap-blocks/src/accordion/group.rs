//! Accordion groups: the exclusivity policy over a set of items.

use super::Transition;
use super::discovery::Discovery;
use super::error::{AccordionError, Result};
use super::item::AccordionItem;
use super::state::{AccordionState, ItemHandle};
use crate::dom::{Document, NodeId};

/// A group of accordions sharing a single-open or multiple-open policy.
///
/// The single-open rule is enforced by the item being opened: it closes the
/// whole group before revealing itself.
#[derive(Debug)]
pub struct AccordionGroup {
    id: String,
    element: NodeId,
    index: usize,
    allow_multiple_open: bool,
    items: Vec<AccordionItem>,
}

impl AccordionGroup {
    /// Bind the group rooted at `element` and collapse the items that should
    /// not start open.
    ///
    /// Every item is validated before the document is touched, so an error
    /// leaves no trace of the group behind.
    pub(crate) fn discover(
        element: NodeId,
        index: usize,
        discovery: &Discovery,
        cx: &mut Transition<'_>,
    ) -> Result<Self> {
        let document: &Document = cx.document;
        let config = cx.config;

        let id = document
            .id(element)
            .filter(|id| !id.is_empty())
            .ok_or(AccordionError::MissingGroupId)?
            .to_string();
        let allow_multiple_open =
            document.attribute(element, &config.multiple_attribute) == Some("true");

        let mut items = vec![];
        let mut closing = vec![];
        let mut open_claimed = false;
        for (position, node) in discovery.items_of(document, element).into_iter().enumerate() {
            let item = AccordionItem::bind(
                document,
                node,
                ItemHandle::new(index, position),
                &id,
                config,
            )?;

            let requested = document.attribute(node, &config.initially_open_attribute) == Some("true");
            let stays_open = if allow_multiple_open {
                requested
            } else if requested && !open_claimed {
                open_claimed = true;
                true
            } else {
                false
            };

            if !stays_open {
                closing.push((position, item.resolve_timing(document, config)?));
            }
            items.push(item);
        }

        for item in &items {
            item.pin_height(cx.document)?;
        }
        for (position, timing) in closing {
            items[position].close_with(timing, cx)?;
        }

        tracing::debug!(
            target: "snap_blocks::accordion",
            group = %id,
            items = items.len(),
            allow_multiple_open,
            "initialised accordion group"
        );

        Ok(Self {
            id,
            element,
            index,
            allow_multiple_open,
            items,
        })
    }

    /// The group's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The group container.
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// Index of the group on its page.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether several items may be open at once.
    pub fn allows_multiple_open(&self) -> bool {
        self.allow_multiple_open
    }

    /// Items in document order.
    pub fn items(&self) -> &[AccordionItem] {
        &self.items
    }

    /// The item at `index`.
    pub fn item(&self, index: usize) -> Option<&AccordionItem> {
        self.items.get(index)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items currently open.
    pub fn open_items(&self) -> impl Iterator<Item = &AccordionItem> {
        self.items.iter().filter(|item| item.is_open())
    }

    /// Close every item, whatever its state.
    ///
    /// All timings are resolved first; if any is invalid nothing is closed.
    pub(crate) fn close_all_accordions(&mut self, cx: &mut Transition<'_>) -> Result<()> {
        let timings = self
            .items
            .iter()
            .map(|item| item.resolve_timing(cx.document, cx.config))
            .collect::<Result<Vec<_>>>()?;

        for (item, timing) in self.items.iter_mut().zip(timings) {
            item.close_with(timing, cx)?;
        }
        Ok(())
    }

    pub(crate) fn open_item(&mut self, index: usize, cx: &mut Transition<'_>) -> Result<()> {
        self.check_index(index)?;

        let mut cached_height = None;
        if !self.allow_multiple_open {
            cached_height = Some(self.open_sibling_height(index, cx.document));
            self.close_all_accordions(cx)?;
            self.items[index].cancel_pending_close(cx);
        }
        self.items[index].begin_open(cached_height, cx)
    }

    pub(crate) fn close_item(&mut self, index: usize, cx: &mut Transition<'_>) -> Result<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];
        let timing = item.resolve_timing(cx.document, cx.config)?;
        item.close_with(timing, cx)
    }

    pub(crate) fn toggle_item(&mut self, index: usize, cx: &mut Transition<'_>) -> Result<()> {
        self.check_index(index)?;
        match self.items[index].state() {
            AccordionState::Open => self.close_item(index, cx),
            AccordionState::Collapsed => self.open_item(index, cx),
        }
    }

    pub(crate) fn finish_open(
        &mut self,
        index: usize,
        generation: u64,
        cx: &mut Transition<'_>,
    ) -> Result<bool> {
        self.check_index(index)?;
        let exclusive = !self.allow_multiple_open;
        self.items[index].finish_open(generation, exclusive, cx)
    }

    pub(crate) fn hide_panel(
        &mut self,
        index: usize,
        generation: u64,
        document: &mut Document,
    ) -> Result<bool> {
        self.check_index(index)?;
        self.items[index].hide_panel(generation, document)
    }

    /// Height of the first other open item's panel, or zero.
    fn open_sibling_height(&self, index: usize, document: &Document) -> f32 {
        self.items
            .iter()
            .enumerate()
            .find(|(position, item)| *position != index && item.is_open())
            .and_then(|(_, item)| item.panel_height(document))
            .unwrap_or(0.0)
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(AccordionError::UnknownItem(ItemHandle::new(self.index, index)))
        }
    }
}
