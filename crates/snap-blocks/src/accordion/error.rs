//! Accordion binding errors.

use super::state::ItemHandle;
use crate::dom::DomError;

/// Result type alias for accordion operations.
pub type Result<T> = std::result::Result<T, AccordionError>;

/// Errors raised while binding or driving accordions.
///
/// All of these describe malformed markup or a bad handle; an accordion
/// that was bound successfully never fails to open.
#[derive(Debug, thiserror::Error)]
pub enum AccordionError {
    /// A group container has no `id`.
    #[error("accordion group has no id")]
    MissingGroupId,

    /// An item element has no `id`.
    #[error("accordion item in group '{group}' has no id")]
    MissingItemId { group: String },

    /// No element carries the item's trigger id.
    #[error("accordion '{item}' has no trigger button (expected #{expected})")]
    MissingTrigger { item: String, expected: String },

    /// No element carries the item's panel id.
    #[error("accordion '{item}' has no content panel (expected #{expected})")]
    MissingPanel { item: String, expected: String },

    /// The panel's open/close timing is not a number followed by `ms` or `s`.
    #[error("accordion '{item}' has an invalid open/close timing '{value}'")]
    InvalidTiming {
        item: String,
        value: String,
        #[source]
        source: snap_blocks_style::Error,
    },

    /// The handle does not refer to a bound item.
    #[error("no accordion item at group {}, index {}", .0.group, .0.index)]
    UnknownItem(ItemHandle),

    /// The index does not refer to a bound group.
    #[error("no accordion group at index {0}")]
    UnknownGroup(usize),

    /// A configured selector failed to parse.
    #[error("invalid selector '{selector}'")]
    InvalidSelector {
        selector: String,
        #[source]
        source: snap_blocks_style::Error,
    },

    /// The document rejected a mutation.
    #[error(transparent)]
    Dom(#[from] DomError),
}
