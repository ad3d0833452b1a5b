//! Accordion state and the small value types shared across the module.

use std::fmt;

use serde::Serialize;

/// Whether an item's panel is expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccordionState {
    /// The panel is expanded.
    Open,
    /// The panel is collapsed (and hidden once its transition ends).
    Collapsed,
}

impl AccordionState {
    /// The value written to `data-state`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Collapsed => "collapsed",
        }
    }

    /// The value written to the trigger's `aria-expanded`.
    pub fn aria_expanded(self) -> &'static str {
        match self {
            Self::Open => "true",
            Self::Collapsed => "false",
        }
    }
}

impl fmt::Display for AccordionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of an item: its group's index on the page and its index within
/// the group, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemHandle {
    /// Index of the owning group.
    pub group: usize,
    /// Index of the item inside its group.
    pub index: usize,
}

impl ItemHandle {
    /// Create a handle.
    pub const fn new(group: usize, index: usize) -> Self {
        Self { group, index }
    }
}

/// Published on `Page::state_changed` whenever an item's state flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// The item that changed.
    pub item: ItemHandle,
    /// The item's id.
    pub id: String,
    /// The new state.
    pub state: AccordionState,
}

/// Snapshot of an item for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDebug {
    /// The item's id.
    pub id: String,
    /// The item's current state.
    pub state: AccordionState,
    /// The id of the owning group.
    pub group_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_strings() {
        assert_eq!(AccordionState::Open.to_string(), "open");
        assert_eq!(AccordionState::Collapsed.as_str(), "collapsed");
        assert_eq!(AccordionState::Collapsed.aria_expanded(), "false");
    }

    #[test]
    fn debug_snapshot_serializes() {
        let snapshot = ItemDebug {
            id: "q1".to_string(),
            state: AccordionState::Open,
            group_id: "faq".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&snapshot).unwrap(),
            r#"{"id":"q1","state":"open","group_id":"faq"}"#
        );
    }
}
