//! Prelude module for Snap Blocks.
//!
//! ```
//! use snap_blocks::prelude::*;
//! ```

// ============================================================================
// Page runtime
// ============================================================================

pub use crate::config::AccordionConfig;
pub use crate::page::Page;
pub use snap_blocks_core::{Clock, ManualClock, Signal, SystemClock};

// ============================================================================
// Accordions
// ============================================================================

pub use crate::accordion::{
    AccordionError, AccordionGroup, AccordionItem, AccordionState, DiscoveryReport, ItemHandle,
    StateChange,
};

// ============================================================================
// Document model
// ============================================================================

pub use crate::dom::{Document, DocumentTreeDebug, NodeId, ScrollBehavior, Viewport};

// ============================================================================
// Block markup and post selection
// ============================================================================

pub use crate::markup::{
    AccordionAttributes, AccordionGroupAttributes, HeaderElement, render_accordion,
    render_accordion_group, render_selected_posts,
};
pub use crate::post_select::{DragAction, DraggableList, ListUpdate, SelectedPost, SelectedPosts};
