//! Snap Blocks - interactive content blocks rendered from saved markup.
//!
//! The crate binds the front-end behaviour of the blocks to a parsed
//! document:
//!
//! - **Accordions**: groups of collapsible panels with an optional
//!   single-open policy, timed collapse and scroll compensation
//! - **Page runtime**: discovery, click dispatch and deferred work
//! - **Markup**: the save output of the accordion, accordion group and
//!   manual post select blocks
//! - **Post selection**: the drag-and-drop reordering of selected posts
//!
//! # Example
//!
//! ```
//! use snap_blocks::prelude::*;
//!
//! let accordion = render_accordion(
//!     &AccordionAttributes {
//!         accordion_id: "shipping".to_string(),
//!         header_content: "Shipping".to_string(),
//!         ..Default::default()
//!     },
//!     "<p>Two to three days.</p>",
//! )
//! .unwrap();
//! let group = render_accordion_group(
//!     &AccordionGroupAttributes {
//!         accordion_group_id: "faq".to_string(),
//!         is_multiple: false,
//!     },
//!     &accordion,
//! )
//! .unwrap();
//!
//! let markup = format!(
//!     "<style>.accordion-panel {{ --snap-accordion-open-close-timing: 0.3s; }}</style>{group}"
//! );
//! let mut page = Page::parse(&markup).unwrap();
//! let report = page.enable_all_accordions().unwrap();
//! assert!(report.is_ok());
//!
//! let shipping = page.find_item("shipping").unwrap();
//! assert_eq!(page.item_state(shipping), Some(AccordionState::Collapsed));
//! ```

pub mod accordion;
pub mod config;
pub mod dom;
pub mod markup;
pub mod page;
pub mod post_select;
pub mod prelude;

pub use accordion::{AccordionError, AccordionState, ItemHandle};
pub use config::{AccordionConfig, ConfigError};
pub use dom::{Document, DomError, NodeId};
pub use page::{Page, PageTask};

/// Runtime plumbing, re-exported.
pub use snap_blocks_core as core;
/// Styling, re-exported.
pub use snap_blocks_style as style;

static_assertions::assert_impl_all!(Document: Clone, Send);
static_assertions::assert_impl_all!(Page: Send);
static_assertions::assert_impl_all!(AccordionError: std::error::Error, Send, Sync);
static_assertions::assert_impl_all!(PageTask: Copy, Send);
