//! A small document object model.
//!
//! The accordion state machines operate on a [`Document`]: an arena-backed
//! node tree with attributes, inline styles and author stylesheets resolved
//! through `snap-blocks-style`. A [`Viewport`] tracks the page's scroll
//! position.

mod debug;
mod document;
mod element;
mod error;
mod parser;
mod query;
mod serialize;
mod style;
mod viewport;

pub use debug::{DocumentTreeDebug, TreeFormatOptions, TreeStyle};
pub use document::{Document, ElementData, NodeId, NodeKind};
pub use element::ElementRef;
pub use error::{DomError, DomResult};
pub use parser::{VOID_ELEMENTS, is_void_element};
pub use viewport::{ScrollBehavior, ScrollRequest, Viewport};
