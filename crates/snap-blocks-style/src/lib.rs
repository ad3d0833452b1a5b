//! CSS styling for Snap Blocks documents.
//!
//! This crate provides the subset of CSS the interactive blocks depend on:
//!
//! - **CSS Parsing**: Stylesheets, `style` attributes and selector lists via `cssparser`
//! - **Selectors**: Type, class, ID, attribute, structural pseudo-classes and combinators
//! - **Cascading**: Stylesheet priority, specificity, source order and `!important`
//! - **Custom Properties**: `--*` inheritance and `var()` substitution
//! - **Values**: Time (`300ms`, `0.3s`) and pixel length parsing
//!
//! # Example
//!
//! ```
//! use snap_blocks_style::prelude::*;
//!
//! let sheet = StyleSheet::from_css(
//!     ".accordion-panel { --snap-accordion-open-close-timing: 0.3s; }",
//!     StylePriority::Author,
//! ).unwrap();
//!
//! let mut engine = StyleEngine::new();
//! engine.add_stylesheet(sheet);
//! assert_eq!(engine.stylesheet_count(), 2);
//!
//! let timing = parse_time("0.3s").unwrap();
//! assert_eq!(timing.as_millis(), 300);
//! ```

pub mod parser;
pub mod resolve;
pub mod rules;
pub mod selector;
pub mod style;
pub mod types;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::resolve::StyleEngine;
    pub use crate::rules::{StylePriority, StyleRule, StyleSheet};
    pub use crate::selector::{
        Combinator, MatchTarget, PseudoClass, Selector, SelectorList, SelectorMatcher,
        SelectorPart, SiblingInfo, Specificity,
    };
    pub use crate::style::{ComputedStyle, Declaration, Declarations};
    pub use crate::types::{format_px, parse_px, parse_time};
}
