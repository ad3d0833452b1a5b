//! Style resolution: cascade, inheritance and the engine tying them together.

mod cascade;
mod engine;
mod inheritance;

pub use cascade::{CascadeOrigin, Cascade};
pub use engine::StyleEngine;
pub use inheritance::{INHERITED_PROPERTIES, is_inherited, resolve_properties, substitute_vars};
