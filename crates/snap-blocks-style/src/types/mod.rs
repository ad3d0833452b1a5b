//! Typed CSS values.

mod length;
mod time;

pub use length::{format_px, parse_px};
pub use time::parse_time;
