//! Declarations and computed styles.

mod computed;
mod declarations;

pub use computed::ComputedStyle;
pub use declarations::{Declaration, Declarations, is_custom_property};
pub(crate) use declarations::normalize_name;
