//! CSS selectors: types, parsing, specificity and matching.

mod matcher;
mod specificity;
mod types;

pub use matcher::{MatchTarget, SelectorMatcher, SiblingInfo};
pub use specificity::{Specificity, SpecificityWithOrder};
pub use types::{
    AttributeOperation, AttributeSelector, Combinator, PseudoClass, Selector, SelectorList,
    SelectorPart, TypeSelector,
};

impl SelectorList {
    /// Parse a comma-separated selector list.
    ///
    /// ```
    /// use snap_blocks_style::selector::SelectorList;
    ///
    /// let list = SelectorList::parse("[data-accordion-group], .faq > [data-accordion]").unwrap();
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn parse(selectors: &str) -> crate::Result<Self> {
        crate::parser::parse_selector_list(selectors)
    }
}
