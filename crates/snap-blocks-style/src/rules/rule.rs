//! Single style rule definition.

use crate::selector::{Selector, Specificity, SpecificityWithOrder};
use crate::style::Declarations;

/// A style rule mapping a selector to declarations.
///
/// Each rule has:
/// - A selector that determines which elements it applies to
/// - Declarations to apply when the selector matches
/// - Pre-computed specificity for efficient sorting
/// - Source order (for tie-breaking when specificity is equal)
#[derive(Debug, Clone)]
pub struct StyleRule {
    /// The selector for matching elements.
    pub selector: Selector,
    /// The declarations to apply.
    pub declarations: Declarations,
    /// Pre-computed specificity.
    pub specificity: Specificity,
    /// Source order within the stylesheet.
    pub order: u32,
}

impl StyleRule {
    /// Create a new style rule.
    pub fn new(selector: Selector, declarations: Declarations, order: u32) -> Self {
        let specificity = Specificity::of_selector(&selector);
        Self {
            selector,
            declarations,
            specificity,
            order,
        }
    }

    /// Create a rule with a type selector.
    pub fn for_type(tag: impl Into<String>, declarations: Declarations, order: u32) -> Self {
        Self::new(Selector::type_selector(tag), declarations, order)
    }

    /// Create a rule with a class selector.
    pub fn for_class(class: impl Into<String>, declarations: Declarations, order: u32) -> Self {
        Self::new(Selector::class(class), declarations, order)
    }

    /// Create a rule with an ID selector.
    pub fn for_id(id: impl Into<String>, declarations: Declarations, order: u32) -> Self {
        Self::new(Selector::id(id), declarations, order)
    }

    /// Get the specificity with source order for comparison.
    pub fn specificity_with_order(&self) -> SpecificityWithOrder {
        self.specificity.with_order(self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_creation() {
        let rule = StyleRule::for_type("div", Declarations::parse("height: 10px"), 0);

        assert_eq!(rule.specificity, Specificity(0, 0, 1));
        assert_eq!(rule.order, 0);
        assert_eq!(rule.declarations.get("height"), Some("10px"));
    }

    #[test]
    fn rule_specificity_comparison() {
        let declarations = Declarations::new();

        let type_rule = StyleRule::for_type("div", declarations.clone(), 0);
        let class_rule = StyleRule::for_class("accordion-panel", declarations.clone(), 1);
        let id_rule = StyleRule::for_id("faq-panel", declarations, 2);

        assert!(id_rule.specificity > class_rule.specificity);
        assert!(class_rule.specificity > type_rule.specificity);
        assert!(class_rule.specificity_with_order() > type_rule.specificity_with_order());
    }
}
