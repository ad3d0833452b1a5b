//! CSS specificity calculation.

use super::{PseudoClass, Selector, SelectorPart, TypeSelector};

/// CSS specificity as (a, b, c) tuple.
///
/// - a: ID selectors
/// - b: Class selectors, attributes, pseudo-classes
/// - c: Type selectors
///
/// Compared lexicographically: (1,0,0) > (0,99,99)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (universal selector).
    pub const ZERO: Self = Self(0, 0, 0);

    /// Inline style specificity (always wins over selectors).
    pub const INLINE: Self = Self(u32::MAX, u32::MAX, u32::MAX);

    /// Calculate specificity of a selector.
    pub fn of_selector(selector: &Selector) -> Self {
        let mut a = 0u32;
        let mut b = 0u32;
        let mut c = 0u32;

        for part in &selector.parts {
            Self::add_part(part, &mut a, &mut b, &mut c);
        }

        Self(a, b, c)
    }

    fn add_part(part: &SelectorPart, a: &mut u32, b: &mut u32, c: &mut u32) {
        if part.id.is_some() {
            *a += 1;
        }

        *b += part.classes.len() as u32;
        *b += part.attributes.len() as u32;

        for pseudo in &part.pseudo_classes {
            match pseudo {
                // :not() specificity is that of its argument
                PseudoClass::Not(inner) => Self::add_part(inner, a, b, c),
                _ => *b += 1,
            }
        }

        if let Some(TypeSelector::Type(_)) = &part.type_selector {
            *c += 1;
        }
    }

    /// Combine with source order for complete ordering.
    pub fn with_order(self, order: u32) -> SpecificityWithOrder {
        SpecificityWithOrder {
            specificity: self,
            order,
        }
    }
}

impl std::fmt::Display for Specificity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{},{})", self.0, self.1, self.2)
    }
}

/// Specificity combined with source order for tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecificityWithOrder {
    /// The CSS specificity value.
    pub specificity: Specificity,
    /// Source order for tie-breaking (higher = later in stylesheet).
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::AttributeSelector;

    #[test]
    fn specificity_calculation() {
        assert_eq!(Specificity::of_selector(&Selector::universal()), Specificity(0, 0, 0));
        assert_eq!(Specificity::of_selector(&Selector::type_selector("div")), Specificity(0, 0, 1));
        assert_eq!(Specificity::of_selector(&Selector::class("accordion-panel")), Specificity(0, 1, 0));
        assert_eq!(Specificity::of_selector(&Selector::id("faq")), Specificity(1, 0, 0));

        // div.accordion-panel[data-state] -> (0,2,1)
        let sel = Selector::compound(
            SelectorPart::type_only("div")
                .with_class("accordion-panel")
                .with_attribute(AttributeSelector::exists("data-state")),
        );
        assert_eq!(Specificity::of_selector(&sel), Specificity(0, 2, 1));
    }

    #[test]
    fn not_takes_specificity_of_argument() {
        let sel = Selector::compound(
            SelectorPart::class_only("panel")
                .with_pseudo(PseudoClass::Not(Box::new(SelectorPart::id_only("skip")))),
        );
        assert_eq!(Specificity::of_selector(&sel), Specificity(1, 1, 0));
    }

    #[test]
    fn order_breaks_ties() {
        let early = Specificity(0, 1, 0).with_order(1);
        let late = Specificity(0, 1, 0).with_order(2);
        assert!(late > early);
        assert!(Specificity(1, 0, 0).with_order(0) > late);
    }
}
