//! Property cascading logic.

use std::collections::HashMap;

use crate::rules::StylePriority;
use crate::selector::Specificity;
use crate::style::Declarations;

/// Where a block of declarations came from, used to order it in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CascadeOrigin {
    /// Stylesheet priority.
    pub priority: StylePriority,
    /// Specificity of the matching selector.
    pub specificity: Specificity,
    /// Global source order across stylesheets.
    pub order: u32,
}

impl CascadeOrigin {
    /// The origin of a `style` attribute.
    pub fn inline() -> Self {
        Self {
            priority: StylePriority::Inline,
            specificity: Specificity::INLINE,
            order: u32::MAX,
        }
    }
}

/// Collects matched declaration blocks and resolves which value wins for
/// each property.
///
/// Declarations are ordered by (importance, priority, specificity, order);
/// the last one in that order wins.
#[derive(Debug, Default)]
pub struct Cascade<'a> {
    blocks: Vec<(CascadeOrigin, &'a Declarations)>,
}

impl<'a> Cascade<'a> {
    /// Create an empty cascade.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a matched declaration block.
    pub fn push(&mut self, origin: CascadeOrigin, declarations: &'a Declarations) {
        self.blocks.push((origin, declarations));
    }

    /// Number of declaration blocks collected.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Resolve to the winning specified value for each property.
    pub fn resolve(mut self) -> HashMap<String, String> {
        self.blocks.sort_by_key(|(origin, _)| *origin);

        let mut cascaded = HashMap::new();
        for important in [false, true] {
            for (_, declarations) in &self.blocks {
                for declaration in declarations.iter().filter(|d| d.important == important) {
                    cascaded.insert(declaration.name.clone(), declaration.value.clone());
                }
            }
        }
        cascaded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(priority: StylePriority, specificity: Specificity, order: u32) -> CascadeOrigin {
        CascadeOrigin {
            priority,
            specificity,
            order,
        }
    }

    #[test]
    fn higher_specificity_wins_regardless_of_order() {
        let class = Declarations::parse("height: 10px");
        let tag = Declarations::parse("height: 20px");

        let mut cascade = Cascade::new();
        cascade.push(origin(StylePriority::Author, Specificity(0, 1, 0), 0), &class);
        cascade.push(origin(StylePriority::Author, Specificity(0, 0, 1), 1), &tag);

        assert_eq!(cascade.resolve()["height"], "10px");
    }

    #[test]
    fn later_rule_wins_on_equal_specificity() {
        let first = Declarations::parse("display: none");
        let second = Declarations::parse("display: flex");

        let mut cascade = Cascade::new();
        cascade.push(origin(StylePriority::Author, Specificity::ZERO, 1), &second);
        cascade.push(origin(StylePriority::Author, Specificity::ZERO, 0), &first);

        assert_eq!(cascade.resolve()["display"], "flex");
    }

    #[test]
    fn important_beats_inline() {
        let rule = Declarations::parse("display: none !important; height: 1px");
        let inline = Declarations::parse("display: block; height: 2px");

        let mut cascade = Cascade::new();
        cascade.push(origin(StylePriority::UserAgent, Specificity(0, 1, 0), 0), &rule);
        cascade.push(CascadeOrigin::inline(), &inline);

        let resolved = cascade.resolve();
        assert_eq!(resolved["display"], "none");
        assert_eq!(resolved["height"], "2px");
    }
}
