//! Selector matching algorithm.

use super::{
    AttributeOperation, AttributeSelector, Combinator, PseudoClass, Selector, SelectorList,
    SelectorPart, TypeSelector,
};

/// Sibling position information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiblingInfo {
    /// Zero-based index among element siblings.
    pub index: usize,
    /// Total number of element siblings (including self).
    pub count: usize,
}

impl SiblingInfo {
    /// Returns true if this is the first sibling.
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Returns true if this is the last sibling.
    pub fn is_last(&self) -> bool {
        self.index + 1 == self.count
    }
}

/// An element that selectors can be matched against.
///
/// Implementors are cheap handles (typically a document reference plus a
/// node key), so walking to the parent returns a new handle by value.
pub trait MatchTarget: Sized {
    /// The element's local name (e.g. `div`).
    fn local_name(&self) -> &str;

    /// Value of an attribute, if present.
    fn attribute(&self, name: &str) -> Option<&str>;

    /// The parent element, or `None` for a top-level element.
    fn parent_element(&self) -> Option<Self>;

    /// Position among the parent's element children.
    fn sibling_info(&self) -> SiblingInfo;

    /// The element's `id` attribute.
    fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whether the whitespace-separated `class` attribute contains `class`.
    fn has_class(&self, class: &str) -> bool {
        self.attribute("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }
}

/// Selector matching engine.
pub struct SelectorMatcher;

impl SelectorMatcher {
    /// Check whether any selector in the list matches the element.
    pub fn matches_list<E: MatchTarget>(list: &SelectorList, element: &E) -> bool {
        list.iter().any(|selector| Self::matches(selector, element))
    }

    /// Check whether a full selector, including combinators, matches the element.
    pub fn matches<E: MatchTarget>(selector: &Selector, element: &E) -> bool {
        if selector.parts.is_empty() {
            return false;
        }
        Self::matches_from(selector, selector.parts.len() - 1, element)
    }

    /// Match `parts[..=index]` with `parts[index]` anchored on `element`.
    fn matches_from<E: MatchTarget>(selector: &Selector, index: usize, element: &E) -> bool {
        if !Self::part_matches(&selector.parts[index], element) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match selector.combinators[index - 1] {
            Combinator::Child => element
                .parent_element()
                .is_some_and(|parent| Self::matches_from(selector, index - 1, &parent)),
            Combinator::Descendant => {
                let mut ancestor = element.parent_element();
                while let Some(candidate) = ancestor {
                    if Self::matches_from(selector, index - 1, &candidate) {
                        return true;
                    }
                    ancestor = candidate.parent_element();
                }
                false
            }
        }
    }

    /// Check if a compound selector matches the element itself.
    pub fn part_matches<E: MatchTarget>(part: &SelectorPart, element: &E) -> bool {
        if let Some(TypeSelector::Type(name)) = &part.type_selector {
            if !name.eq_ignore_ascii_case(element.local_name()) {
                return false;
            }
        }

        if let Some(id) = &part.id {
            if element.id() != Some(id.as_str()) {
                return false;
            }
        }

        if !part.classes.iter().all(|class| element.has_class(class)) {
            return false;
        }

        if !part
            .attributes
            .iter()
            .all(|attribute| Self::attribute_matches(attribute, element))
        {
            return false;
        }

        part.pseudo_classes
            .iter()
            .all(|pseudo| Self::pseudo_matches(pseudo, element))
    }

    fn attribute_matches<E: MatchTarget>(attribute: &AttributeSelector, element: &E) -> bool {
        let Some(value) = element.attribute(&attribute.name) else {
            return false;
        };
        match &attribute.operation {
            AttributeOperation::Exists => true,
            AttributeOperation::Equals(expected) => value == expected,
            AttributeOperation::Includes(word) => {
                value.split_ascii_whitespace().any(|candidate| candidate == word)
            }
        }
    }

    fn pseudo_matches<E: MatchTarget>(pseudo: &PseudoClass, element: &E) -> bool {
        match pseudo {
            PseudoClass::Root => element.parent_element().is_none(),
            PseudoClass::FirstChild => element.sibling_info().is_first(),
            PseudoClass::LastChild => element.sibling_info().is_last(),
            PseudoClass::Not(inner) => !Self::part_matches(inner, element),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::AttributeSelector;

    /// A tiny static tree: index-addressed nodes with parent links.
    struct Node {
        name: &'static str,
        attributes: Vec<(&'static str, &'static str)>,
        parent: Option<usize>,
    }

    #[derive(Clone, Copy)]
    struct NodeRef<'a> {
        tree: &'a [Node],
        index: usize,
    }

    impl MatchTarget for NodeRef<'_> {
        fn local_name(&self) -> &str {
            self.tree[self.index].name
        }

        fn attribute(&self, name: &str) -> Option<&str> {
            self.tree[self.index]
                .attributes
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
        }

        fn parent_element(&self) -> Option<Self> {
            self.tree[self.index].parent.map(|index| NodeRef {
                tree: self.tree,
                index,
            })
        }

        fn sibling_info(&self) -> SiblingInfo {
            let parent = self.tree[self.index].parent;
            let siblings: Vec<usize> = (0..self.tree.len())
                .filter(|&i| self.tree[i].parent == parent)
                .collect();
            SiblingInfo {
                index: siblings.iter().position(|&i| i == self.index).unwrap_or(0),
                count: siblings.len(),
            }
        }
    }

    fn tree() -> Vec<Node> {
        vec![
            Node {
                name: "div",
                attributes: vec![("id", "faq"), ("data-accordion-group", "")],
                parent: None,
            },
            Node {
                name: "div",
                attributes: vec![("data-accordion", ""), ("class", "wp-block snap-accordion")],
                parent: Some(0),
            },
            Node {
                name: "div",
                attributes: vec![("class", "accordion-panel"), ("data-state", "open")],
                parent: Some(1),
            },
        ]
    }

    #[test]
    fn compound_parts_match() {
        let tree = tree();
        let panel = NodeRef { tree: &tree, index: 2 };

        let sel = Selector::compound(
            SelectorPart::type_only("DIV")
                .with_class("accordion-panel")
                .with_attribute(AttributeSelector::equals("data-state", "open")),
        );
        assert!(SelectorMatcher::matches(&sel, &panel));

        let sel = Selector::compound(
            SelectorPart::class_only("accordion-panel")
                .with_attribute(AttributeSelector::equals("data-state", "collapsed")),
        );
        assert!(!SelectorMatcher::matches(&sel, &panel));
    }

    #[test]
    fn combinators_walk_ancestors() {
        let tree = tree();
        let panel = NodeRef { tree: &tree, index: 2 };

        let descendant = Selector::id("faq").descendant(SelectorPart::class_only("accordion-panel"));
        assert!(SelectorMatcher::matches(&descendant, &panel));

        let child = Selector::id("faq").child(SelectorPart::class_only("accordion-panel"));
        assert!(!SelectorMatcher::matches(&child, &panel));

        let child = Selector::attribute("data-accordion").child(SelectorPart::class_only("accordion-panel"));
        assert!(SelectorMatcher::matches(&child, &panel));
    }

    #[test]
    fn structural_pseudo_classes() {
        let tree = tree();
        let root = NodeRef { tree: &tree, index: 0 };
        let item = NodeRef { tree: &tree, index: 1 };

        let root_sel = Selector::compound(SelectorPart::new().with_pseudo(PseudoClass::Root));
        assert!(SelectorMatcher::matches(&root_sel, &root));
        assert!(!SelectorMatcher::matches(&root_sel, &item));

        let only = Selector::compound(
            SelectorPart::universal()
                .with_pseudo(PseudoClass::FirstChild)
                .with_pseudo(PseudoClass::LastChild),
        );
        assert!(SelectorMatcher::matches(&only, &item));

        let not_group = Selector::compound(
            SelectorPart::universal().with_pseudo(PseudoClass::Not(Box::new(
                SelectorPart::new().with_attribute(AttributeSelector::exists("data-accordion-group")),
            ))),
        );
        assert!(!SelectorMatcher::matches(&not_group, &root));
        assert!(SelectorMatcher::matches(&not_group, &item));
    }

    #[test]
    fn has_class_splits_on_whitespace() {
        let tree = tree();
        let item = NodeRef { tree: &tree, index: 1 };
        assert!(item.has_class("snap-accordion"));
        assert!(!item.has_class("snap"));
    }
}
