//! Element lookup: ids and selectors.

use snap_blocks_style::selector::{SelectorList, SelectorMatcher};

use super::document::{Document, NodeId};
use super::element::ElementRef;
use super::error::DomResult;

impl Document {
    /// The first connected element in document order with the given `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.descendant_elements(self.root)
            .into_iter()
            .find(|&node| self.id(node) == Some(id))
    }

    /// Whether the element matches any selector in the list.
    pub fn matches(&self, node: NodeId, selectors: &SelectorList) -> bool {
        ElementRef::new(self, node)
            .is_some_and(|element| SelectorMatcher::matches_list(selectors, &element))
    }

    /// Descendants of `scope` matching a parsed selector list, in document order.
    pub fn select_all(&self, scope: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.descendant_elements(scope)
            .into_iter()
            .filter(|&node| self.matches(node, selectors))
            .collect()
    }

    /// `querySelectorAll`: descendants of `scope` matching `selectors`.
    pub fn query_selector_all(&self, scope: NodeId, selectors: &str) -> DomResult<Vec<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        Ok(self.select_all(scope, &list))
    }

    /// `querySelector`: the first descendant of `scope` matching `selectors`.
    pub fn query_selector(&self, scope: NodeId, selectors: &str) -> DomResult<Option<NodeId>> {
        let list = SelectorList::parse(selectors)?;
        Ok(self
            .descendant_elements(scope)
            .into_iter()
            .find(|&node| self.matches(node, &list)))
    }

    /// The nearest inclusive ancestor matching the selector list.
    pub fn closest(&self, node: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        std::iter::once(node)
            .chain(self.ancestors(node))
            .find(|&candidate| self.matches(candidate, selectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomError;

    fn faq() -> Document {
        Document::parse(
            r#"<main>
                <div id="faq" data-accordion-group="" data-is-multiple="false">
                    <div data-accordion="" id="q1"><h2><button id="q1-trigger">One</button></h2></div>
                    <div data-accordion="" id="q2"><h2><button id="q2-trigger">Two</button></h2></div>
                </div>
                <p id="q1">duplicate id</p>
            </main>"#,
        )
        .unwrap()
    }

    #[test]
    fn get_element_by_id_returns_first_in_document_order() {
        let doc = faq();
        let q1 = doc.get_element_by_id("q1").unwrap();

        assert_eq!(doc.local_name(q1), Some("div"));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.get_element_by_id(""), None);
    }

    #[test]
    fn query_selector_all_is_scoped_and_ordered() {
        let doc = faq();
        let group = doc.get_element_by_id("faq").unwrap();

        let items = doc.query_selector_all(group, "[data-accordion]").unwrap();
        let ids: Vec<_> = items.iter().map(|&n| doc.id(n).unwrap()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);

        let buttons = doc.query_selector_all(doc.root(), "#faq h2 > button").unwrap();
        assert_eq!(buttons.len(), 2);

        assert!(doc.query_selector_all(group, "#faq").unwrap().is_empty());
    }

    #[test]
    fn query_selector_and_closest() {
        let doc = faq();
        let button = doc.query_selector(doc.root(), "button").unwrap().unwrap();
        let list = SelectorList::parse("[data-accordion]").unwrap();

        let item = doc.closest(button, &list).unwrap();
        assert_eq!(doc.id(item), Some("q1"));
        assert_eq!(doc.closest(item, &list), Some(item));
    }

    #[test]
    fn invalid_selectors_are_errors() {
        let doc = faq();
        assert!(matches!(
            doc.query_selector_all(doc.root(), "div >"),
            Err(DomError::Style(_))
        ));
    }
}
