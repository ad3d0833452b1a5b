//! Markup parsing with `quick-xml`.
//!
//! The accepted syntax is XHTML-compatible HTML: every element is closed or
//! self-closed, except the HTML void elements (`br`, `img`, `input`, ...)
//! which may also appear unclosed. Valueless attributes (`data-accordion`)
//! and unquoted values are accepted. Character references resolve against
//! the full HTML5 entity set. `<style>` contents are parsed into author
//! stylesheets.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use snap_blocks_core::PerfSpan;
use snap_blocks_core::logging::span_names;
use snap_blocks_style::prelude::{StylePriority, StyleSheet};

use super::document::{Document, NodeId};
use super::error::{DomError, DomResult};

/// Elements that never have content or an end tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `local_name` is an HTML void element.
pub fn is_void_element(local_name: &str) -> bool {
    VOID_ELEMENTS.contains(&local_name)
}

impl Document {
    /// Parse a document from markup.
    ///
    /// ```
    /// use snap_blocks::dom::Document;
    ///
    /// let doc = Document::parse(r#"<div id="faq" data-accordion-group><p>Hi</p></div>"#).unwrap();
    /// let group = doc.get_element_by_id("faq").unwrap();
    /// assert!(doc.has_attribute(group, "data-accordion-group"));
    /// ```
    pub fn parse(markup: &str) -> DomResult<Self> {
        let _span = PerfSpan::new(span_names::MARKUP);
        let mut document = Document::new();
        let root = document.root;
        document.parse_fragment_into(root, markup)?;
        tracing::debug!(target: "snap_blocks::dom", nodes = document.node_count(), "parsed document");
        Ok(document)
    }

    /// Parse a markup fragment and append its top-level nodes to `parent`.
    ///
    /// Returns the appended nodes.
    pub fn parse_fragment_into(&mut self, parent: NodeId, markup: &str) -> DomResult<Vec<NodeId>> {
        if !self.contains(parent) {
            return Err(DomError::InvalidNode);
        }

        let mut reader = Reader::from_str(markup);
        reader.config_mut().check_end_names = false;

        let mut stack: Vec<NodeId> = vec![parent];
        let mut appended = vec![];

        loop {
            let position = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|e| DomError::parse(position, e))?;

            match event {
                Event::Eof => break,
                Event::Start(start) => {
                    let element = self.open_element(&start, position)?;
                    self.attach(&stack, element, &mut appended)?;
                    if !is_void_element(self.local_name(element).unwrap_or_default()) {
                        stack.push(element);
                    }
                }
                Event::Empty(empty) => {
                    let element = self.open_element(&empty, position)?;
                    self.attach(&stack, element, &mut appended)?;
                }
                Event::End(end) => {
                    let qname = end.name();
                    let name = decode(qname.as_ref()).to_ascii_lowercase();
                    if is_void_element(&name) {
                        continue;
                    }
                    let open = stack.len() > 1;
                    let current = *stack.last().ok_or(DomError::InvalidNode)?;
                    if !open || self.local_name(current) != Some(name.as_str()) {
                        return Err(DomError::Unbalanced {
                            expected: if open {
                                self.local_name(current).unwrap_or_default().to_string()
                            } else {
                                "(none)".to_string()
                            },
                            found: format!("</{name}>"),
                        });
                    }
                    stack.pop();
                    if name == "style" {
                        self.register_style_element(current);
                    }
                }
                Event::Text(text) => {
                    let content = text.unescape().map_err(|e| DomError::parse(position, e))?;
                    if !content.trim().is_empty() {
                        let node = self.create_text(content);
                        self.attach(&stack, node, &mut appended)?;
                    }
                }
                Event::CData(cdata) => {
                    let node = self.create_text(decode(&cdata));
                    self.attach(&stack, node, &mut appended)?;
                }
                Event::Comment(comment) => {
                    let node = self.create_comment(decode(&comment));
                    self.attach(&stack, node, &mut appended)?;
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
        }

        if stack.len() > 1 {
            let open = stack.last().and_then(|&n| self.local_name(n)).unwrap_or_default();
            return Err(DomError::Unbalanced {
                expected: open.to_string(),
                found: "end of input".to_string(),
            });
        }

        Ok(appended)
    }

    fn open_element(&mut self, start: &BytesStart<'_>, position: u64) -> DomResult<NodeId> {
        let qname = start.name();
        let name = decode(qname.as_ref());
        let element = self.create_element(&name);

        for attribute in start.html_attributes() {
            let attribute = attribute.map_err(|e| DomError::parse(position, e))?;
            let key = decode(attribute.key.as_ref());
            let value = attribute
                .unescape_value()
                .map_err(|e| DomError::parse(position, e))?;
            self.set_attribute(element, &key, value.into_owned())?;
        }
        Ok(element)
    }

    fn attach(&mut self, stack: &[NodeId], node: NodeId, appended: &mut Vec<NodeId>) -> DomResult<()> {
        let parent = *stack.last().ok_or(DomError::InvalidNode)?;
        self.append_child(parent, node)?;
        if stack.len() == 1 {
            appended.push(node);
        }
        Ok(())
    }

    fn register_style_element(&mut self, node: NodeId) {
        let css = self.text_content(node);
        match StyleSheet::from_css(&css, StylePriority::Author) {
            Ok(sheet) => self.add_stylesheet(sheet),
            Err(e) => {
                tracing::warn!(target: "snap_blocks::dom", error = %e, "ignoring unparsable <style> element")
            }
        }
    }
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc = Document::parse(
            r#"<div id="faq" data-accordion-group data-is-multiple=true class="a b">
                <h2><button aria-expanded="true">Q &amp; A</button></h2>
            </div>"#,
        )
        .unwrap();

        let group = doc.get_element_by_id("faq").unwrap();
        assert_eq!(doc.attribute(group, "data-accordion-group"), Some(""));
        assert_eq!(doc.data_attribute(group, "is-multiple"), Some("true"));
        assert!(doc.has_class(group, "b"));

        let button = doc.query_selector(group, "button").unwrap().unwrap();
        assert_eq!(doc.text_content(button), "Q & A");
    }

    #[test]
    fn void_elements_need_no_end_tag() {
        let doc = Document::parse(r#"<p>a<br>b<img src="x.png"></p><hr/>"#).unwrap();
        let top: Vec<_> = doc.element_children(doc.root()).collect();

        assert_eq!(top.len(), 2);
        assert_eq!(doc.element_children(top[0]).count(), 2);
        assert_eq!(doc.text_content(top[0]), "ab");
    }

    #[test]
    fn style_elements_become_stylesheets() {
        let doc = Document::parse(
            r#"<style>.accordion-panel { --snap-accordion-open-close-timing: 0.3s; }</style>
               <div class="accordion-panel" id="p"></div>"#,
        )
        .unwrap();

        let panel = doc.get_element_by_id("p").unwrap();
        let style = doc.computed_style(panel).unwrap();
        assert_eq!(style.property_value("--snap-accordion-open-close-timing"), "0.3s");
    }

    #[test]
    fn style_attributes_become_inline_declarations() {
        let doc = Document::parse(r#"<div id="p" style="display: none; height: 10px"></div>"#).unwrap();
        let panel = doc.get_element_by_id("p").unwrap();

        assert_eq!(doc.style_property(panel, "height"), Some("10px"));
        assert!(!doc.is_rendered(panel));
    }

    #[test]
    fn html_entities_are_resolved() {
        let doc = Document::parse("<p>a&nbsp;b</p>").unwrap();
        assert_eq!(doc.text_content(doc.root()), "a\u{a0}b");
    }

    #[test]
    fn xml_and_numeric_entities_are_resolved() {
        let doc = Document::parse(
            r#"<p title="Tom &amp; &quot;Jerry&quot;">&lt;b&gt; Fish &amp; chips &#8211; &rsquo;n&apos;&#x41;</p>"#,
        )
        .unwrap();
        let p = doc.element_children(doc.root()).next().unwrap();

        assert_eq!(doc.attribute(p, "title"), Some(r#"Tom & "Jerry""#));
        assert_eq!(doc.text_content(p), "<b> Fish & chips \u{2013} \u{2019}n'A");
    }

    #[test]
    fn unknown_entities_are_errors() {
        assert!(matches!(
            Document::parse("<p>&notanentity;</p>"),
            Err(DomError::Parse { .. })
        ));
    }

    #[test]
    fn mismatched_end_tags_are_errors() {
        assert!(matches!(
            Document::parse("<div><p></div>"),
            Err(DomError::Unbalanced { .. })
        ));
        assert!(matches!(Document::parse("<div>"), Err(DomError::Unbalanced { .. })));
        assert!(Document::parse("</div>").is_err());
    }

    #[test]
    fn fragments_append_to_parent() {
        let mut doc = Document::parse(r#"<div id="wrapper"></div>"#).unwrap();
        let wrapper = doc.get_element_by_id("wrapper").unwrap();

        let appended = doc
            .parse_fragment_into(wrapper, "<p>one</p> <p>two</p>")
            .unwrap();

        assert_eq!(appended.len(), 2);
        assert_eq!(doc.children(wrapper), appended.as_slice());
    }
}
