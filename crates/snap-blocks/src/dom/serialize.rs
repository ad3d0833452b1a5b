//! Markup serialization.

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use super::document::{Document, NodeId, NodeKind};
use super::parser::is_void_element;

impl Document {
    /// Serialize a node and its subtree.
    ///
    /// Void elements are written self-closed; every other element gets an
    /// explicit end tag, so the output parses back with [`Document::parse`].
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut writer = Writer::new(Vec::new());
        self.write_node(&mut writer, node);
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }

    /// Serialize the children of a node.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut writer = Writer::new(Vec::new());
        for &child in self.children(node) {
            self.write_node(&mut writer, child);
        }
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }

    fn write_node(&self, writer: &mut Writer<Vec<u8>>, node: NodeId) {
        let Some(kind) = self.kind(node) else {
            return;
        };

        match kind {
            NodeKind::Document => {
                for &child in self.children(node) {
                    self.write_node(writer, child);
                }
            }
            NodeKind::Element(data) => {
                let mut start = BytesStart::new(data.local_name());
                for (key, value) in data.attributes() {
                    start.push_attribute((key, value));
                }

                if is_void_element(data.local_name()) {
                    let _ = writer.write_event(Event::Empty(start));
                    return;
                }

                let _ = writer.write_event(Event::Start(start));
                for &child in self.children(node) {
                    self.write_node(writer, child);
                }
                let _ = writer.write_event(Event::End(BytesEnd::new(data.local_name())));
            }
            NodeKind::Text(text) => {
                let _ = writer.write_event(Event::Text(BytesText::new(text)));
            }
            NodeKind::Comment(text) => {
                let _ = writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())));
            }
        }
    }
}
