//! Block save renderers.
//!
//! These produce the markup the block editor stores in post content, which is
//! what [`Page`](crate::page::Page) later binds to. Rich text and inner block
//! markup are passed through as-is; attribute values and plain text are
//! escaped.

mod accordion;
mod post_select;

pub use accordion::{
    AccordionAttributes, AccordionGroupAttributes, HeaderElement, render_accordion,
    render_accordion_group,
};
pub use post_select::{render_selected_posts, selected_posts_from_document};

use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::dom::DomError;

/// Errors raised while rendering or reading back block markup.
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    /// The block has no id to derive element ids from.
    #[error("block '{block}' has no id")]
    MissingId { block: &'static str },

    /// A rendered post has no `data-post-id`.
    #[error("selected post {index} has no data-post-id")]
    MissingPostId { index: usize },

    /// Block attributes were not valid JSON for the block.
    #[error("invalid block attributes: {0}")]
    Attributes(#[from] serde_json::Error),

    /// The markup could not be parsed or queried.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// The writer failed to emit an event.
    #[error("failed to write markup: {0}")]
    Xml(#[from] std::io::Error),
}

/// Thin wrapper over a `quick-xml` writer.
struct MarkupWriter {
    writer: Writer<Vec<u8>>,
}

impl MarkupWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), MarkupError> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Start(start))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), MarkupError> {
        let start = BytesStart::new(name).with_attributes(attributes.iter().copied());
        self.writer.write_event(Event::Empty(start))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<(), MarkupError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), MarkupError> {
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// Write markup that is already escaped.
    fn raw(&mut self, html: &str) -> Result<(), MarkupError> {
        self.writer.write_event(Event::Text(BytesText::from_escaped(html)))?;
        Ok(())
    }

    fn finish(self) -> String {
        String::from_utf8_lossy(&self.writer.into_inner()).into_owned()
    }
}
