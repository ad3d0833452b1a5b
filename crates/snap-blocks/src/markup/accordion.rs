//! Save markup of the accordion and accordion group blocks.

use serde::{Deserialize, Serialize};

use super::{MarkupError, MarkupWriter};

/// Tag wrapping the accordion's trigger button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderElement {
    /// `<h2>`
    #[default]
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
    /// `<p>`
    P,
}

impl HeaderElement {
    /// The tag name.
    pub fn tag(self) -> &'static str {
        match self {
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::P => "p",
        }
    }
}

/// Attributes of the `snap/accordion` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionAttributes {
    /// Ask to start open.
    pub is_initially_open: bool,
    /// Item id; trigger and panel ids are derived from it.
    pub accordion_id: String,
    /// Rich text of the header button.
    pub header_content: String,
    /// Tag wrapping the header button.
    pub header_element: HeaderElement,
}

impl AccordionAttributes {
    /// Parse the block's attribute JSON.
    pub fn from_json(json: &str) -> Result<Self, MarkupError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Attributes of the `snap/accordion-group` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccordionGroupAttributes {
    /// Allow several items to be open at once.
    pub is_multiple: bool,
    /// Group id.
    pub accordion_group_id: String,
}

impl AccordionGroupAttributes {
    /// Parse the block's attribute JSON.
    pub fn from_json(json: &str) -> Result<Self, MarkupError> {
        Ok(serde_json::from_str(json)?)
    }
}

const DOWN_ARROW_PATH: &str = "m24 30.8-12-12 2.15-2.15L24 26.5l9.85-9.85L36 18.8Z";

fn bool_attribute(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Render an accordion around already-rendered inner blocks.
///
/// The accordion is saved open; the page collapses it on load if needed.
///
/// ```
/// use snap_blocks::markup::{AccordionAttributes, render_accordion};
///
/// let attributes = AccordionAttributes {
///     accordion_id: "q1".to_string(),
///     header_content: "Delivery <em>times</em>".to_string(),
///     ..Default::default()
/// };
/// let html = render_accordion(&attributes, "<p>Two days.</p>").unwrap();
/// assert!(html.contains(r#"<button aria-expanded="true" aria-controls="q1-panel""#));
/// ```
pub fn render_accordion(
    attributes: &AccordionAttributes,
    inner_blocks: &str,
) -> Result<String, MarkupError> {
    let id = attributes.accordion_id.as_str();
    if id.is_empty() {
        return Err(MarkupError::MissingId {
            block: "snap/accordion",
        });
    }
    let trigger_id = format!("{id}-trigger");
    let panel_id = format!("{id}-panel");
    let header = attributes.header_element.tag();

    let mut out = MarkupWriter::new();
    out.start(
        "div",
        &[
            ("data-accordion", ""),
            ("data-is-initially-open", bool_attribute(attributes.is_initially_open)),
            ("id", id),
            ("class", "wp-block-snap-accordion"),
        ],
    )?;

    out.start(header, &[])?;
    out.start(
        "button",
        &[
            ("aria-expanded", "true"),
            ("aria-controls", panel_id.as_str()),
            ("data-state", "open"),
            ("id", trigger_id.as_str()),
            ("class", "accordion-header-button"),
        ],
    )?;
    out.start("span", &[("class", "accordion-header-button-text")])?;
    out.raw(&attributes.header_content)?;
    out.end("span")?;
    out.start(
        "svg",
        &[
            ("xmlns", "http://www.w3.org/2000/svg"),
            ("viewBox", "0 0 48 48"),
            ("class", "accordion-header-button-icon"),
        ],
    )?;
    out.empty("path", &[("d", DOWN_ARROW_PATH)])?;
    out.end("svg")?;
    out.end("button")?;
    out.end(header)?;

    out.start(
        "div",
        &[
            ("role", "region"),
            ("data-state", "open"),
            ("aria-labelledby", trigger_id.as_str()),
            ("id", panel_id.as_str()),
            ("class", "accordion-panel"),
        ],
    )?;
    out.start("div", &[("class", "accordion-panel-inner-wrapper")])?;
    out.raw(inner_blocks)?;
    out.end("div")?;
    out.end("div")?;

    out.end("div")?;
    Ok(out.finish())
}

/// Render an accordion group around already-rendered accordions.
pub fn render_accordion_group(
    attributes: &AccordionGroupAttributes,
    inner_blocks: &str,
) -> Result<String, MarkupError> {
    let id = attributes.accordion_group_id.as_str();
    if id.is_empty() {
        return Err(MarkupError::MissingId {
            block: "snap/accordion-group",
        });
    }

    let mut out = MarkupWriter::new();
    out.start(
        "div",
        &[
            ("id", id),
            ("data-accordion-group", ""),
            ("data-is-multiple", bool_attribute(attributes.is_multiple)),
            ("class", "wp-block-snap-accordion-group"),
        ],
    )?;
    out.raw(inner_blocks)?;
    out.end("div")?;
    Ok(out.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    #[test]
    fn accordion_markup_follows_contract() {
        let attributes = AccordionAttributes {
            is_initially_open: true,
            accordion_id: "q1".to_string(),
            header_content: "Fish &amp; chips".to_string(),
            header_element: HeaderElement::H3,
        };
        let html = render_accordion(&attributes, "<p>Inner</p>").unwrap();
        let doc = Document::parse(&html).unwrap();

        let root = doc.get_element_by_id("q1").unwrap();
        assert_eq!(doc.attribute(root, "data-is-initially-open"), Some("true"));
        assert!(doc.has_attribute(root, "data-accordion"));

        let trigger = doc.get_element_by_id("q1-trigger").unwrap();
        assert_eq!(doc.local_name(doc.parent(trigger).unwrap()), Some("h3"));
        assert_eq!(doc.attribute(trigger, "aria-controls"), Some("q1-panel"));
        assert_eq!(doc.text_content(trigger), "Fish & chips");

        let panel = doc.get_element_by_id("q1-panel").unwrap();
        assert_eq!(doc.attribute(panel, "aria-labelledby"), Some("q1-trigger"));
        assert_eq!(doc.attribute(panel, "role"), Some("region"));
        assert_eq!(doc.text_content(panel), "Inner");
    }

    #[test]
    fn header_element_defaults_to_h2() {
        let attributes = AccordionAttributes::from_json(r#"{"accordionId":"q9","headerContent":"Hi"}"#).unwrap();
        assert_eq!(attributes.header_element, HeaderElement::H2);
        assert!(!attributes.is_initially_open);

        let html = render_accordion(&attributes, "").unwrap();
        assert!(html.contains("<h2><button"));
        assert!(html.contains(r#"data-is-initially-open="false""#));
    }

    #[test]
    fn unknown_header_element_is_rejected() {
        assert!(matches!(
            AccordionAttributes::from_json(r#"{"headerElement":"h1"}"#),
            Err(MarkupError::Attributes(_))
        ));
    }

    #[test]
    fn group_markup() {
        let attributes = AccordionGroupAttributes {
            is_multiple: true,
            accordion_group_id: "faq".to_string(),
        };
        assert_eq!(
            render_accordion_group(&attributes, "").unwrap(),
            r#"<div id="faq" data-accordion-group="" data-is-multiple="true" class="wp-block-snap-accordion-group"></div>"#
        );
    }

    #[test]
    fn missing_ids_are_errors() {
        assert!(matches!(
            render_accordion(&AccordionAttributes::default(), ""),
            Err(MarkupError::MissingId { block: "snap/accordion" })
        ));
        assert!(render_accordion_group(&AccordionGroupAttributes::default(), "").is_err());
    }
}
