//! CSS syntax parser using the `cssparser` crate.
//!
//! This module turns stylesheet text into [`StyleRule`]s, `style` attribute
//! text into [`Declarations`], and selector text into [`SelectorList`]s.
//! Property values are kept as raw text; only the selector grammar is
//! interpreted here.

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use crate::rules::StyleRule;
use crate::selector::{
    AttributeOperation, AttributeSelector, Combinator, PseudoClass, Selector, SelectorList,
    SelectorPart, TypeSelector,
};
use crate::style::{Declaration, Declarations, normalize_name};
use crate::{Error, Result};

type SelectorParseError<'i> = CssParseError<'i, String>;

/// Parse a CSS stylesheet string into a list of style rules.
///
/// Rules are ordered by their appearance in the source, with each rule
/// assigned an incrementing order value for cascade tie-breaking.
///
/// # Error Recovery
///
/// Parse errors in individual rules do not cause the entire parse to fail.
/// The parser logs the error via `tracing::warn!`, skips past the offending
/// rule's block, and continues. At-rules are skipped the same way.
///
/// # Example
///
/// ```
/// use snap_blocks_style::parser::parse_css;
///
/// let css = ".accordion-panel { --snap-accordion-open-close-timing: 300ms; }";
/// let rules = parse_css(css).unwrap();
/// assert_eq!(rules.len(), 1);
/// ```
pub fn parse_css(css: &str) -> Result<Vec<StyleRule>> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut rules = vec![];
    let mut order = 0u32;

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        match parse_rule(&mut parser, order) {
            Ok(mut parsed) => {
                order += parsed.len() as u32;
                rules.append(&mut parsed);
            }
            Err(e) => {
                tracing::warn!(target: "snap_blocks_style", "CSS parse error: {}", e);
                skip_to_next_rule(&mut parser);
            }
        }
    }

    Ok(rules)
}

/// Parse a single CSS rule: `selector-list { declarations }`.
///
/// A selector list produces one rule per selector sharing the same
/// declarations, so each keeps its own specificity.
fn parse_rule<'i>(parser: &mut Parser<'i, '_>, order: u32) -> Result<Vec<StyleRule>> {
    let location = parser.current_source_location();
    let selectors = parser
        .parse_until_before(Delimiter::CurlyBracketBlock, parse_selectors)
        .map_err(|e| {
            Error::parse(
                format!("Failed to parse selector: {}", describe(&e)),
                location.line + 1,
                location.column,
            )
        })?;

    let declarations = match parser.next() {
        Ok(Token::CurlyBracketBlock) => parser
            .parse_nested_block(|block| Ok::<_, CssParseError<'_, ()>>(parse_declarations(block)))
            .map_err(|_| {
                Error::parse("Failed to parse declaration block", location.line + 1, location.column)
            })?,
        _ => {
            return Err(Error::parse(
                "Expected '{' after selector",
                location.line + 1,
                location.column,
            ));
        }
    };

    Ok(selectors
        .0
        .into_iter()
        .enumerate()
        .map(|(i, selector)| StyleRule::new(selector, declarations.clone(), order + i as u32))
        .collect())
}

/// Parse a declaration list such as a `style` attribute value.
pub fn parse_declaration_list(text: &str) -> Declarations {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parse_declarations(&mut parser)
}

/// Parse a comma-separated selector list.
pub fn parse_selector_list(text: &str) -> Result<SelectorList> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    parser
        .parse_entirely(parse_selectors)
        .map_err(|e| Error::invalid_selector(text, describe(&e)))
}

fn parse_selectors<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<SelectorList, SelectorParseError<'i>> {
    parser
        .parse_comma_separated(parse_selector)
        .map(SelectorList)
}

/// Parse one complex selector. Whitespace between compounds is significant.
fn parse_selector<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<Selector, SelectorParseError<'i>> {
    let mut parts = vec![];
    let mut combinators = vec![];
    let mut current = SelectorPart::default();
    let mut pending_descendant = false;

    parser.skip_whitespace();

    loop {
        let token = match parser.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        if starts_compound(&token) && pending_descendant && !current.is_empty() {
            parts.push(std::mem::take(&mut current));
            combinators.push(Combinator::Descendant);
        }
        pending_descendant = false;

        match token {
            Token::WhiteSpace(_) => pending_descendant = true,

            Token::Ident(name) => {
                if !current.is_empty() {
                    return Err(parser.new_custom_error(format!(
                        "type selector '{name}' must come first in a compound selector"
                    )));
                }
                current.type_selector = Some(TypeSelector::Type(name.to_ascii_lowercase()));
            }

            Token::Delim('*') => {
                if !current.is_empty() {
                    return Err(parser.new_custom_error("'*' must come first in a compound selector".to_string()));
                }
                current.type_selector = Some(TypeSelector::Universal);
            }

            Token::Delim('.') => match parser.next_including_whitespace() {
                Ok(Token::Ident(class)) => current.classes.push(class.to_string()),
                _ => return Err(parser.new_custom_error("expected class name after '.'".to_string())),
            },

            Token::IDHash(id) => {
                if current.id.is_some() {
                    return Err(parser.new_custom_error("compound selector has two IDs".to_string()));
                }
                current.id = Some(id.to_string());
            }

            Token::SquareBracketBlock => {
                let attribute = parser.parse_nested_block(parse_attribute_selector)?;
                current.attributes.push(attribute);
            }

            Token::Colon => {
                let pseudo = parse_pseudo_class(parser)?;
                current.pseudo_classes.push(pseudo);
            }

            Token::Delim('>') => {
                if current.is_empty() {
                    return Err(parser.new_custom_error("'>' without a left-hand selector".to_string()));
                }
                parts.push(std::mem::take(&mut current));
                combinators.push(Combinator::Child);
                parser.skip_whitespace();
            }

            other => {
                return Err(parser.new_custom_error(format!("unsupported token {other:?} in selector")));
            }
        }
    }

    if current.is_empty() {
        return Err(parser.new_custom_error("empty selector".to_string()));
    }
    parts.push(current);

    Ok(Selector { parts, combinators })
}

fn starts_compound(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Ident(_)
            | Token::Delim('*')
            | Token::Delim('.')
            | Token::IDHash(_)
            | Token::SquareBracketBlock
            | Token::Colon
    )
}

/// Parse the inside of `[...]`.
fn parse_attribute_selector<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<AttributeSelector, SelectorParseError<'i>> {
    let name = parser.expect_ident()?.to_ascii_lowercase();

    if parser.is_exhausted() {
        return Ok(AttributeSelector::exists(name));
    }

    let include = match parser.next()? {
        Token::Delim('=') => false,
        Token::IncludeMatch => true,
        other => {
            let message = format!("unsupported attribute operator {other:?}");
            return Err(parser.new_custom_error(message));
        }
    };

    let value = match parser.next()? {
        Token::Ident(value) | Token::QuotedString(value) => value.to_string(),
        other => {
            let message = format!("unsupported attribute value {other:?}");
            return Err(parser.new_custom_error(message));
        }
    };
    parser.expect_exhausted()?;

    let operation = if include {
        AttributeOperation::Includes(value)
    } else {
        AttributeOperation::Equals(value)
    };
    Ok(AttributeSelector { name, operation })
}

/// Parse the pseudo-class following a `:`.
fn parse_pseudo_class<'i>(
    parser: &mut Parser<'i, '_>,
) -> std::result::Result<PseudoClass, SelectorParseError<'i>> {
    match parser.next_including_whitespace()?.clone() {
        Token::Ident(name) => match name.to_ascii_lowercase().as_str() {
            "root" => Ok(PseudoClass::Root),
            "first-child" => Ok(PseudoClass::FirstChild),
            "last-child" => Ok(PseudoClass::LastChild),
            other => Err(parser.new_custom_error(format!("unknown pseudo-class ':{other}'"))),
        },
        Token::Function(name) if name.eq_ignore_ascii_case("not") => {
            let inner = parser.parse_nested_block(|p| {
                let selector = parse_selector(p)?;
                match <[SelectorPart; 1]>::try_from(selector.parts) {
                    Ok([part]) => Ok(part),
                    Err(_) => Err(p.new_custom_error(":not() takes a compound selector".to_string())),
                }
            })?;
            Ok(PseudoClass::Not(Box::new(inner)))
        }
        other => Err(parser.new_custom_error(format!("unexpected {other:?} after ':'"))),
    }
}

/// Parse declarations until the input (or enclosing block) is exhausted.
fn parse_declarations(parser: &mut Parser<'_, '_>) -> Declarations {
    let mut declarations = Declarations::new();

    loop {
        parser.skip_whitespace();

        if parser.is_exhausted() {
            break;
        }

        let name = match parser.next() {
            Ok(Token::Ident(name)) => name.to_string(),
            Ok(Token::Semicolon) => continue,
            _ => {
                skip_declaration(parser);
                continue;
            }
        };

        if parser.expect_colon().is_err() {
            skip_declaration(parser);
            continue;
        }

        let start = parser.position();
        let _ = parser.parse_until_before(Delimiter::Semicolon, |p| {
            while p.next().is_ok() {}
            Ok::<_, CssParseError<'_, ()>>(())
        });
        let (value, important) = split_important(parser.slice_from(start));

        if value.is_empty() && !name.starts_with("--") {
            tracing::warn!(target: "snap_blocks_style", property = %name, "dropping declaration with empty value");
        } else {
            declarations.push(Declaration {
                name: normalize_name(name),
                value: value.to_string(),
                important,
            });
        }

        let _ = parser.try_parse(|p| p.expect_semicolon());
    }

    declarations
}

/// Split a trailing `!important` off a raw value.
fn split_important(raw: &str) -> (&str, bool) {
    let trimmed = raw.trim();
    if let Some(bang) = trimmed.rfind('!') {
        if trimmed[bang + 1..].trim().eq_ignore_ascii_case("important") {
            return (trimmed[..bang].trim_end(), true);
        }
    }
    (trimmed, false)
}

/// Skip to just past the next top-level semicolon.
fn skip_declaration(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_until_after(Delimiter::Semicolon, |p| {
        while p.next().is_ok() {}
        Ok::<_, CssParseError<'_, ()>>(())
    });
}

/// Skip tokens until the next rule boundary.
fn skip_to_next_rule(parser: &mut Parser<'_, '_>) {
    loop {
        match parser.next() {
            // Block contents are skipped when the next token is requested.
            Ok(Token::CurlyBracketBlock) => return,
            Ok(Token::Semicolon) => return,
            Ok(_) => {}
            Err(_) => return,
        }
    }
}

fn describe<E: std::fmt::Debug>(error: &CssParseError<'_, E>) -> String {
    match &error.kind {
        cssparser::ParseErrorKind::Custom(custom) => format!("{custom:?}"),
        cssparser::ParseErrorKind::Basic(basic) => format!("{basic:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_rule() {
        let rules = parse_css("div { height: 120px; }").unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector.to_string(), "div");
        assert_eq!(rules[0].declarations.get("height"), Some("120px"));
    }

    #[test]
    fn parse_custom_property_rule() {
        let css = ".accordion-panel { --snap-accordion-open-close-timing: 0.3s; }";
        let rules = parse_css(css).unwrap();

        assert_eq!(
            rules[0].declarations.get("--snap-accordion-open-close-timing"),
            Some("0.3s")
        );
    }

    #[test]
    fn selector_lists_split_into_rules() {
        let rules = parse_css(":root, .faq { --gap: 4px; } div { color: red; }").unwrap();

        assert_eq!(rules.len(), 3);
        assert_eq!(rules[0].order, 0);
        assert_eq!(rules[1].order, 1);
        assert_eq!(rules[2].order, 2);
        assert_eq!(rules[1].declarations.get("--gap"), Some("4px"));
    }

    #[test]
    fn recovers_from_bad_rules() {
        let css = r#"
            @media (min-width: 600px) { .a { color: red; } }
            div::before { content: "x"; }
            .ok { display: none; }
        "#;
        let rules = parse_css(css).unwrap();

        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selector.to_string(), ".ok");
    }

    #[test]
    fn important_is_detected() {
        let declarations = parse_declaration_list("display: none !important; height:10px");

        let display = declarations.iter().find(|d| d.name == "display").unwrap();
        assert!(display.important);
        assert_eq!(display.value, "none");
        assert_eq!(declarations.get("height"), Some("10px"));
    }

    #[test]
    fn malformed_declarations_are_skipped() {
        let declarations = parse_declaration_list("height 10px; ; display: none; 12: x; --t: 1s");

        assert_eq!(declarations.get("display"), Some("none"));
        assert_eq!(declarations.get("--t"), Some("1s"));
        assert_eq!(declarations.len(), 2);
    }

    #[test]
    fn parse_descendant_and_child_selectors() {
        let list = parse_selector_list("#faq .accordion-panel, [data-accordion] > div").unwrap();

        assert_eq!(list.0[0].parts.len(), 2);
        assert_eq!(list.0[0].combinators, vec![Combinator::Descendant]);
        assert_eq!(list.0[1].combinators, vec![Combinator::Child]);
        assert_eq!(list.to_string(), "#faq .accordion-panel, [data-accordion] > div");
    }

    #[test]
    fn parse_compound_with_attributes() {
        let list = parse_selector_list(r#".accordion-panel[data-state="open"]"#).unwrap();
        let part = &list.0[0].parts[0];

        assert_eq!(part.classes, vec!["accordion-panel".to_string()]);
        assert_eq!(part.attributes, vec![AttributeSelector::equals("data-state", "open")]);
    }

    #[test]
    fn parse_pseudo_classes() {
        let list = parse_selector_list(":root, li:first-child:not(.skip)").unwrap();

        assert_eq!(list.0[0].parts[0].pseudo_classes, vec![PseudoClass::Root]);
        assert_eq!(list.0[1].parts[0].pseudo_classes.len(), 2);
    }

    #[test]
    fn rejects_invalid_selectors() {
        for text in ["", "> div", "div >", ".", "a:hover", "[data-x^=y]", "div,"] {
            assert!(parse_selector_list(text).is_err(), "{text:?} should be rejected");
        }
    }
}
