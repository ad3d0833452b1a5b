//! Property inheritance and resolution to computed values.

use std::collections::HashMap;

use crate::style::{ComputedStyle, is_custom_property};

/// Standard properties that inherit from the parent by default.
///
/// Custom properties (`--*`) always inherit.
pub const INHERITED_PROPERTIES: &[&str] = &[
    "color",
    "cursor",
    "font-family",
    "font-size",
    "font-style",
    "font-weight",
    "letter-spacing",
    "line-height",
    "text-align",
    "visibility",
    "white-space",
];

const MAX_VAR_DEPTH: usize = 16;

/// Whether a property inherits when not specified.
pub fn is_inherited(name: &str) -> bool {
    is_custom_property(name) || INHERITED_PROPERTIES.contains(&name)
}

/// Resolve cascaded values to a computed style, handling inheritance.
///
/// - Unspecified inherited properties take the parent's value
/// - `inherit`, `initial` and `unset` keywords are resolved
/// - `var(--name, fallback)` references are substituted
pub fn resolve_properties(
    cascaded: HashMap<String, String>,
    parent: Option<&ComputedStyle>,
) -> ComputedStyle {
    let mut computed = ComputedStyle::new();

    if let Some(parent) = parent {
        for (name, value) in parent.iter() {
            if is_inherited(name) {
                computed.set(name, value);
            }
        }
    }

    for (name, value) in cascaded {
        let keyword = value.to_ascii_lowercase();
        let inherit = match keyword.as_str() {
            "inherit" => true,
            "initial" => false,
            "unset" => is_inherited(&name),
            _ => {
                computed.set(name, value);
                continue;
            }
        };

        match parent.and_then(|p| p.get(&name)).filter(|_| inherit) {
            Some(parent_value) => computed.set(name, parent_value),
            None => computed.remove(&name),
        }
    }

    let custom: HashMap<String, String> = computed
        .iter()
        .filter(|(name, _)| is_custom_property(name))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    let substituted: Vec<(String, Option<String>)> = computed
        .iter()
        .filter(|(_, value)| value.contains("var("))
        .map(|(name, value)| (name.to_string(), substitute_vars(value, &custom)))
        .collect();

    for (name, value) in substituted {
        match value {
            Some(value) => computed.set(name, value),
            None => {
                tracing::debug!(target: "snap_blocks_style", property = %name, "unresolvable var() reference");
                computed.remove(&name);
            }
        }
    }

    computed
}

/// Substitute `var()` references in a value.
///
/// Returns `None` if a reference has neither a value nor a fallback, or if
/// references nest too deeply (including cycles).
pub fn substitute_vars(value: &str, custom: &HashMap<String, String>) -> Option<String> {
    substitute(value, custom, 0)
}

fn substitute(value: &str, custom: &HashMap<String, String>, depth: usize) -> Option<String> {
    if depth > MAX_VAR_DEPTH {
        return None;
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("var(") {
        out.push_str(&rest[..start]);
        let args_start = start + "var(".len();
        let args_len = matching_paren(&rest[args_start..])?;
        let args = &rest[args_start..args_start + args_len];

        let (name, fallback) = match args.split_once(',') {
            Some((name, fallback)) => (name.trim(), Some(fallback.trim())),
            None => (args.trim(), None),
        };

        let replacement = match custom.get(name) {
            Some(found) => substitute(found, custom, depth + 1)?,
            None => substitute(fallback?, custom, depth + 1)?,
        };
        out.push_str(&replacement);
        rest = &rest[args_start + args_len + 1..];
    }

    out.push_str(rest);
    Some(out.trim().to_string())
}

/// Length of the text before the `)` closing an already-opened parenthesis.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}
