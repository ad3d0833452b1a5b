//! Main style resolution engine.

use crate::resolve::cascade::{Cascade, CascadeOrigin};
use crate::resolve::inheritance::resolve_properties;
use crate::rules::StyleSheet;
use crate::selector::{MatchTarget, SelectorMatcher};
use crate::style::{ComputedStyle, Declarations};

/// The main style resolution engine.
///
/// The engine holds stylesheets, matches selectors, cascades declarations,
/// and resolves final computed styles.
#[derive(Debug, Clone)]
pub struct StyleEngine {
    /// All registered stylesheets, sorted by priority.
    stylesheets: Vec<StyleSheet>,
}

impl StyleEngine {
    /// Create an engine with only the built-in user agent stylesheet.
    pub fn new() -> Self {
        Self {
            stylesheets: vec![StyleSheet::user_agent()],
        }
    }

    /// Create an engine with no stylesheets at all.
    pub fn empty() -> Self {
        Self {
            stylesheets: vec![],
        }
    }

    /// Add a stylesheet.
    pub fn add_stylesheet(&mut self, stylesheet: StyleSheet) {
        tracing::debug!(
            target: "snap_blocks_style",
            priority = ?stylesheet.priority,
            rules = stylesheet.len(),
            "adding stylesheet"
        );
        self.stylesheets.push(stylesheet);
        self.stylesheets.sort_by_key(|s| s.priority);
    }

    /// Remove stylesheets loaded from a specific file.
    pub fn remove_stylesheet_by_path(&mut self, path: &std::path::Path) {
        self.stylesheets.retain(|s| s.source_path.as_deref() != Some(path));
    }

    /// Clear all stylesheets.
    pub fn clear_stylesheets(&mut self) {
        self.stylesheets.clear();
    }

    /// Compute the style for an element.
    ///
    /// This performs the full style resolution:
    /// 1. Find all matching rules
    /// 2. Sort by importance, priority, specificity and source order
    /// 3. Apply inline declarations on top
    /// 4. Resolve inheritance against the parent's computed style
    pub fn compute<E: MatchTarget>(
        &self,
        element: &E,
        inline: Option<&Declarations>,
        parent: Option<&ComputedStyle>,
    ) -> ComputedStyle {
        let mut cascade = Cascade::new();
        let mut global_order = 0u32;

        for stylesheet in &self.stylesheets {
            for rule in &stylesheet.rules {
                if SelectorMatcher::matches(&rule.selector, element) {
                    cascade.push(
                        CascadeOrigin {
                            priority: stylesheet.priority,
                            specificity: rule.specificity,
                            order: global_order,
                        },
                        &rule.declarations,
                    );
                }
                global_order += 1;
            }
        }

        tracing::trace!(
            target: "snap_blocks_style",
            element = element.local_name(),
            matched = cascade.len(),
            "computing style"
        );

        if let Some(inline) = inline {
            cascade.push(CascadeOrigin::inline(), inline);
        }

        resolve_properties(cascade.resolve(), parent)
    }

    /// Get the number of loaded stylesheets.
    pub fn stylesheet_count(&self) -> usize {
        self.stylesheets.len()
    }

    /// Get the total number of rules across all stylesheets.
    pub fn rule_count(&self) -> usize {
        self.stylesheets.iter().map(|s| s.len()).sum()
    }
}

impl Default for StyleEngine {
    fn default() -> Self {
        Self::new()
    }
}
