//! Logging facilities for Snap Blocks.
//!
//! Snap Blocks uses the `tracing` crate for instrumentation. Library code never
//! installs a subscriber; to see logs, install one in the embedding program:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("snap_blocks::accordion=debug")
//!     .init();
//! ```

/// Span names used throughout Snap Blocks for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Accordion discovery pass.
    pub const DISCOVERY: &str = "snap_blocks::discovery";
    /// Deferred task dispatch.
    pub const DISPATCH: &str = "snap_blocks::dispatch";
    /// Markup parsing.
    pub const MARKUP: &str = "snap_blocks::markup";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "snap_blocks_core";
    /// Event loop target.
    pub const EVENT_LOOP: &str = "snap_blocks_core::event_loop";
    /// Timer system target.
    pub const TIMER: &str = "snap_blocks_core::timer";
    /// Signal system target.
    pub const SIGNAL: &str = "snap_blocks_core::signal";
    /// Style resolution target.
    pub const STYLE: &str = "snap_blocks_style";
    /// Document model target.
    pub const DOM: &str = "snap_blocks::dom";
    /// Accordion state machines target.
    pub const ACCORDION: &str = "snap_blocks::accordion";
    /// Page runtime target.
    pub const PAGE: &str = "snap_blocks::page";
    /// Post selector target.
    pub const POST_SELECT: &str = "snap_blocks::post_select";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long an operation took.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::debug_span!(target: "snap_blocks::perf", "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perf_span_can_be_entered_without_subscriber() {
        let _span = PerfSpan::new(span_names::DISCOVERY);
        tracing::debug!(target: "snap_blocks_core", "inside perf span");
    }

    #[test]
    fn targets_are_namespaced() {
        for target in [targets::EVENT_LOOP, targets::TIMER, targets::SIGNAL] {
            assert!(target.starts_with(targets::CORE));
        }
    }
}
