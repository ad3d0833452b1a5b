//! Scroll position of the page.

use serde::{Deserialize, Serialize};

/// How a scroll should be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Defer to the page's `scroll-behavior`.
    Auto,
    /// Animate smoothly.
    #[default]
    Smooth,
    /// Jump immediately.
    Instant,
}

/// A scroll the page asked for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Target vertical offset, in pixels.
    pub top: f32,
    /// Requested animation.
    pub behavior: ScrollBehavior,
}

/// The vertical scroll state of a page.
///
/// Every call to [`scroll_by`](Self::scroll_by) or
/// [`scroll_to`](Self::scroll_to) is recorded so the embedder can replay it.
#[derive(Debug, Clone, Default)]
pub struct Viewport {
    scroll_y: f32,
    requests: Vec<ScrollRequest>,
}

impl Viewport {
    /// A viewport scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current vertical offset.
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Scroll relative to the current offset. The offset never goes below zero.
    pub fn scroll_by(&mut self, dy: f32, behavior: ScrollBehavior) {
        self.scroll_to(self.scroll_y + dy, behavior);
    }

    /// Scroll to an absolute offset.
    pub fn scroll_to(&mut self, top: f32, behavior: ScrollBehavior) {
        let top = top.max(0.0);
        tracing::trace!(target: "snap_blocks::dom", top, ?behavior, "scroll");
        self.scroll_y = top;
        self.requests.push(ScrollRequest { top, behavior });
    }

    /// Scroll requests recorded since the last [`take_requests`](Self::take_requests).
    pub fn requests(&self) -> &[ScrollRequest] {
        &self.requests
    }

    /// Drain the recorded scroll requests.
    pub fn take_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.requests)
    }
}
