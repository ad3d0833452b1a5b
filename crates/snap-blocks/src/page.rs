//! The page runtime: a document, its accordions and their deferred work.
//!
//! # Example
//!
//! ```
//! use snap_blocks::prelude::*;
//! use std::time::Duration;
//!
//! let markup = r#"
//! <style>.accordion-panel { --snap-accordion-open-close-timing: 300ms; }</style>
//! <div id="faq" data-accordion-group data-is-multiple="false">
//!   <div id="q1" data-accordion data-is-initially-open="true">
//!     <h2><button id="q1-trigger">One</button></h2>
//!     <div id="q1-panel" class="accordion-panel" role="region"><p>First</p></div>
//!   </div>
//!   <div id="q2" data-accordion>
//!     <h2><button id="q2-trigger">Two</button></h2>
//!     <div id="q2-panel" class="accordion-panel" role="region"><p>Second</p></div>
//!   </div>
//! </div>"#;
//!
//! let clock = ManualClock::new();
//! let mut page = Page::with_options(
//!     Document::parse(markup).unwrap(),
//!     AccordionConfig::default(),
//!     clock.clone(),
//! );
//! let report = page.enable_all_accordions().unwrap();
//! assert_eq!(report.initialised.len(), 1);
//!
//! let q2 = page.find_item("q2").unwrap();
//! let trigger = page.item(q2).unwrap().trigger();
//! page.click(trigger).unwrap();
//!
//! clock.advance(Duration::from_millis(1));
//! page.process_pending();
//! assert_eq!(page.item_state(q2), Some(AccordionState::Open));
//! ```

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use snap_blocks_core::logging::span_names;
use snap_blocks_core::{Clock, EventLoop, PerfSpan, Signal, SystemClock};

use crate::accordion::{
    AccordionError, AccordionGroup, AccordionItem, AccordionState, BoundGroup, Discovery,
    DiscoveryFailure, DiscoveryReport, ItemDebug, ItemHandle, Result, StateChange, Transition,
};
use crate::config::AccordionConfig;
use crate::dom::{Document, DomResult, NodeId, Viewport};

/// Deferred accordion work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTask {
    /// The next-tick half of an open.
    FinishOpen {
        /// The item being opened.
        item: ItemHandle,
        /// The item's generation when the open started.
        generation: u64,
    },
    /// Remove a collapsed panel from layout.
    HidePanel {
        /// The item that was closed.
        item: ItemHandle,
        /// The item's generation when the close happened.
        generation: u64,
    },
}

/// A document with its accordions bound.
pub struct Page {
    document: Document,
    viewport: Viewport,
    tasks: EventLoop<PageTask>,
    config: AccordionConfig,
    groups: Vec<AccordionGroup>,
    triggers: HashMap<NodeId, ItemHandle>,
    bound: HashSet<NodeId>,
    state_changed: Signal<StateChange>,
}

impl Page {
    /// Wrap a document using the default config and the system clock.
    pub fn new(document: Document) -> Self {
        Self::with_options(document, AccordionConfig::default(), SystemClock::new())
    }

    /// Wrap a document with a specific config and clock.
    pub fn with_options(
        document: Document,
        config: AccordionConfig,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            document,
            viewport: Viewport::new(),
            tasks: EventLoop::with_clock(clock),
            config,
            groups: vec![],
            triggers: HashMap::new(),
            bound: HashSet::new(),
            state_changed: Signal::new(),
        }
    }

    /// Parse markup into a page with default options.
    pub fn parse(markup: &str) -> DomResult<Self> {
        Ok(Self::new(Document::parse(markup)?))
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the document.
    ///
    /// Removing nodes that bound accordions refer to makes their later
    /// transitions fail with [`AccordionError::Dom`].
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The viewport.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable access to the viewport.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The active config.
    pub fn config(&self) -> &AccordionConfig {
        &self.config
    }

    /// Emitted whenever an accordion item changes state.
    pub fn state_changed(&self) -> &Signal<StateChange> {
        &self.state_changed
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    /// Bind every accordion group at or under `root`.
    ///
    /// Each group is bound independently: a malformed group is reported in
    /// [`DiscoveryReport::failures`] and leaves the document untouched, while
    /// the other groups still bind. Containers bound by an earlier call are
    /// skipped, so this can be called again after new markup is inserted.
    ///
    /// Fails only if the configured selectors do not parse.
    pub fn enable_accordions(&mut self, root: NodeId) -> Result<DiscoveryReport> {
        let _span = PerfSpan::new(span_names::DISCOVERY);
        self.tasks.sync();

        let discovery = Discovery::new(&self.config)?;
        let mut report = DiscoveryReport::default();

        for container in discovery.containers(&self.document, root) {
            if self.bound.contains(&container) {
                report.skipped += 1;
                continue;
            }

            let index = self.groups.len();
            let result = {
                let (_, mut cx) = self.split();
                AccordionGroup::discover(container, index, &discovery, &mut cx)
            };

            match result {
                Ok(group) => {
                    self.register_triggers(&group);
                    self.bound.insert(container);
                    report.initialised.push(BoundGroup {
                        index,
                        id: group.id().to_string(),
                        items: group.len(),
                    });
                    self.groups.push(group);
                }
                Err(error) => {
                    tracing::warn!(
                        target: "snap_blocks::page",
                        id = self.document.id(container).unwrap_or_default(),
                        %error,
                        "accordion group failed to initialise"
                    );
                    report.failures.push(DiscoveryFailure { container, error });
                }
            }
        }

        tracing::debug!(
            target: "snap_blocks::page",
            initialised = report.initialised.len(),
            failed = report.failures.len(),
            skipped = report.skipped,
            "accordion discovery finished"
        );
        Ok(report)
    }

    /// Bind every accordion group in the document.
    pub fn enable_all_accordions(&mut self) -> Result<DiscoveryReport> {
        let root = self.document.root();
        self.enable_accordions(root)
    }

    fn register_triggers(&mut self, group: &AccordionGroup) {
        for item in group.items() {
            if let Some(previous) = self.triggers.insert(item.trigger(), item.handle()) {
                tracing::warn!(
                    target: "snap_blocks::page",
                    item = item.id(),
                    ?previous,
                    "trigger already bound to another accordion"
                );
            }
        }
    }

    // =========================================================================
    // Interaction
    // =========================================================================

    /// Deliver a click to `target`.
    ///
    /// The click bubbles from `target` up to the nearest bound trigger, whose
    /// item is toggled. Returns that item, or `None` if no trigger was hit.
    pub fn click(&mut self, target: NodeId) -> Result<Option<ItemHandle>> {
        let hit = std::iter::once(target)
            .chain(self.document.ancestors(target))
            .find_map(|node| self.triggers.get(&node).copied());

        match hit {
            Some(item) => {
                self.toggle(item)?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Open an item.
    pub fn open(&mut self, item: ItemHandle) -> Result<()> {
        self.with_group(item, |group, index, cx| group.open_item(index, cx))
    }

    /// Close an item.
    pub fn close(&mut self, item: ItemHandle) -> Result<()> {
        self.with_group(item, |group, index, cx| group.close_item(index, cx))
    }

    /// Close an item if it is open, otherwise open it.
    pub fn toggle(&mut self, item: ItemHandle) -> Result<()> {
        self.with_group(item, |group, index, cx| group.toggle_item(index, cx))
    }

    /// Close every item of a group.
    pub fn close_all(&mut self, group: usize) -> Result<()> {
        self.tasks.sync();
        let (groups, mut cx) = self.split();
        groups
            .get_mut(group)
            .ok_or(AccordionError::UnknownGroup(group))?
            .close_all_accordions(&mut cx)
    }

    fn with_group<R>(
        &mut self,
        item: ItemHandle,
        f: impl FnOnce(&mut AccordionGroup, usize, &mut Transition<'_>) -> Result<R>,
    ) -> Result<R> {
        self.tasks.sync();
        let (groups, mut cx) = self.split();
        let group = groups
            .get_mut(item.group)
            .ok_or(AccordionError::UnknownItem(item))?;
        f(group, item.index, &mut cx)
    }

    fn split(&mut self) -> (&mut Vec<AccordionGroup>, Transition<'_>) {
        let Self {
            document,
            viewport,
            tasks,
            config,
            groups,
            state_changed,
            ..
        } = self;
        (
            groups,
            Transition {
                document,
                viewport,
                tasks,
                config,
                state_changed,
            },
        )
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Bound groups in discovery order.
    pub fn groups(&self) -> &[AccordionGroup] {
        &self.groups
    }

    /// The group at `index`.
    pub fn group(&self, index: usize) -> Option<&AccordionGroup> {
        self.groups.get(index)
    }

    /// The first bound item with the given id.
    pub fn find_item(&self, id: &str) -> Option<ItemHandle> {
        self.groups
            .iter()
            .flat_map(|group| group.items())
            .find(|item| item.id() == id)
            .map(AccordionItem::handle)
    }

    /// The item behind a handle.
    pub fn item(&self, item: ItemHandle) -> Option<&AccordionItem> {
        self.groups.get(item.group)?.item(item.index)
    }

    /// An item's state.
    pub fn item_state(&self, item: ItemHandle) -> Option<AccordionState> {
        self.item(item).map(AccordionItem::state)
    }

    /// Diagnostic snapshot of an item.
    pub fn debug_item(&self, item: ItemHandle) -> Option<ItemDebug> {
        let group = self.groups.get(item.group)?;
        Some(group.item(item.index)?.debug(group.id()))
    }

    // =========================================================================
    // Deferred work
    // =========================================================================

    /// Run every deferred task that is due. Returns how many ran.
    ///
    /// Tasks that fail (because the document was edited underneath a bound
    /// accordion) are logged and skipped.
    #[tracing::instrument(skip_all, target = "snap_blocks::page", level = "trace")]
    pub fn process_pending(&mut self) -> usize {
        let _span = PerfSpan::new(span_names::DISPATCH);
        let mut processed = 0;
        while let Some(task) = self.tasks.pop_due() {
            processed += 1;
            if let Err(error) = self.dispatch(task) {
                tracing::warn!(target: "snap_blocks::page", ?task, %error, "deferred accordion task failed");
            }
        }
        processed
    }

    fn dispatch(&mut self, task: PageTask) -> Result<()> {
        let (groups, mut cx) = self.split();
        match task {
            PageTask::FinishOpen { item, generation } => {
                let group = groups
                    .get_mut(item.group)
                    .ok_or(AccordionError::UnknownItem(item))?;
                group.finish_open(item.index, generation, &mut cx)?;
            }
            PageTask::HidePanel { item, generation } => {
                let group = groups
                    .get_mut(item.group)
                    .ok_or(AccordionError::UnknownItem(item))?;
                group.hide_panel(item.index, generation, cx.document)?;
            }
        }
        Ok(())
    }

    /// Time until the next deferred task is due.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.tasks.time_until_next()
    }

    /// Number of deferred tasks waiting.
    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending_count()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("groups", &self.groups.len())
            .field("triggers", &self.triggers.len())
            .field("pending_tasks", &self.tasks.pending_count())
            .field("scroll_y", &self.viewport.scroll_y())
            .finish()
    }
}
