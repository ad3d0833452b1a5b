//! A single accordion: one trigger button and one content panel.

use std::time::Duration;

use snap_blocks_core::TimerId;
use snap_blocks_style::types::{format_px, parse_px, parse_time};

use super::Transition;
use super::error::{AccordionError, Result};
use super::state::{AccordionState, ItemDebug, ItemHandle, StateChange};
use crate::config::AccordionConfig;
use crate::dom::{Document, NodeId};
use crate::page::PageTask;

/// The open/collapsed state machine of one accordion.
///
/// Items start [`Open`](AccordionState::Open); their group collapses the ones
/// that should not stay open right after binding them.
///
/// Every `open` and `close` bumps the item's generation. Deferred work
/// carries the generation it was armed with:
///
/// - the open tick only lands if nothing has happened to the item since;
/// - a hide timer is dropped once the item has been opened after it was armed.
#[derive(Debug)]
pub struct AccordionItem {
    id: String,
    handle: ItemHandle,
    element: NodeId,
    trigger: NodeId,
    panel: NodeId,
    state: AccordionState,
    close_timer: Option<TimerId>,
    cached_height: Option<f32>,
    generation: u64,
    opened_generation: u64,
}

impl AccordionItem {
    /// Locate the trigger and panel of `element`. Does not touch the document.
    pub(crate) fn bind(
        document: &Document,
        element: NodeId,
        handle: ItemHandle,
        group_id: &str,
        config: &AccordionConfig,
    ) -> Result<Self> {
        let id = document
            .id(element)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AccordionError::MissingItemId {
                group: group_id.to_string(),
            })?
            .to_string();

        let trigger_id = format!("{id}{}", config.trigger_suffix);
        let Some(trigger) = document.get_element_by_id(&trigger_id) else {
            return Err(AccordionError::MissingTrigger {
                item: id,
                expected: trigger_id,
            });
        };

        let panel_id = format!("{id}{}", config.panel_suffix);
        let Some(panel) = document.get_element_by_id(&panel_id) else {
            return Err(AccordionError::MissingPanel {
                item: id,
                expected: panel_id,
            });
        };

        Ok(Self {
            id,
            handle,
            element,
            trigger,
            panel,
            state: AccordionState::Open,
            close_timer: None,
            cached_height: None,
            generation: 0,
            opened_generation: 0,
        })
    }

    /// The item's id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Where the item lives on the page.
    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    /// The item's root element.
    pub fn element(&self) -> NodeId {
        self.element
    }

    /// The trigger button.
    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    /// The content panel.
    pub fn panel(&self) -> NodeId {
        self.panel
    }

    /// Current state.
    pub fn state(&self) -> AccordionState {
        self.state
    }

    /// Whether the item is open.
    pub fn is_open(&self) -> bool {
        self.state == AccordionState::Open
    }

    /// The most recently armed hide timer, if one was armed and has not fired.
    pub fn close_timer(&self) -> Option<TimerId> {
        self.close_timer
    }

    /// Snapshot for diagnostics, also logged at `debug` level.
    pub fn debug(&self, group_id: &str) -> ItemDebug {
        let snapshot = ItemDebug {
            id: self.id.clone(),
            state: self.state,
            group_id: group_id.to_string(),
        };
        tracing::debug!(target: "snap_blocks::accordion", ?snapshot, "accordion item");
        snapshot
    }

    /// Copy the panel's computed height into its inline style.
    pub(crate) fn pin_height(&self, document: &mut Document) -> Result<()> {
        let height = document
            .computed_style(self.panel)
            .and_then(|style| style.height_px());
        if let Some(height) = height {
            document.set_style_property(self.panel, "height", &format_px(height))?;
        }
        Ok(())
    }

    /// Height of the panel for scroll compensation: the inline height, else
    /// the rendered height.
    pub(crate) fn panel_height(&self, document: &Document) -> Option<f32> {
        document
            .style_property(self.panel, "height")
            .and_then(parse_px)
            .or_else(|| document.rendered_height(self.panel))
    }

    /// Read the collapse duration from the panel's computed style.
    pub(crate) fn resolve_timing(
        &self,
        document: &Document,
        config: &AccordionConfig,
    ) -> Result<Duration> {
        let value = document
            .computed_style(self.panel)
            .map(|style| style.property_value(&config.timing_property).to_string())
            .unwrap_or_default();
        parse_time(&value).map_err(|source| AccordionError::InvalidTiming {
            item: self.id.clone(),
            value,
            source,
        })
    }

    /// Collapse now and hide the panel after `timing`.
    ///
    /// A previously armed hide timer is left running.
    pub(crate) fn close_with(&mut self, timing: Duration, cx: &mut Transition<'_>) -> Result<()> {
        let collapsed = AccordionState::Collapsed;
        cx.document.set_attribute(self.panel, "aria-hidden", "true")?;
        cx.document.set_attribute(self.panel, "data-state", collapsed.as_str())?;
        cx.document
            .set_attribute(self.trigger, "aria-expanded", collapsed.aria_expanded())?;
        cx.document.set_attribute(self.trigger, "data-state", collapsed.as_str())?;

        self.generation += 1;
        let timer = cx.tasks.schedule(
            timing,
            PageTask::HidePanel {
                item: self.handle,
                generation: self.generation,
            },
        );
        self.close_timer = Some(timer);
        tracing::trace!(target: "snap_blocks::accordion", item = %self.id, ?timing, "closing");

        self.set_state(collapsed, cx);
        Ok(())
    }

    /// Cancel the pending hide timer, if any.
    pub(crate) fn cancel_pending_close(&mut self, cx: &mut Transition<'_>) {
        if let Some(timer) = self.close_timer.take() {
            if cx.tasks.cancel(timer).is_ok() {
                tracing::trace!(target: "snap_blocks::accordion", item = %self.id, "cancelled pending hide");
            }
        }
    }

    /// Reveal the panel and defer the state flip to the next tick.
    pub(crate) fn begin_open(&mut self, cached_height: Option<f32>, cx: &mut Transition<'_>) -> Result<()> {
        cx.document.remove_style_property(self.panel, "display")?;

        self.generation += 1;
        self.opened_generation = self.generation;
        self.cached_height = cached_height;
        cx.tasks.schedule(
            cx.config.open_tick(),
            PageTask::FinishOpen {
                item: self.handle,
                generation: self.generation,
            },
        );
        tracing::trace!(target: "snap_blocks::accordion", item = %self.id, "opening");
        Ok(())
    }

    /// The deferred half of `open`. Returns `false` if the tick was stale.
    pub(crate) fn finish_open(
        &mut self,
        generation: u64,
        exclusive: bool,
        cx: &mut Transition<'_>,
    ) -> Result<bool> {
        if generation != self.generation {
            tracing::trace!(target: "snap_blocks::accordion", item = %self.id, generation, "dropping stale open tick");
            return Ok(false);
        }

        let open = AccordionState::Open;
        cx.document.remove_attribute(self.panel, "aria-hidden")?;
        cx.document.set_attribute(self.panel, "data-state", open.as_str())?;
        cx.document
            .set_attribute(self.trigger, "aria-expanded", open.aria_expanded())?;
        cx.document.set_attribute(self.trigger, "data-state", open.as_str())?;
        self.set_state(open, cx);

        if exclusive {
            let height = self.cached_height.take().unwrap_or(0.0);
            cx.viewport.scroll_by(-height, cx.config.scroll_behavior);
        }
        Ok(true)
    }

    /// Remove the panel from layout. Returns `false` if the timer was stale.
    pub(crate) fn hide_panel(&mut self, generation: u64, document: &mut Document) -> Result<bool> {
        if self.opened_generation > generation {
            tracing::trace!(target: "snap_blocks::accordion", item = %self.id, generation, "dropping stale hide");
            return Ok(false);
        }
        if generation == self.generation {
            self.close_timer = None;
        }
        document.set_style_property(self.panel, "display", "none")?;
        Ok(true)
    }

    fn set_state(&mut self, state: AccordionState, cx: &Transition<'_>) {
        if self.state == state {
            return;
        }
        self.state = state;
        tracing::debug!(target: "snap_blocks::accordion", item = %self.id, %state, "state changed");
        cx.state_changed.emit(StateChange {
            item: self.handle,
            id: self.id.clone(),
            state,
        });
    }
}
