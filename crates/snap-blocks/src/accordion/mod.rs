//! Accordion state machines.
//!
//! An [`AccordionGroup`] owns its [`AccordionItem`]s. Items refer back to
//! their group only through an [`ItemHandle`]; every transition receives the
//! page resources it touches through a [`Transition`] context assembled by
//! the [`Page`](crate::page::Page).
//!
//! Opening is split in two. The synchronous half reveals the panel; the state
//! flip lands on the next tick so that CSS transitions see the panel laid out
//! before its `data-state` changes. Closing flips state immediately and hides
//! the panel once the duration in `--snap-accordion-open-close-timing` has
//! elapsed.

mod discovery;
mod error;
mod group;
mod item;
mod state;

pub use discovery::{BoundGroup, DiscoveryFailure, DiscoveryReport};
pub use error::{AccordionError, Result};
pub use group::AccordionGroup;
pub use item::AccordionItem;
pub use state::{AccordionState, ItemDebug, ItemHandle, StateChange};

pub(crate) use discovery::Discovery;

use snap_blocks_core::{EventLoop, Signal};

use crate::config::AccordionConfig;
use crate::dom::{Document, Viewport};
use crate::page::PageTask;

/// Page resources a transition may touch.
pub(crate) struct Transition<'a> {
    pub(crate) document: &'a mut Document,
    pub(crate) viewport: &'a mut Viewport,
    pub(crate) tasks: &'a mut EventLoop<PageTask>,
    pub(crate) config: &'a AccordionConfig,
    pub(crate) state_changed: &'a Signal<StateChange>,
}
