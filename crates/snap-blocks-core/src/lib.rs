//! Core systems for Snap Blocks.
//!
//! This crate provides the runtime plumbing the interactive blocks are built on:
//!
//! - **Clock**: Monotonic system time or a manually advanced test clock
//! - **Timers**: One-shot timers carrying a payload, FIFO on equal deadlines
//! - **Event Loop**: Deferred-task queue with next-tick and delayed execution
//! - **Signal/Slot System**: Synchronous change notifications
//! - **Logging**: `tracing` targets and span names
//!
//! # Deferred Work Example
//!
//! ```
//! use snap_blocks_core::{EventLoop, ManualClock};
//! use std::time::Duration;
//!
//! #[derive(Debug, PartialEq)]
//! enum Task {
//!     Reveal,
//!     Hide,
//! }
//!
//! let clock = ManualClock::new();
//! let mut event_loop = EventLoop::with_clock(clock.clone());
//!
//! event_loop.schedule(Duration::from_millis(1), Task::Reveal);
//! let hide = event_loop.schedule(Duration::from_millis(300), Task::Hide);
//! event_loop.cancel(hide).unwrap();
//!
//! clock.advance(Duration::from_millis(500));
//! assert_eq!(event_loop.pop_due(), Some(Task::Reveal));
//! assert_eq!(event_loop.pop_due(), None);
//! ```

mod clock;
mod error;
mod event_loop;
pub mod logging;
pub mod signal;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, Result, SignalError, TimerError};
pub use event_loop::EventLoop;
pub use logging::PerfSpan;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};

static_assertions::assert_impl_all!(Signal<()>: Send, Sync);
static_assertions::assert_impl_all!(ManualClock: Clone, Send, Sync);
