//! Single-threaded deferred-task loop.
//!
//! The loop keeps its own notion of "current time". Outside of dispatch it is
//! synchronised with the clock; while a due task is being handed out it is
//! pinned to that task's deadline, so anything the task schedules is measured
//! from when the task was due rather than from when the loop got around to it.
//!
//! # Example
//!
//! ```
//! use snap_blocks_core::{EventLoop, ManualClock};
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut event_loop = EventLoop::with_clock(clock.clone());
//!
//! event_loop.schedule(Duration::from_millis(300), "hide");
//! assert_eq!(event_loop.pop_due(), None);
//!
//! clock.advance(Duration::from_millis(300));
//! assert_eq!(event_loop.pop_due(), Some("hide"));
//! ```

use std::time::Duration;

use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::timer::{TimerId, TimerManager};

/// Deferred work queue driven by a [`Clock`].
pub struct EventLoop<T> {
    clock: Box<dyn Clock>,
    timers: TimerManager<T>,
    now: Duration,
}

impl<T> EventLoop<T> {
    /// Create a loop on the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Create a loop on a specific clock.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        let now = clock.now();
        Self {
            clock: Box::new(clock),
            timers: TimerManager::new(),
            now,
        }
    }

    /// The loop's current time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Bring the loop's time up to the clock.
    pub fn sync(&mut self) {
        let now = self.clock.now();
        if now > self.now {
            self.now = now;
        }
    }

    /// Run `payload` after `delay`, measured from the loop's current time.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let deadline = self.now + delay;
        let id = self.timers.start(deadline, payload);
        tracing::trace!(target: "snap_blocks_core::event_loop", ?id, ?deadline, "scheduled task");
        id
    }

    /// Cancel a scheduled task, returning its payload.
    pub fn cancel(&mut self, id: TimerId) -> Result<T> {
        tracing::trace!(target: "snap_blocks_core::event_loop", ?id, "cancelling task");
        self.timers.stop(id)
    }

    /// Check if a task is still waiting to run.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.is_active(id)
    }

    /// Take the next task that is due on the clock.
    ///
    /// Returns `None` once nothing else is due, at which point the loop's time
    /// has caught up with the clock.
    pub fn pop_due(&mut self) -> Option<T> {
        let clock_now = self.clock.now();
        match self.timers.pop_expired(clock_now) {
            Some((_, deadline, payload)) => {
                if deadline > self.now {
                    self.now = deadline;
                }
                Some(payload)
            }
            None => {
                self.sync();
                None
            }
        }
    }

    /// Time remaining until the next task is due, if any are pending.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        let now = self.clock.now();
        self.timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(now))
    }

    /// Number of tasks waiting to run.
    pub fn pending_count(&self) -> usize {
        self.timers.active_count()
    }
}

impl<T> Default for EventLoop<T> {
    fn default() -> Self {
        Self::new()
    }
}
