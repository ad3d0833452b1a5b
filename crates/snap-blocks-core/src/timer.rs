//! One-shot timer queue.
//!
//! Timers carry a payload that is handed back when they expire. Deadlines are
//! absolute times on the owning event loop's clock.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData<T> {
    /// When this timer should fire.
    deadline: Duration,
    /// Payload returned on expiry.
    payload: T,
}

/// An entry in the timer queue (min-heap by deadline, then insertion order).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    deadline: Duration,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages pending one-shot timers.
///
/// Timers with equal deadlines expire in the order they were started.
pub struct TimerManager<T> {
    /// All pending timers.
    timers: SlotMap<TimerId, TimerData<T>>,
    /// Priority queue of pending fires.
    queue: BinaryHeap<TimerQueueEntry>,
    /// Monotonic insertion counter used for FIFO tie-breaking.
    next_sequence: u64,
}

impl<T> TimerManager<T> {
    /// Create an empty timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            next_sequence: 0,
        }
    }

    /// Start a timer that expires at `deadline`.
    pub fn start(&mut self, deadline: Duration, payload: T) -> TimerId {
        let id = self.timers.insert(TimerData { deadline, payload });
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            deadline,
            sequence,
        });
        id
    }

    /// Stop and remove a pending timer, returning its payload.
    pub fn stop(&mut self, id: TimerId) -> Result<T> {
        self.timers
            .remove(id)
            .map(|data| data.payload)
            .ok_or_else(|| TimerError::InvalidTimerId.into())
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// The deadline of the earliest pending timer, if any.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue.peek().map(|entry| entry.deadline)
    }

    /// Remove and return the earliest timer whose deadline is at or before `now`.
    #[tracing::instrument(skip(self), target = "snap_blocks_core::timer", level = "trace")]
    pub fn pop_expired(&mut self, now: Duration) -> Option<(TimerId, Duration, T)> {
        self.discard_stale();
        let entry = *self.queue.peek()?;
        if entry.deadline > now {
            return None;
        }
        self.queue.pop();
        let data = self.timers.remove(entry.id)?;
        tracing::trace!(target: "snap_blocks_core::timer", id = ?entry.id, deadline = ?entry.deadline, "timer fired");
        Some((entry.id, data.deadline, data.payload))
    }

    /// Get the number of pending timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }

    /// Drop queue entries whose timers were stopped.
    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            if self.timers.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }
    }
}

impl<T> Default for TimerManager<T> {
    fn default() -> Self {
        Self::new()
    }
}
