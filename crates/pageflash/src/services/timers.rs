//! Virtual clock and deferred task queue.
//!
//! Every delayed action on a page (transitions, auto-dismiss, typewriter
//! ticks, particle cleanup) goes through one `TimerQueue`. Nothing here waits
//! on wall-clock time: callers move the clock forward explicitly, which keeps
//! ordering deterministic in tests.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;

/// Upper bound on tasks run by a single drain (`flush`, `advance`).
pub const STEP_LIMIT: usize = 10_000;

/// Tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    next_seq: u64,
    entries: BTreeMap<(Duration, u64), T>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Current virtual time since page load.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Queue `task` to run `after` from now.
    pub fn schedule(&mut self, after: Duration, task: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let due = self.now + after;
        trace!("TimerQueue: schedule seq={} due={:?}", seq, due);
        self.entries.insert((due, seq), task);
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(due, _)| *due)
    }

    /// Pop the earliest task due at or before `limit`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, limit: Duration) -> Option<(Duration, T)> {
        let due = self.next_due()?;
        if due > limit {
            return None;
        }
        let ((due, _), task) = self.entries.pop_first()?;
        if due > self.now {
            self.now = due;
        }
        Some((due, task))
    }

    /// Move the clock forward to `t`. The clock never goes backwards.
    pub fn set_now(&mut self, t: Duration) {
        if t > self.now {
            self.now = t;
        }
    }
}
