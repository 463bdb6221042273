#![forbid(unsafe_code)]

//! Next-cycle scheduling on the UI context.
//!
//! The overlay runs entirely on the host's UI thread. The only deferral it
//! needs is "run this on the next UI cycle", which [`UiQueue`] models as a
//! FIFO of tasks drained once per cycle.
//!
//! # Invariants
//!
//! 1. Tasks run in the order they were posted.
//! 2. A task posted while a cycle is being processed runs in the next cycle,
//!    never in the current one.
//! 3. No task runs during the call that posted it.

use std::collections::VecDeque;

/// FIFO of tasks deferred to the next UI cycle.
#[derive(Debug, Clone)]
pub struct UiQueue<T> {
    pending: VecDeque<T>,
    cycle: u64,
}

impl<T> Default for UiQueue<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            cycle: 0,
        }
    }
}

impl<T> UiQueue<T> {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defer `task` to the next cycle.
    pub fn post(&mut self, task: T) {
        self.pending.push_back(task);
    }

    /// Start a cycle: take every task posted so far.
    ///
    /// Tasks posted while the returned batch is processed stay queued for the
    /// following cycle.
    pub fn begin_cycle(&mut self) -> VecDeque<T> {
        self.cycle += 1;
        std::mem::take(&mut self.pending)
    }

    /// Number of cycles started so far.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Number of tasks waiting for the next cycle.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns true if nothing is waiting.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}
