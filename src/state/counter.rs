//! Active task counting and completion detection
//!
//! The count lives in a `tokio::sync::watch` channel: every change is a single
//! critical section, and waiters are woken on each change instead of polling.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared count of in-flight crawl tasks
#[derive(Debug)]
pub struct ActiveTaskCounter {
    active: watch::Sender<usize>,
    started: AtomicUsize,
    peak: AtomicUsize,
}

impl Default for ActiveTaskCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveTaskCounter {
    /// Creates a counter with no active tasks
    pub fn new() -> Self {
        let (active, _) = watch::channel(0);
        Self {
            active,
            started: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Registers one task; the registration ends when the guard drops
    pub fn enter(self: &Arc<Self>) -> TaskGuard {
        self.active.send_modify(|active| {
            *active += 1;
            self.peak.fetch_max(*active, Ordering::Relaxed);
        });
        self.started.fetch_add(1, Ordering::Relaxed);

        TaskGuard {
            counter: Arc::clone(self),
        }
    }

    fn leave(&self) {
        self.active.send_modify(|active| {
            *active = active.saturating_sub(1);
        });
    }

    /// Number of tasks currently registered
    pub fn active(&self) -> usize {
        *self.active.borrow()
    }

    /// Number of tasks ever registered
    pub fn started(&self) -> usize {
        self.started.load(Ordering::Relaxed)
    }

    /// Largest number of tasks registered at the same time
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }

    /// Restarts peak tracking from the current number of active tasks
    ///
    /// Called at the start of each crawl run so the peak covers that run only.
    pub fn reset_peak(&self) {
        self.active.send_modify(|active| {
            self.peak.store(*active, Ordering::Relaxed);
        });
    }

    /// Returns true if no task is registered
    pub fn is_idle(&self) -> bool {
        self.active() == 0
    }

    /// Waits until no task is registered
    ///
    /// Returns immediately if the counter is already idle.
    pub async fn wait_idle(&self) {
        let mut rx = self.active.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting
        let _ = rx.wait_for(|active| *active == 0).await;
    }
}

/// Registration of one task in an [`ActiveTaskCounter`]
///
/// Dropping the guard, on any exit path including a panic, releases it.
#[derive(Debug)]
#[must_use = "the task stops being counted as soon as the guard is dropped"]
pub struct TaskGuard {
    counter: Arc<ActiveTaskCounter>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.counter.leave();
    }
}
