//! Cancellable deferred tasks.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A callback scheduled to run once after a delay.
///
/// Runs on the current `LocalSet`, so the callback may hold `Rc` state.
/// Dropping the handle does not cancel the task; `cancel` does.
#[derive(Debug)]
pub struct Deferred {
    handle: JoinHandle<()>,
}

impl Deferred {
    /// Schedule `task` to run `delay` from now.
    ///
    /// # Panics
    ///
    /// Panics outside a `tokio::task::LocalSet`.
    pub fn after<F>(delay: Duration, task: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        let deadline = Instant::now() + delay;
        let handle = tokio::task::spawn_local(async move {
            tokio::time::sleep_until(deadline).await;
            task();
        });
        Self { handle }
    }

    /// Prevent the callback from running if it has not started.
    /// Idempotent; a no-op once the callback has run.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Has the task completed or been cancelled?
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
