//! Cancellable one-shot timers on the current thread's `LocalSet`.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a scheduled callback.
#[derive(Debug)]
pub struct TimerHandle {
    task: JoinHandle<()>,
}

impl TimerHandle {
    /// Stop the timer. The callback never runs if it has not started.
    pub fn cancel(self) {
        self.task.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Run `callback` once after `delay`.
///
/// Must be called from inside a `tokio::task::LocalSet`.
pub fn schedule<F>(delay: Duration, callback: F) -> TimerHandle
where
    F: FnOnce() + 'static,
{
    let task = tokio::task::spawn_local(async move {
        tokio::time::sleep(delay).await;
        callback();
    });
    TimerHandle { task }
}
