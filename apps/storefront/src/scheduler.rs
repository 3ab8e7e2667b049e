//! # Timer Scheduling
//!
//! Deferred callbacks for the toast auto-dismiss.
//!
//! ```text
//! show_toast("Saved", 3s)
//!      │
//!      ├──► visible list updated (immediately)
//!      │
//!      └──► scheduler.schedule(3s, remove(id)) ──► TimerHandle
//!                                │
//!                          ...3s later...
//!                                │
//!                                ▼
//!                           remove(id)   (no-op if already gone)
//! ```
//!
//! Callers usually drop the [`TimerHandle`]; the timer keeps running.

use std::fmt;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// A one-shot callback run when a timer fires.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs a callback once after a delay.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle;
}

/// Handle to a scheduled callback.
///
/// Dropping the handle does NOT cancel the timer.
pub struct TimerHandle {
    abort: Option<AbortHandle>,
}

impl TimerHandle {
    /// A handle that controls nothing (for schedulers without cancellation).
    pub fn detached() -> Self {
        TimerHandle { abort: None }
    }

    /// Cancels the callback if it has not run yet.
    pub fn cancel(&self) {
        if let Some(abort) = &self.abort {
            abort.abort();
        }
    }

    /// True once the callback has run or been cancelled.
    pub fn is_finished(&self) -> bool {
        self.abort.as_ref().map_or(true, AbortHandle::is_finished)
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancellable", &self.abort.is_some())
            .finish()
    }
}

/// Schedules callbacks as tokio tasks that sleep, then run.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        TokioScheduler { handle }
    }

    /// Uses the runtime of the calling context, if there is one.
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: TimerTask) -> TimerHandle {
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        TimerHandle {
            abort: Some(join.abort_handle()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_task(counter: &Arc<AtomicUsize>) -> TimerTask {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        let handle = scheduler.schedule(Duration::from_millis(100), counter_task(&fired));

        tokio::time::sleep(Duration::from_millis(99)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!handle.is_finished());

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_callback() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        let handle = scheduler.schedule(Duration::from_millis(50), counter_task(&fired));
        handle.cancel();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_still_fires() {
        let scheduler = TokioScheduler::current().unwrap();
        let fired = Arc::new(AtomicUsize::new(0));

        drop(scheduler.schedule(Duration::from_millis(10), counter_task(&fired)));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_detached_handle() {
        let handle = TimerHandle::detached();
        handle.cancel();
        assert!(handle.is_finished());
    }
}
