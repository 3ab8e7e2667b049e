//! # Toast Manager
//!
//! Transient notifications that disappear on their own.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Toast Lifecycle                                  │
//! │                                                                         │
//! │   show_toast(msg, d)                                                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌──────────┐   timer fires after d    ┌──────────┐                   │
//! │   │ Visible  │ ────────────────────────►│ Removed  │ (terminal)        │
//! │   │          │ ────────────────────────►│          │                   │
//! │   └──────────┘   remove_toast(id)       └──────────┘                   │
//! │                  or evicted by cap                                      │
//! │                                                                         │
//! │   Removal is idempotent: whichever path runs second is a no-op.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timers hold a `Weak` reference to the board. Once the manager and all its
//! clones are dropped, pending timers find nothing to remove.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tracing::debug;

use storefront_core::{Toast, ToastId, DEFAULT_TOAST_DURATION};

use crate::scheduler::{Scheduler, TimerHandle};

// =============================================================================
// Board
// =============================================================================

/// The visible list and the id counter.
#[derive(Debug)]
struct ToastBoard {
    toasts: Mutex<Vec<Toast>>,
    next_id: AtomicU64,
    changes: watch::Sender<Vec<Toast>>,
}

impl ToastBoard {
    fn new() -> Self {
        let (changes, _) = watch::channel(Vec::new());
        ToastBoard {
            toasts: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
            changes,
        }
    }

    /// Every update is a single push, drain or retain, so a poisoned list
    /// is still well-formed.
    fn list(&self) -> MutexGuard<'_, Vec<Toast>> {
        self.toasts.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, toasts: &[Toast]) {
        self.changes.send_replace(toasts.to_vec());
    }

    fn remove(&self, id: ToastId) -> bool {
        let mut toasts = self.list();
        let before = toasts.len();
        toasts.retain(|t| t.id != id);

        let removed = toasts.len() != before;
        if removed {
            self.publish(&toasts);
        }
        removed
    }
}

// =============================================================================
// Handle
// =============================================================================

/// What `show_toast` hands back. Safe to ignore.
#[derive(Debug)]
pub struct ToastHandle {
    pub id: ToastId,
    timer: TimerHandle,
}

impl ToastHandle {
    /// Stops the auto-dismiss timer. The toast stays until removed.
    pub fn cancel_timer(&self) {
        self.timer.cancel();
    }
}

// =============================================================================
// Manager
// =============================================================================

/// Owns the visible toast list and schedules auto-dismissal.
///
/// ## Usage
/// ```rust,ignore
/// let toasts = ToastManager::new(TokioScheduler::current()?);
/// toasts.show("Added to cart");
/// toasts.show_toast("Saved", Duration::from_millis(500));
/// ```
pub struct ToastManager<S> {
    board: Arc<ToastBoard>,
    scheduler: Arc<S>,
    default_duration: Duration,
    max_visible: Option<usize>,
}

impl<S> Clone for ToastManager<S> {
    fn clone(&self) -> Self {
        ToastManager {
            board: Arc::clone(&self.board),
            scheduler: Arc::clone(&self.scheduler),
            default_duration: self.default_duration,
            max_visible: self.max_visible,
        }
    }
}

impl<S: Scheduler> ToastManager<S> {
    pub fn new(scheduler: S) -> Self {
        ToastManager {
            board: Arc::new(ToastBoard::new()),
            scheduler: Arc::new(scheduler),
            default_duration: DEFAULT_TOAST_DURATION,
            max_visible: None,
        }
    }

    /// Sets the duration `show` uses.
    pub fn default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Caps the visible list; the oldest toasts are evicted first.
    pub fn max_visible(mut self, max: Option<usize>) -> Self {
        self.max_visible = max;
        self
    }

    /// Shows a toast for the default duration.
    pub fn show(&self, message: impl Into<String>) -> ToastHandle {
        self.show_toast(message, self.default_duration)
    }

    /// Appends a toast and schedules its removal after `duration`.
    ///
    /// The toast is in the visible list when this returns.
    pub fn show_toast(&self, message: impl Into<String>, duration: Duration) -> ToastHandle {
        let id = ToastId(self.board.next_id.fetch_add(1, Ordering::Relaxed));
        let toast = Toast::new(id, message, duration);

        {
            let mut toasts = self.board.list();

            if let Some(max) = self.max_visible {
                let overflow = (toasts.len() + 1).saturating_sub(max.max(1));
                if overflow > 0 {
                    debug!(evicted = overflow, "Evicting oldest toasts");
                    toasts.drain(..overflow);
                }
            }

            toasts.push(toast);
            self.board.publish(&toasts);
        }

        debug!(toast_id = %id, duration_ms = duration.as_millis() as u64, "Toast shown");

        let board: Weak<ToastBoard> = Arc::downgrade(&self.board);
        let timer = self.scheduler.schedule(
            duration,
            Box::new(move || {
                if let Some(board) = board.upgrade() {
                    if board.remove(id) {
                        debug!(toast_id = %id, "Toast expired");
                    }
                }
            }),
        );

        ToastHandle { id, timer }
    }

    /// Removes the toast with `id`. Returns false if it was not visible.
    pub fn remove_toast(&self, id: ToastId) -> bool {
        self.board.remove(id)
    }
}

impl<S> ToastManager<S> {
    /// Snapshot of the visible list, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.board.list().clone()
    }

    /// Observes the visible list after every change.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.board.changes.subscribe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
