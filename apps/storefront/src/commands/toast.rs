//! # Toast Commands
//!
//! Show, dismiss and list transient notifications.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use storefront_core::{Toast, ToastId};

use crate::error::ApiError;
use crate::scheduler::Scheduler;
use crate::state::ToastManager;

/// Response for `show_toast`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowToastResponse {
    pub id: ToastId,
    pub toasts: Vec<Toast>,
}

/// Response for `dismiss_toast`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DismissToastResponse {
    /// False when the toast had already gone.
    pub removed: bool,
    pub toasts: Vec<Toast>,
}

/// Shows a toast.
///
/// ## Arguments
/// * `message` - Display text, must not be blank
/// * `duration_ms` - Visible time; the configured default when `None`
pub fn show_toast<S: Scheduler>(
    toasts: &ToastManager<S>,
    message: &str,
    duration_ms: Option<u64>,
) -> Result<ShowToastResponse, ApiError> {
    if message.trim().is_empty() {
        return Err(ApiError::validation("Toast message must not be empty"));
    }
    debug!(duration_ms = ?duration_ms, "show_toast command");

    let handle = match duration_ms {
        Some(ms) => toasts.show_toast(message, Duration::from_millis(ms)),
        None => toasts.show(message),
    };

    Ok(ShowToastResponse {
        id: handle.id,
        toasts: toasts.toasts(),
    })
}

/// Dismisses a toast early. Unknown ids are not an error.
pub fn dismiss_toast<S: Scheduler>(toasts: &ToastManager<S>, id: ToastId) -> DismissToastResponse {
    debug!(toast_id = %id, "dismiss_toast command");

    DismissToastResponse {
        removed: toasts.remove_toast(id),
        toasts: toasts.toasts(),
    }
}

/// Lists the visible toasts, oldest first.
pub fn list_toasts<S: Scheduler>(toasts: &ToastManager<S>) -> Vec<Toast> {
    toasts.toasts()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::scheduler::TokioScheduler;

    fn manager() -> ToastManager<TokioScheduler> {
        ToastManager::new(TokioScheduler::current().unwrap())
            .default_duration(Duration::from_millis(100))
    }

    #[tokio::test(start_paused = true)]
    async fn test_show_and_expire() {
        let toasts = manager();

        let response = show_toast(&toasts, "Added to cart", None).unwrap();
        assert_eq!(response.toasts.len(), 1);
        assert_eq!(response.toasts[0].duration_ms, 100);

        tokio::time::sleep(Duration::from_millis(110)).await;
        assert!(list_toasts(&toasts).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_duration() {
        let toasts = manager();
        show_toast(&toasts, "Long", Some(1000)).unwrap();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(list_toasts(&toasts).len(), 1);
    }

    #[tokio::test]
    async fn test_blank_message_rejected() {
        let toasts = manager();
        let err = show_toast(&toasts, "   ", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(list_toasts(&toasts).is_empty());
    }

    #[tokio::test]
    async fn test_dismiss() {
        let toasts = manager();
        let id = show_toast(&toasts, "Bye", None).unwrap().id;

        let response = dismiss_toast(&toasts, id);
        assert!(response.removed);
        assert!(response.toasts.is_empty());

        let response = dismiss_toast(&toasts, id);
        assert!(!response.removed);
    }
}
