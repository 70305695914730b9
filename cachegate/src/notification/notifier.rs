//! Notification display seam.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tracing::info;
use url::Url;

use super::options::NotificationOptions;

/// Handle to a displayed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(pub u64);

/// Errors from the notification host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NotifyError {
    /// The notification could not be shown.
    #[error("Failed to show notification: {0}")]
    Show(String),

    /// The notification could not be closed.
    #[error("Failed to close notification: {0}")]
    Close(String),

    /// No window could be opened or focused.
    #[error("Failed to open window {url}: {reason}")]
    OpenWindow { url: String, reason: String },
}

/// Host operations used by the push and notification-click handlers.
pub trait Notifier: Send + Sync {
    /// Display a notification.
    fn show_notification(
        &self,
        title: &str,
        options: NotificationOptions,
    ) -> impl Future<Output = Result<NotificationId, NotifyError>> + Send;

    /// Dismiss a displayed notification.
    fn close_notification(
        &self,
        id: NotificationId,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;

    /// Open or focus a window showing `url`.
    fn open_window(&self, url: &Url) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// Notifier that reports every operation through `tracing`.
#[derive(Debug, Default)]
pub struct LogNotifier {
    next_id: AtomicU64,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for LogNotifier {
    async fn show_notification(
        &self,
        title: &str,
        options: NotificationOptions,
    ) -> Result<NotificationId, NotifyError> {
        let id = NotificationId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let payload =
            serde_json::to_string(&options).map_err(|e| NotifyError::Show(e.to_string()))?;
        info!(id = id.0, title, options = %payload, "Showing notification");
        Ok(id)
    }

    async fn close_notification(&self, id: NotificationId) -> Result<(), NotifyError> {
        info!(id = id.0, "Closing notification");
        Ok(())
    }

    async fn open_window(&self, url: &Url) -> Result<(), NotifyError> {
        info!(url = %url, "Opening window");
        Ok(())
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Record of a call made to [`RecordingNotifier`].
    #[derive(Debug, Clone, PartialEq)]
    pub enum NotifierCall {
        Show {
            title: String,
            options: NotificationOptions,
        },
        Close(NotificationId),
        OpenWindow(String),
    }

    /// Notifier that records calls for assertions.
    #[derive(Default)]
    pub struct RecordingNotifier {
        calls: Mutex<Vec<NotifierCall>>,
    }

    impl RecordingNotifier {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<NotifierCall> {
            self.calls.lock().clone()
        }
    }

    impl Notifier for RecordingNotifier {
        async fn show_notification(
            &self,
            title: &str,
            options: NotificationOptions,
        ) -> Result<NotificationId, NotifyError> {
            let mut calls = self.calls.lock();
            calls.push(NotifierCall::Show {
                title: title.to_string(),
                options,
            });
            Ok(NotificationId(calls.len() as u64))
        }

        async fn close_notification(&self, id: NotificationId) -> Result<(), NotifyError> {
            self.calls.lock().push(NotifierCall::Close(id));
            Ok(())
        }

        async fn open_window(&self, url: &Url) -> Result<(), NotifyError> {
            self.calls.lock().push(NotifierCall::OpenWindow(url.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_log_notifier_assigns_increasing_ids() {
        let notifier = LogNotifier::new();
        let options = NotificationOptions::for_push(None, chrono::Utc::now());

        let first = notifier.show_notification("t", options.clone()).await.unwrap();
        let second = notifier.show_notification("t", options).await.unwrap();

        assert_eq!(first, NotificationId(1));
        assert_eq!(second, NotificationId(2));
    }

    #[tokio::test]
    async fn test_log_notifier_close_and_open_succeed() {
        let notifier = LogNotifier::new();
        let url = Url::parse("http://localhost:5000/").unwrap();

        assert!(notifier.close_notification(NotificationId(1)).await.is_ok());
        assert!(notifier.open_window(&url).await.is_ok());
    }
}
