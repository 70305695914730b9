//! Push notification display and click handling support.

mod notifier;
mod options;

pub use notifier::{LogNotifier, NotificationId, Notifier, NotifyError};
pub use options::{
    NotificationAction, NotificationData, NotificationOptions, APP_ROOT, CLOSE_ACTION,
    DEFAULT_PUSH_BODY, EXPLORE_ACTION, NOTIFICATION_BADGE, NOTIFICATION_ICON, NOTIFICATION_TITLE,
    VIBRATE_PATTERN,
};

#[cfg(test)]
pub use notifier::tests::{NotifierCall, RecordingNotifier};
