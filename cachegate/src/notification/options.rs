//! Notification payload contract for push messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title shown on every push notification.
pub const NOTIFICATION_TITLE: &str = "Wisdom Weaver";

/// Body used when a push arrives without a payload.
pub const DEFAULT_PUSH_BODY: &str = "New wisdom from Bhagavad Gita awaits you!";

pub const NOTIFICATION_ICON: &str = "/static/icon-192.png";
pub const NOTIFICATION_BADGE: &str = "/static/icon-72.png";
pub const VIBRATE_PATTERN: [u32; 3] = [100, 50, 100];

/// Action that opens the application.
pub const EXPLORE_ACTION: &str = "explore";
/// Action that only dismisses the notification.
pub const CLOSE_ACTION: &str = "close";

/// Page opened by the explore action.
pub const APP_ROOT: &str = "/";

/// A button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action: String,
    pub title: String,
    pub icon: String,
}

/// Arbitrary data carried with a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// Arrival time in epoch milliseconds.
    pub date_of_arrival: i64,
    pub primary_key: u32,
}

/// Everything needed to display a notification except its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationOptions {
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub vibrate: Vec<u32>,
    pub data: NotificationData,
    pub actions: Vec<NotificationAction>,
}

impl NotificationOptions {
    /// Options for a push message that arrived at `arrived_at`.
    ///
    /// A present but empty payload yields an empty body; only a missing
    /// payload falls back to [`DEFAULT_PUSH_BODY`].
    pub fn for_push(payload: Option<&str>, arrived_at: DateTime<Utc>) -> Self {
        Self {
            body: payload.unwrap_or(DEFAULT_PUSH_BODY).to_string(),
            icon: NOTIFICATION_ICON.to_string(),
            badge: NOTIFICATION_BADGE.to_string(),
            vibrate: VIBRATE_PATTERN.to_vec(),
            data: NotificationData {
                date_of_arrival: arrived_at.timestamp_millis(),
                primary_key: 1,
            },
            actions: vec![
                NotificationAction {
                    action: EXPLORE_ACTION.to_string(),
                    title: "Read Wisdom".to_string(),
                    icon: "/static/icon-128.png".to_string(),
                },
                NotificationAction {
                    action: CLOSE_ACTION.to_string(),
                    title: "Close".to_string(),
                    icon: "/static/icon-72.png".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn arrival() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_731_900_000_000).unwrap()
    }

    #[test]
    fn test_push_without_payload_uses_default_body() {
        let options = NotificationOptions::for_push(None, arrival());
        assert_eq!(options.body, DEFAULT_PUSH_BODY);
    }

    #[test]
    fn test_push_with_payload_uses_it() {
        let options = NotificationOptions::for_push(Some("Chapter 2, verse 47"), arrival());
        assert_eq!(options.body, "Chapter 2, verse 47");
    }

    #[test]
    fn test_empty_payload_is_kept() {
        let options = NotificationOptions::for_push(Some(""), arrival());
        assert_eq!(options.body, "");
    }

    #[test]
    fn test_fixed_fields() {
        let options = NotificationOptions::for_push(None, arrival());
        assert_eq!(options.icon, "/static/icon-192.png");
        assert_eq!(options.badge, "/static/icon-72.png");
        assert_eq!(options.vibrate, vec![100, 50, 100]);
        assert_eq!(options.data.date_of_arrival, 1_731_900_000_000);
        assert_eq!(options.data.primary_key, 1);

        let actions: Vec<&str> = options.actions.iter().map(|a| a.action.as_str()).collect();
        assert_eq!(actions, vec!["explore", "close"]);
        assert_eq!(options.actions[0].title, "Read Wisdom");
    }

    #[test]
    fn test_serializes_with_platform_field_names() {
        let json = serde_json::to_value(NotificationOptions::for_push(None, arrival())).unwrap();
        assert_eq!(json["data"]["dateOfArrival"], 1_731_900_000_000i64);
        assert_eq!(json["data"]["primaryKey"], 1);
        assert_eq!(json["actions"][1]["action"], "close");
    }
}
