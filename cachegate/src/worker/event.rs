//! Events delivered to the worker and their outcomes.

use std::fmt;

use bytes::Bytes;

use crate::arbiter::{Arbitration, SeedReport};
use crate::notification::NotificationId;
use crate::resource::Request;

/// Kind of a [`WorkerEvent`], for logging and routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Install,
    Activate,
    Fetch,
    Sync,
    Push,
    NotificationClick,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Install => "install",
            EventKind::Activate => "activate",
            EventKind::Fetch => "fetch",
            EventKind::Sync => "sync",
            EventKind::Push => "push",
            EventKind::NotificationClick => "notificationclick",
        };
        f.write_str(name)
    }
}

/// A lifecycle or functional event for the worker.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// Seed the new generation.
    Install,
    /// Retire old generations and claim clients.
    Activate,
    /// Arbitrate a request.
    Fetch(Request),
    /// Background sync signal with its tag.
    Sync { tag: String },
    /// Push message with optional payload.
    Push { data: Option<Bytes> },
    /// Click on a displayed notification, with the chosen action if any.
    NotificationClick {
        notification: NotificationId,
        action: Option<String>,
    },
}

impl WorkerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            WorkerEvent::Install => EventKind::Install,
            WorkerEvent::Activate => EventKind::Activate,
            WorkerEvent::Fetch(_) => EventKind::Fetch,
            WorkerEvent::Sync { .. } => EventKind::Sync,
            WorkerEvent::Push { .. } => EventKind::Push,
            WorkerEvent::NotificationClick { .. } => EventKind::NotificationClick,
        }
    }

    /// Convenience constructor for a sync event.
    pub fn sync(tag: impl Into<String>) -> Self {
        WorkerEvent::Sync { tag: tag.into() }
    }

    /// Convenience constructor for a push event with a text payload.
    pub fn push_text(text: impl Into<String>) -> Self {
        WorkerEvent::Push {
            data: Some(Bytes::from(text.into())),
        }
    }
}

/// What handling an event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// Seed completed and skip-waiting was signalled.
    Installed(SeedReport),
    /// Old generations removed and clients claimed.
    Activated { retired: Vec<String> },
    /// The request was answered by the arbiter.
    Responded(Arbitration),
    /// The request was left to default platform handling.
    NotIntercepted,
    /// A recognised sync tag was processed.
    Synced,
    /// The event carried nothing this worker handles.
    Ignored,
    /// A notification was displayed.
    NotificationShown(NotificationId),
    /// A notification was closed; `opened_window` is set for `explore`.
    NotificationClicked { opened_window: bool },
}
