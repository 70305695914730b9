//! Worker error types.

use thiserror::Error;

use super::state::WorkerState;
use crate::arbiter::ArbiterError;
use crate::notification::NotifyError;

/// Errors that can occur while handling a worker event.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The event is not allowed in the worker's current state.
    #[error("Invalid worker state transition: {from} -> {to}")]
    InvalidTransition { from: WorkerState, to: WorkerState },

    /// Seeding failed; the worker is now redundant.
    #[error("Install failed: {0}")]
    Install(#[source] ArbiterError),

    /// The request could not be answered from cache or network.
    #[error("Fetch failed: {0}")]
    Fetch(#[source] ArbiterError),

    /// The notification host rejected an operation.
    #[error(transparent)]
    Notification(#[from] NotifyError),

    /// The application page URL could not be built.
    #[error("Invalid application URL: {0}")]
    Url(#[from] url::ParseError),
}
