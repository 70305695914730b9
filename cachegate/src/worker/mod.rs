//! Worker lifecycle and event dispatch.
//!
//! A [`ServiceWorker`] wraps one [`Arbiter`](crate::arbiter::Arbiter)
//! generation and routes every [`WorkerEvent`] to its handler:
//!
//! | Event | Handler |
//! |-------|---------|
//! | `Install` | seed the generation, then skip waiting |
//! | `Activate` | retire other generations, then claim clients |
//! | `Fetch` | arbitrate once activated |
//! | `Sync` | replay offline actions for [`SYNC_TAG`] |
//! | `Push` | show a notification |
//! | `NotificationClick` | close it and open the app for `explore` |

mod error;
mod event;
mod service;
mod state;
mod sync;

pub use error::WorkerError;
pub use event::{EventKind, EventOutcome, WorkerEvent};
pub use service::ServiceWorker;
pub use state::{is_valid_transition, WorkerState};
pub use sync::{replay_offline_actions, SYNC_TAG};
