//! cachegate - offline-first resource cache arbiter
//!
//! This library decides, for every request an installed web application
//! makes, whether to answer from a versioned local cache or from the
//! network, and keeps that cache populated so the application keeps working
//! offline.
//!
//! The pieces, bottom-up:
//!
//! - [`resource`]: request/response values and the same-origin check
//! - [`cache`]: named cache generations holding response snapshots
//! - [`network`]: the [`Fetcher`](network::Fetcher) seam and its reqwest client
//! - [`arbiter`]: seed, retire and cache-first arbitration
//! - [`notification`]: push notification options and the notifier seam
//! - [`worker`]: lifecycle state and event dispatch
//! - [`config`] and [`logging`]: user configuration and tracing setup

pub mod arbiter;
pub mod cache;
pub mod config;
pub mod logging;
pub mod network;
pub mod notification;
pub mod resource;
pub mod worker;

pub use arbiter::{Arbiter, ArbiterConfig, ArbiterError, Arbitration, ServedFrom};
pub use cache::CacheStorage;
pub use network::{FetchError, Fetcher, ReqwestFetcher};
pub use resource::{Request, Response, ResponseType};
pub use worker::{EventOutcome, ServiceWorker, WorkerError, WorkerEvent, WorkerState};
