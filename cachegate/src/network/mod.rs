//! Network access for cache misses and seeding.
//!
//! The arbiter only talks to the network through the [`Fetcher`] trait, so
//! tests can swap in a scripted fetcher and the CLI can use
//! [`ReqwestFetcher`].
//!
//! ```ignore
//! use cachegate::network::{Fetcher, ReqwestFetcher};
//!
//! let fetcher = ReqwestFetcher::with_timeout(10)?;
//! let response = fetcher.fetch(request.clone()).await?;
//! ```

mod http;
mod types;

pub use http::{classify_response, ReqwestFetcher, DEFAULT_TIMEOUT_SECS};
pub use types::{FetchError, Fetcher};

#[cfg(test)]
pub use http::tests::MockFetcher;
