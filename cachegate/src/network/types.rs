//! Network fetch types and traits

use std::future::Future;

use thiserror::Error;

use crate::resource::{Request, Response};

/// Errors that can occur while fetching from the network.
///
/// An HTTP error status is not a fetch error: a 404 is a successful fetch
/// of a non-cacheable response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// No response was received (connection refused, DNS failure, timeout).
    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// Headers arrived but the body could not be read.
    #[error("Failed to read response body from {url}: {reason}")]
    Body { url: String, reason: String },
}

impl FetchError {
    /// Transport failure for `url`.
    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// Async trait for issuing requests to the network.
///
/// Implementations receive an owned request; callers that still need the
/// request afterwards pass a clone.
pub trait Fetcher: Send + Sync {
    /// Send `request` and buffer the full response.
    fn fetch(&self, request: Request) -> impl Future<Output = Result<Response, FetchError>> + Send;
}
