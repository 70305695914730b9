//! Cacheability rules and arbitration results.

use std::fmt;

use reqwest::StatusCode;

use crate::resource::{Response, ResponseType};

/// Whether a network response may be written back to the cache.
///
/// Only an exact `200` with type `basic` qualifies. Partial content,
/// redirects handled manually, opaque and cross-origin responses are all
/// passed through without caching.
pub fn is_cacheable(response: &Response) -> bool {
    response.status() == StatusCode::OK && response.response_type() == ResponseType::Basic
}

/// Where an arbitrated response came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServedFrom {
    /// Cache hit, no network access.
    Cache,
    /// Cache miss answered by the network.
    Network,
    /// Network failed; a second cache lookup found the entry.
    OfflineFallback,
}

impl fmt::Display for ServedFrom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServedFrom::Cache => write!(f, "cache"),
            ServedFrom::Network => write!(f, "network"),
            ServedFrom::OfflineFallback => write!(f, "offline fallback"),
        }
    }
}

/// Response chosen for an intercepted request.
#[derive(Debug, Clone, PartialEq)]
pub struct Arbitration {
    pub response: Response,
    pub source: ServedFrom,
}

impl Arbitration {
    pub fn new(response: Response, source: ServedFrom) -> Self {
        Self { response, source }
    }

    pub fn into_response(self) -> Response {
        self.response
    }
}
