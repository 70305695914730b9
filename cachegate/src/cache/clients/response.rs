//! Response cache client for one cache generation.
//!
//! This client wraps a generic `Cache` with:
//! - Key translation: `Request` → `"{METHOD} {url}"`
//! - Snapshot encoding: `Response` ↔ bincode-encoded [`StoredResponse`]
//!
//! Only `GET` requests take part: lookups for any other method miss, and
//! writes for any other method are rejected with
//! [`CacheError::UnsupportedMethod`].

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};
use url::Url;

use crate::cache::traits::{Cache, CacheError};
use crate::resource::{Request, Response, ResponseType};

/// Serialized form of a cached response.
///
/// Encoding copies every byte, so the stored snapshot never shares a buffer
/// with the response handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResponse {
    pub status: u16,
    pub response_type: ResponseType,
    pub url: Option<String>,
    pub redirected: bool,
    pub headers: Vec<(String, Vec<u8>)>,
    pub body: Vec<u8>,
}

impl StoredResponse {
    pub fn from_response(response: &Response) -> Self {
        Self {
            status: response.status().as_u16(),
            response_type: response.response_type(),
            url: response.url().map(|u| u.to_string()),
            redirected: response.redirected(),
            headers: response
                .headers()
                .iter()
                .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
                .collect(),
            body: response.body().to_vec(),
        }
    }

    pub fn into_response(self) -> Result<Response, CacheError> {
        let status = StatusCode::from_u16(self.status)
            .map_err(|e| CacheError::Decode(format!("status {}: {}", self.status, e)))?;

        let mut headers = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| CacheError::Decode(format!("header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_bytes(&value)
                .map_err(|e| CacheError::Decode(format!("header {}: {}", name, e)))?;
            headers.append(name, value);
        }

        let mut response = Response::new(status)
            .with_type(self.response_type)
            .with_redirected(self.redirected)
            .with_headers(headers)
            .with_body(self.body);

        if let Some(url) = self.url {
            let url = Url::parse(&url)
                .map_err(|e| CacheError::Decode(format!("url '{}': {}", url, e)))?;
            response = response.with_url(url);
        }

        Ok(response)
    }

    pub fn encode(&self) -> Result<Vec<u8>, CacheError> {
        bincode::serialize(self).map_err(|e| CacheError::Encode(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CacheError> {
        bincode::deserialize(bytes).map_err(|e| CacheError::Decode(e.to_string()))
    }
}

/// Request/response view over one cache generation.
#[derive(Clone)]
pub struct ResponseCacheClient {
    name: String,
    cache: Arc<dyn Cache>,
}

impl ResponseCacheClient {
    /// Wrap the generation `cache` named `name`.
    pub fn new(name: impl Into<String>, cache: Arc<dyn Cache>) -> Self {
        Self {
            name: name.into(),
            cache,
        }
    }

    /// Name of the generation this client reads and writes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Find the stored response for `request`.
    ///
    /// Read or decode failures are logged and reported as a miss.
    pub async fn match_request(&self, request: &Request) -> Option<Response> {
        if request.method() != Method::GET {
            return None;
        }

        let key = request.cache_key();
        let bytes = match self.cache.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                trace!(cache = %self.name, key = %key, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(cache = %self.name, key = %key, error = %e, "Cache get failed");
                return None;
            }
        };

        match StoredResponse::decode(&bytes).and_then(StoredResponse::into_response) {
            Ok(response) => Some(response),
            Err(e) => {
                warn!(cache = %self.name, key = %key, error = %e, "Discarding unreadable cache entry");
                None
            }
        }
    }

    /// Store a snapshot of `response` under `request`'s identity.
    pub async fn put(&self, request: &Request, response: &Response) -> Result<(), CacheError> {
        if request.method() != Method::GET {
            return Err(CacheError::UnsupportedMethod(request.method().to_string()));
        }

        let encoded = StoredResponse::from_response(response).encode()?;
        self.cache.set(&request.cache_key(), encoded).await
    }

    /// Remove the entry for `request`, if any.
    pub async fn delete(&self, request: &Request) -> Result<bool, CacheError> {
        self.cache.delete(&request.cache_key()).await
    }

    /// Keys of every stored entry.
    pub async fn keys(&self) -> Result<Vec<String>, CacheError> {
        self.cache.keys().await
    }
}
