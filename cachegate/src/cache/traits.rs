//! Core traits for cache generation storage.
//!
//! The `Cache` trait is the key-value interface behind a single cache
//! generation. Keys are request identities rendered as strings, values are
//! encoded response snapshots. Every operation is atomic for a single key,
//! so concurrent writers resolve as last-write-wins without extra locking.
//!
//! # Design Principles
//!
//! - **String keys**: Human-readable in logs (`GET http://host/path`)
//! - **Vec<u8> values**: Raw bytes, no serialization opinions imposed
//! - **Unbounded**: No size limit, no TTL, no LRU; a generation is only ever
//!   dropped as a whole
//! - **Dyn-compatible**: Uses `Pin<Box<dyn Future>>` for trait object support

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Errors that can occur during cache operations.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Only `GET` requests can be stored in or matched against a cache.
    #[error("Request method {0} cannot be cached")]
    UnsupportedMethod(String),

    /// The response could not be serialized for storage.
    #[error("Failed to encode cache entry: {0}")]
    Encode(String),

    /// A stored entry could not be turned back into a response.
    #[error("Failed to decode cache entry: {0}")]
    Decode(String),

    /// Provider-specific error.
    #[error("Provider error: {0}")]
    Provider(String),
}

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Key-value storage for one cache generation.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
pub trait Cache: Send + Sync {
    /// Store a value with the given key, replacing any existing value.
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>>;

    /// Retrieve a value by key.
    ///
    /// Returns `Ok(None)` if the key is not present.
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>>;

    /// Delete a value by key.
    ///
    /// Returns `Ok(true)` if the key existed.
    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// Check if a key exists without retrieving the value.
    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// List every key currently stored.
    fn keys(&self) -> BoxFuture<'_, Result<Vec<String>, CacheError>>;
}
