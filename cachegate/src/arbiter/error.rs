//! Arbiter error types.

use thiserror::Error;

use crate::cache::CacheError;
use crate::network::FetchError;

/// Errors surfaced by seeding and arbitration.
#[derive(Debug, Error)]
pub enum ArbiterError {
    /// A seed asset could not be fetched; nothing from the seed was kept.
    #[error("Seed asset {url} could not be cached: {reason}")]
    Seed { url: String, reason: String },

    /// A seed asset path does not resolve against the origin.
    #[error("Invalid seed asset path '{path}': {source}")]
    InvalidSeedPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The arbiter's generation was deleted by a newer worker.
    #[error("Cache generation {cache} has been retired")]
    GenerationRetired { cache: String },

    /// Network failure with no cached fallback.
    #[error(transparent)]
    Network(#[from] FetchError),

    /// Cache storage failure.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
