//! Resource cache arbiter.
//!
//! The arbiter owns one cache generation and answers every same-origin
//! request cache-first, falling back to the network and refilling the
//! cache with cacheable responses. Two bootstrap procedures run once per
//! worker generation before any request is arbitrated:
//!
//! 1. [`Arbiter::seed`] fills the generation from the seed asset list,
//!    all-or-nothing.
//! 2. [`Arbiter::retire_old_generations`] deletes every other generation.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use cachegate::arbiter::{Arbiter, ArbiterConfig};
//! use cachegate::cache::CacheStorage;
//! use cachegate::network::ReqwestFetcher;
//!
//! let arbiter = Arbiter::new(
//!     ArbiterConfig::default(),
//!     Arc::new(CacheStorage::in_memory()),
//!     ReqwestFetcher::new()?,
//! );
//! arbiter.seed().await?;
//! arbiter.retire_old_generations();
//! let answer = arbiter.arbitrate(request).await?;
//! ```

mod config;
mod error;
mod policy;
mod service;

pub use config::{
    default_origin, default_seed_assets, ArbiterConfig, DEFAULT_CACHE_NAME, DEFAULT_ORIGIN,
    DEFAULT_SEED_ASSETS,
};
pub use error::ArbiterError;
pub use policy::{is_cacheable, Arbitration, ServedFrom};
pub use service::{Arbiter, SeedReport};
