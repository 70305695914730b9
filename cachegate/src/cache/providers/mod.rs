//! Cache provider implementations.
//!
//! Each provider implements the `Cache` trait for a single generation.
//! Providers are normally created by [`CacheStorage`](crate::cache::CacheStorage)
//! when a generation is first opened.
//!
//! # Available Providers
//!
//! - [`MemoryCacheProvider`]: In-memory store using moka

mod memory;

pub use memory::MemoryCacheProvider;
