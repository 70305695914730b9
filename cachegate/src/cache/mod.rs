//! Cache generations and their storage.
//!
//! # Layers
//!
//! ```text
//! CacheStorage ──► one Arc<dyn Cache> per generation name
//!                    └── MemoryCacheProvider (moka)
//! ResponseCacheClient ──► Request/Response view over one generation
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cachegate::cache::{CacheStorage, ResponseCacheClient};
//!
//! let storage = CacheStorage::in_memory();
//! let client = ResponseCacheClient::new("app-v1", storage.open("app-v1"));
//! client.put(&request, &response).await?;
//! let hit = client.match_request(&request).await;
//! ```

mod clients;
mod providers;
mod storage;
mod traits;

pub use clients::{ResponseCacheClient, StoredResponse};
pub use providers::MemoryCacheProvider;
pub use storage::{CacheFactory, CacheStorage};
pub use traits::{BoxFuture, Cache, CacheError};
