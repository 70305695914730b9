//! The resource cache arbiter.
//!
//! # Request Flow
//!
//! ```text
//! request ──► same origin? ──no──► not intercepted
//!                 │yes
//!                 ▼
//!        generation exists? ──no──► GenerationRetired
//!                 │yes
//!                 ▼
//!           cache lookup ──hit──► stored response
//!                 │miss
//!                 ▼
//!          fetch(clone) ──ok──► cacheable? ──yes──► spawn refill, return
//!                 │                 └─no──► return as-is
//!                 │err
//!                 ▼
//!           cache lookup ──hit──► stored response
//!                 └─miss──► network error
//! ```

use std::sync::Arc;

use futures::future::try_join_all;
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::config::ArbiterConfig;
use super::error::ArbiterError;
use super::policy::{is_cacheable, Arbitration, ServedFrom};
use crate::cache::{CacheStorage, ResponseCacheClient};
use crate::network::Fetcher;
use crate::resource::{Request, Response};

/// Outcome of a successful seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    /// Generation that was seeded.
    pub cache_name: String,
    /// Number of entries stored.
    pub entries: usize,
    /// Total body bytes stored.
    pub bytes: u64,
}

/// Cache-first, network-fallback, cache-refill arbiter for one generation.
pub struct Arbiter<F> {
    config: ArbiterConfig,
    storage: Arc<CacheStorage>,
    fetcher: F,
    pending_refills: Mutex<Vec<JoinHandle<()>>>,
}

impl<F: Fetcher> Arbiter<F> {
    pub fn new(config: ArbiterConfig, storage: Arc<CacheStorage>, fetcher: F) -> Self {
        Self {
            config,
            storage,
            fetcher,
            pending_refills: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &ArbiterConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<CacheStorage> {
        &self.storage
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Client for the current generation, if it exists.
    ///
    /// Only [`seed`](Self::seed) creates the generation; once another
    /// worker retires it this returns `None` for good.
    pub fn current_cache(&self) -> Option<ResponseCacheClient> {
        let name = self.config.cache_name();
        self.storage
            .get(name)
            .map(|cache| ResponseCacheClient::new(name, cache))
    }

    /// Pre-populate the current generation with the seed asset list.
    ///
    /// Every asset is fetched before the generation is opened or anything
    /// is stored. A transport error or a non-2xx status on any asset fails
    /// the whole seed and leaves storage untouched. If a write fails
    /// partway, entries already written are restored to what they held
    /// before the seed.
    pub async fn seed(&self) -> Result<SeedReport, ArbiterError> {
        let urls = self.config.seed_urls()?;
        let name = self.config.cache_name();
        info!(cache = %name, assets = urls.len(), "Caching app shell");

        let fetches = urls.into_iter().map(|url| async move {
            let request = Request::get(url);
            let response = self
                .fetcher
                .fetch(request.clone())
                .await
                .map_err(|e| ArbiterError::Seed {
                    url: request.url().to_string(),
                    reason: e.to_string(),
                })?;
            if !response.is_ok() {
                return Err(ArbiterError::Seed {
                    url: request.url().to_string(),
                    reason: format!("HTTP {}", response.status()),
                });
            }
            Ok((request, response))
        });

        let fetched = match try_join_all(fetches).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(cache = %name, error = %e, "App shell caching failed");
                return Err(e);
            }
        };

        let cache = ResponseCacheClient::new(name, self.storage.open(name));
        let mut stored: Vec<(&Request, Option<Response>)> = Vec::with_capacity(fetched.len());
        let mut bytes = 0u64;
        for (request, response) in &fetched {
            let previous = cache.match_request(request).await;
            if let Err(e) = cache.put(request, response).await {
                warn!(cache = %name, url = %request.url(), error = %e, "Seed write failed, rolling back");
                rollback(&cache, stored).await;
                return Err(e.into());
            }
            stored.push((request, previous));
            bytes += response.body().len() as u64;
        }

        Ok(SeedReport {
            cache_name: cache.name().to_string(),
            entries: stored.len(),
            bytes,
        })
    }

    /// Delete every generation other than the current one.
    ///
    /// Returns the names that were deleted. Running it again against the
    /// same storage deletes nothing.
    pub fn retire_old_generations(&self) -> Vec<String> {
        let current = self.config.cache_name();
        let mut retired = Vec::new();

        for name in self.storage.keys() {
            if name == current {
                continue;
            }
            if self.storage.delete(&name) {
                info!(cache = %name, "Removing old cache");
                retired.push(name);
            }
        }

        retired
    }

    /// Decide how to answer `request`.
    ///
    /// Returns `Ok(None)` for cross-origin requests, which are left to the
    /// platform's default handling. Fails with
    /// [`ArbiterError::GenerationRetired`] once the generation has been
    /// deleted; it is never recreated here.
    pub async fn arbitrate(&self, request: Request) -> Result<Option<Arbitration>, ArbiterError> {
        if !request.is_same_origin(self.config.origin()) {
            trace!(url = %request.url(), "Cross-origin request, not intercepting");
            return Ok(None);
        }
        debug!(url = %request.url(), method = %request.method(), "Fetch");

        let Some(cache) = self.current_cache() else {
            warn!(cache = %self.config.cache_name(), "Cache generation no longer exists");
            return Err(ArbiterError::GenerationRetired {
                cache: self.config.cache_name().to_string(),
            });
        };
        if let Some(response) = cache.match_request(&request).await {
            debug!(url = %request.url(), "Found in cache");
            return Ok(Some(Arbitration::new(response, ServedFrom::Cache)));
        }

        match self.fetcher.fetch(request.clone()).await {
            Ok(response) => {
                if is_cacheable(&response) {
                    self.start_refill(cache, request, response.clone()).await;
                } else {
                    debug!(
                        url = %request.url(),
                        status = response.status().as_u16(),
                        response_type = %response.response_type(),
                        "Response not cacheable"
                    );
                }
                Ok(Some(Arbitration::new(response, ServedFrom::Network)))
            }
            Err(e) => {
                debug!(url = %request.url(), error = %e, "Network failed, trying cache");
                match cache.match_request(&request).await {
                    Some(response) => Ok(Some(Arbitration::new(
                        response,
                        ServedFrom::OfflineFallback,
                    ))),
                    None => Err(ArbiterError::Network(e)),
                }
            }
        }
    }

    /// Wait for every refill write started so far.
    pub async fn flush_refills(&self) {
        let pending = std::mem::take(&mut *self.pending_refills.lock());
        for handle in pending {
            if let Err(e) = handle.await {
                warn!(error = %e, "Cache refill task failed");
            }
        }
    }

    /// Store `response` in the background.
    ///
    /// Write errors are logged and dropped; the caller already has its copy.
    async fn start_refill(&self, cache: ResponseCacheClient, request: Request, response: Response) {
        let refill = async move {
            match cache.put(&request, &response).await {
                Ok(()) => trace!(cache = %cache.name(), url = %request.url(), "Cached response"),
                Err(e) => debug!(
                    cache = %cache.name(),
                    url = %request.url(),
                    error = %e,
                    "Cache refill failed"
                ),
            }
        };

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                let handle = runtime.spawn(refill);
                let mut pending = self.pending_refills.lock();
                pending.retain(|h| !h.is_finished());
                pending.push(handle);
            }
            // No runtime to detach onto; write before returning.
            Err(_) => refill.await,
        }
    }
}

/// Undo a partial seed, newest write first.
///
/// Keys that held an entry before the seed get it back; the rest are removed.
async fn rollback(cache: &ResponseCacheClient, stored: Vec<(&Request, Option<Response>)>) {
    for (request, previous) in stored.into_iter().rev() {
        let restored = match previous {
            Some(response) => cache.put(request, &response).await,
            None => cache.delete(request).await.map(|_| ()),
        };
        if let Err(e) = restored {
            warn!(cache = %cache.name(), url = %request.url(), error = %e, "Rollback failed");
        }
    }
}
