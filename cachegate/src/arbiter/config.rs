//! Arbiter configuration.
//!
//! `ArbiterConfig` carries the three inputs the deploying application
//! provides: the current generation name, the worker origin and the seed
//! asset list. It is passed to the arbiter explicitly so that several
//! generations can coexist in one process.

use url::Url;

use super::error::ArbiterError;

/// Default cache generation name. Bump on every release.
pub const DEFAULT_CACHE_NAME: &str = "wisdom-weaver-v1.0.0";

/// Default worker origin.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

/// App shell assets cached at install time.
pub const DEFAULT_SEED_ASSETS: &[&str] = &[
    "/",
    "/manifest.json",
    "/static/icon-72.png",
    "/static/icon-96.png",
    "/static/icon-128.png",
    "/static/icon-144.png",
    "/static/icon-152.png",
    "/static/icon-192.png",
    "/static/icon-384.png",
    "/static/icon-512.png",
    "/bhagavad_gita_verses.csv",
    "/Public/Images/WhatsApp Image 2024-11-18 at 11.40.34_076eab8e.jpg",
];

/// Parse the default origin.
pub fn default_origin() -> Url {
    Url::parse(DEFAULT_ORIGIN).expect("DEFAULT_ORIGIN is a valid URL")
}

/// Default seed asset list as owned strings.
pub fn default_seed_assets() -> Vec<String> {
    DEFAULT_SEED_ASSETS.iter().map(|s| s.to_string()).collect()
}

/// Configuration for one arbiter instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ArbiterConfig {
    cache_name: String,
    origin: Url,
    seed_assets: Vec<String>,
}

impl ArbiterConfig {
    /// Config for generation `cache_name` at `origin` with the default seed list.
    pub fn new(cache_name: impl Into<String>, origin: Url) -> Self {
        Self {
            cache_name: cache_name.into(),
            origin,
            seed_assets: default_seed_assets(),
        }
    }

    /// Replace the seed asset list.
    pub fn with_seed_assets<I, S>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seed_assets = assets.into_iter().map(Into::into).collect();
        self
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn seed_assets(&self) -> &[String] {
        &self.seed_assets
    }

    /// Resolve every seed asset against the origin, preserving order.
    pub fn seed_urls(&self) -> Result<Vec<Url>, ArbiterError> {
        self.seed_assets
            .iter()
            .map(|path| {
                self.origin
                    .join(path)
                    .map_err(|source| ArbiterError::InvalidSeedPath {
                        path: path.clone(),
                        source,
                    })
            })
            .collect()
    }
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_NAME, default_origin())
    }
}
