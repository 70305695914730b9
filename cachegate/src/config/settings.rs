//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.

use url::Url;

use crate::arbiter::{default_origin, default_seed_assets, DEFAULT_CACHE_NAME};
use crate::network::DEFAULT_TIMEOUT_SECS;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Cache generation settings
    pub cache: CacheSettings,
    /// Origin the worker is scoped to
    pub origin: OriginSettings,
    /// Assets stored at install
    pub seed: SeedSettings,
    /// HTTP client settings
    pub network: NetworkSettings,
}

/// Cache configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Name of the current cache generation. Changing it retires every
    /// other generation on the next activation.
    pub name: String,
}

/// Origin configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct OriginSettings {
    pub url: Url,
}

/// Seed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedSettings {
    /// Origin-relative paths fetched and stored at install.
    pub assets: Vec<String>,
}

/// Network configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSettings {
    /// Timeout in seconds for HTTP requests.
    pub timeout_secs: u64,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            cache: CacheSettings {
                name: DEFAULT_CACHE_NAME.to_string(),
            },
            origin: OriginSettings {
                url: default_origin(),
            },
            seed: SeedSettings {
                assets: default_seed_assets(),
            },
            network: NetworkSettings {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}
