//! Cache configuration.

use std::time::Duration;

use serde::Deserialize;

const DEFAULT_HOME_TTL_SECONDS: u64 = 20;

/// Home-feed cache configuration from `brusio.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the home-feed response cache.
    pub enable_home_cache: bool,
    /// Seconds a cached home-feed snapshot stays fresh.
    pub home_ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_home_cache: true,
            home_ttl_seconds: DEFAULT_HOME_TTL_SECONDS,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enable_home_cache: settings.enable_home_cache,
            home_ttl_seconds: settings.home_ttl_seconds,
        }
    }
}

impl CacheConfig {
    pub fn home_ttl(&self) -> Duration {
        Duration::from_secs(self.home_ttl_seconds)
    }
}
