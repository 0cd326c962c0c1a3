//! Configuration Module
//!
//! Handles loading Pokedex settings from environment variables.

use std::env;
use std::time::Duration;

/// Default PokeAPI root, without trailing slash.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Pokedex configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// PokeAPI root URL
    pub base_url: String,
    /// Cache sweep period and entry max-age, in seconds
    pub cache_interval: u64,
    /// Per-request HTTP timeout, in seconds
    pub http_timeout: u64,
    /// Highest roll that still counts as a catch
    pub catch_threshold: u32,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEAPI_BASE_URL` - PokeAPI root (default: https://pokeapi.co/api/v2)
    /// - `CACHE_INTERVAL_SECS` - Cache TTL and sweep period (default: 300)
    /// - `HTTP_TIMEOUT_SECS` - HTTP request timeout, zero ignored (default: 10)
    /// - `CATCH_THRESHOLD` - Catch roll threshold (default: 20)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            cache_interval: env::var("CACHE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cache_interval),
            http_timeout: env::var("HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.http_timeout),
            catch_threshold: env::var("CATCH_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.catch_threshold),
        }
    }

    /// Cache interval as a `Duration`.
    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    /// HTTP timeout as a `Duration`.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_interval: 300,
            http_timeout: 10,
            catch_threshold: 20,
        }
    }
}
