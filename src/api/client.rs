//! PokeAPI Client
//!
//! HTTP client for the PokeAPI with every GET routed through the response
//! cache.

use std::time::Duration;

use bytes::Bytes;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::cache::TimedCache;
use crate::config::Config;
use crate::error::{PokedexError, Result};
use crate::models::{LocationArea, LocationPage, Pokemon};

// == PokeAPI Client ==
/// Cached client for the PokeAPI.
///
/// Responses are cached by their full request URL; the same URL is used for
/// lookup and insertion. Only successful responses whose body decodes into
/// the requested type are cached.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    cache: TimedCache,
    base_url: Url,
    location_areas_url: String,
}

impl PokeApiClient {
    // == Constructor ==
    /// Creates a client against `config.base_url` sharing `cache`.
    pub fn new(config: &Config, cache: TimedCache) -> Result<Self> {
        Self::with_timeout(&config.base_url, config.http_timeout(), cache)
    }

    /// Creates a client against an explicit base URL.
    ///
    /// Fails with `InvalidUrl` when `base_url` is not an absolute URL that
    /// can carry a path.
    pub fn with_timeout(base_url: &str, timeout: Duration, cache: TimedCache) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| PokedexError::InvalidUrl(base_url.to_string()))?;
        let location_areas_url = resource_url(&base_url, &["location-area"])?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            cache,
            base_url,
            location_areas_url,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn cache(&self) -> &TimedCache {
        &self.cache
    }

    /// URL of the first location area page.
    pub fn location_areas_url(&self) -> &str {
        &self.location_areas_url
    }

    /// URL of a single location area; `name` is escaped as one path segment.
    pub fn location_area_url(&self, name: &str) -> Result<String> {
        resource_url(&self.base_url, &["location-area", name])
    }

    /// URL of a single Pokemon; `name` is escaped as one path segment.
    pub fn pokemon_url(&self, name: &str) -> Result<String> {
        resource_url(&self.base_url, &["pokemon", name])
    }

    // == Fetch ==
    /// Returns `GET url` decoded as JSON, from the cache when present.
    ///
    /// Non-2xx responses are returned as `PokedexError::Status` and bodies
    /// that fail to decode as `PokedexError::Decode`; neither is cached.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        if let Some(body) = self.cache.get(url) {
            debug!("Cache hit for {}", url);
            return Ok(serde_json::from_slice(&body)?);
        }

        debug!("Cache miss for {}, fetching", url);
        let body = self.get(url).await?;
        let value = serde_json::from_slice(&body)?;
        self.cache.add(url, body);
        Ok(value)
    }

    async fn get(&self, url: &str) -> Result<Bytes> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PokedexError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        info!("Fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }

    // == Resources ==
    /// Fetches a page of location areas; `None` fetches the first page.
    pub async fn location_areas(&self, url: Option<&str>) -> Result<LocationPage> {
        let url = url.unwrap_or(&self.location_areas_url);
        self.fetch_json(url).await
    }

    /// Fetches a single location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = self.location_area_url(name)?;
        self.fetch_json(&url).await
    }

    /// Fetches a Pokemon by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = self.pokemon_url(name)?;
        self.fetch_json(&url).await
    }
}

/// Appends `segments` to the path of `base`, percent-encoding each one so
/// that `/`, `?` and `#` stay inside its segment.
fn resource_url(base: &Url, segments: &[&str]) -> Result<String> {
    if let Some(segment) = segments
        .iter()
        .find(|segment| matches!(**segment, "" | "." | ".."))
    {
        return Err(PokedexError::InvalidUrl(format!("{}/{}", base, segment)));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| PokedexError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.into())
}
