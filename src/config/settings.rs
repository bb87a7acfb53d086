//! Resolved runtime settings.

use std::path::PathBuf;
use std::time::Duration;

use super::duration::parse_duration;
use super::schema::ConfigFile;
use crate::cache::{default_cache_dir, CacheStore, DEFAULT_TTL};
use crate::error::{IpWeatherError, Result};

/// Default public IP echo service.
pub const DEFAULT_PUBLIC_IP_URL: &str = "https://api.ipify.org";

/// Default geolocation service; the IP is appended as a path segment.
pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// Default forecast service.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Service URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub public_ip: String,
    pub geolocation: String,
    pub forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            public_ip: DEFAULT_PUBLIC_IP_URL.to_string(),
            geolocation: DEFAULT_GEOLOCATION_URL.to_string(),
            forecast: DEFAULT_FORECAST_URL.to_string(),
        }
    }
}

/// Everything a run needs, after all layers are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// TTL applied to both cache kinds.
    pub cache_ttl: Duration,
    pub cache_dir: PathBuf,
    /// Per-request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
    pub endpoints: Endpoints,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_TTL,
            cache_dir: default_cache_dir(),
            timeout: None,
            endpoints: Endpoints::default(),
        }
    }
}

impl Settings {
    /// Apply a layer on top of the current values.
    ///
    /// Keys absent from `layer` leave the current value untouched.
    pub fn apply(&mut self, layer: &ConfigFile) -> Result<()> {
        if let Some(ttl) = &layer.cache_ttl {
            let ttl = parse_duration(ttl)?;
            if ttl.is_zero() {
                return Err(IpWeatherError::Config {
                    message: "cache_ttl must be greater than zero".to_string(),
                });
            }
            self.cache_ttl = ttl;
        }

        if let Some(dir) = &layer.cache_dir {
            self.cache_dir = dir.clone();
        }

        if let Some(timeout) = &layer.timeout {
            let timeout = parse_duration(timeout)?;
            self.timeout = (!timeout.is_zero()).then_some(timeout);
        }

        let endpoints = &layer.endpoints;
        if let Some(url) = &endpoints.public_ip {
            self.endpoints.public_ip = validate_url("public_ip", url)?;
        }
        if let Some(url) = &endpoints.geolocation {
            self.endpoints.geolocation = validate_url("geolocation", url)?;
        }
        if let Some(url) = &endpoints.forecast {
            self.endpoints.forecast = validate_url("forecast", url)?;
        }

        Ok(())
    }

    /// Cache store for these settings.
    pub fn cache_store(&self) -> CacheStore {
        CacheStore::new(&self.cache_dir, self.cache_ttl)
    }
}

fn validate_url(name: &str, url: &str) -> Result<String> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(IpWeatherError::Config {
            message: format!("endpoint '{}' must be an http(s) URL, got '{}'", name, url),
        })
    }
}
