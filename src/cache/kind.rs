//! Cache kinds and the records stored under them.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::model::{GeolocationRecord, WeatherRecord};

/// Which provider response a cache file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    Geolocation,
    Weather,
}

impl CacheKind {
    /// Every kind, in pipeline order.
    pub const ALL: [CacheKind; 2] = [CacheKind::Geolocation, CacheKind::Weather];

    /// Fixed file name inside the cache directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Geolocation => "geoinfo_cache.json",
            Self::Weather => "weather_cache.json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Geolocation => "geolocation",
            Self::Weather => "weather",
        }
    }
}

impl fmt::Display for CacheKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A record type that can be served from the cache.
pub trait CachedRecord: DeserializeOwned {
    /// File the record lives in.
    const KIND: CacheKind;

    /// Whether a decoded record may be returned as a cache hit.
    fn is_usable(&self) -> bool {
        true
    }
}

impl CachedRecord for GeolocationRecord {
    const KIND: CacheKind = CacheKind::Geolocation;

    // Failed lookups are persisted for diagnosis but never served.
    fn is_usable(&self) -> bool {
        self.is_success()
    }
}

impl CachedRecord for WeatherRecord {
    const KIND: CacheKind = CacheKind::Weather;
}
