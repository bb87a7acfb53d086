//! The three lookups behind a forecast.
//!
//! - [`PublicIpResolver`] asks an echo service for the caller's address
//! - [`GeolocationResolver`] turns an address into a place and coordinates
//! - [`WeatherResolver`] fetches current conditions for coordinates
//!
//! The last two consult the [`CacheStore`](crate::cache::CacheStore) first
//! and persist the raw response after a network fetch.

pub mod geolocation;
pub mod public_ip;
pub mod weather;

pub use geolocation::GeolocationResolver;
pub use public_ip::PublicIpResolver;
pub use weather::WeatherResolver;

use std::time::Duration;

use crate::error::CacheWriteWarning;

/// Whether a resolver may answer from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Serve a fresh cache entry if there is one.
    #[default]
    PreferCache,
    /// Always go to the network.
    Bypass,
}

impl CachePolicy {
    /// `Bypass` when `force_refresh` is set.
    pub fn from_force_refresh(force_refresh: bool) -> Self {
        if force_refresh {
            Self::Bypass
        } else {
            Self::PreferCache
        }
    }
}

/// Where a resolved record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Read from a cache entry of the given age.
    Cache { age: Duration },
    /// Fetched in this run.
    Network,
}

/// A record plus how it was obtained.
#[derive(Debug, Clone)]
pub struct Resolved<T> {
    pub record: T,
    pub origin: Origin,
    /// Set when the fetched response could not be cached.
    pub warning: Option<CacheWriteWarning>,
}

impl<T> Resolved<T> {
    pub(crate) fn cached(record: T, age: Duration) -> Self {
        Self {
            record,
            origin: Origin::Cache { age },
            warning: None,
        }
    }

    pub(crate) fn fetched(record: T, warning: Option<CacheWriteWarning>) -> Self {
        Self {
            record,
            origin: Origin::Network,
            warning,
        }
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.origin, Origin::Cache { .. })
    }
}
