//! IP to location lookup.

use std::net::IpAddr;

use super::{CachePolicy, Resolved};
use crate::cache::{CacheKind, CacheStore};
use crate::error::{IpWeatherError, Result, Service};
use crate::http::HttpClient;
use crate::model::GeolocationRecord;

/// Resolves an IP address to a [`GeolocationRecord`].
pub struct GeolocationResolver<'a> {
    http: &'a HttpClient,
    store: &'a CacheStore,
    base_url: &'a str,
}

impl<'a> GeolocationResolver<'a> {
    pub fn new(http: &'a HttpClient, store: &'a CacheStore, base_url: &'a str) -> Self {
        Self {
            http,
            store,
            base_url,
        }
    }

    /// URL queried for `ip`.
    pub fn url_for(&self, ip: IpAddr) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), ip)
    }

    /// Resolve `ip`, serving a fresh successful cache entry when allowed.
    ///
    /// On a network fetch the raw body is cached before it is interpreted,
    /// so a failed lookup is kept on disk for diagnosis. The cache never
    /// serves such an entry.
    pub fn resolve(&self, ip: IpAddr, policy: CachePolicy) -> Result<Resolved<GeolocationRecord>> {
        if policy == CachePolicy::PreferCache {
            if let Some(entry) = self.store.read::<GeolocationRecord>() {
                return Ok(Resolved::cached(entry.record, entry.age));
            }
        }

        let body = self.http.get(Service::Geolocation, &self.url_for(ip))?;

        let warning = self.store.write(CacheKind::Geolocation, &body).err();
        if let Some(warning) = &warning {
            tracing::warn!("{}", warning);
        }

        let record: GeolocationRecord = serde_json::from_slice(&body)
            .map_err(|e| IpWeatherError::decode(Service::Geolocation, e.to_string()))?;

        if !record.is_success() {
            return Err(IpWeatherError::Geolocation {
                status: record.status,
                message: record.message,
            });
        }

        tracing::debug!("{} is in {}", ip, record.place());
        Ok(Resolved::fetched(record, warning))
    }
}
