//! Current weather lookup.

use super::{CachePolicy, Resolved};
use crate::cache::{CacheKind, CacheStore};
use crate::error::{IpWeatherError, Result, Service};
use crate::http::HttpClient;
use crate::model::WeatherRecord;

/// Variables requested from the forecast service.
pub const CURRENT_VARIABLES: &str = "temperature_2m,weather_code";

/// Fetches current conditions for a pair of coordinates.
pub struct WeatherResolver<'a> {
    http: &'a HttpClient,
    store: &'a CacheStore,
    base_url: &'a str,
}

impl<'a> WeatherResolver<'a> {
    pub fn new(http: &'a HttpClient, store: &'a CacheStore, base_url: &'a str) -> Self {
        Self {
            http,
            store,
            base_url,
        }
    }

    /// URL queried for the given coordinates.
    pub fn url_for(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}?latitude={:.6}&longitude={:.6}&current={}",
            self.base_url, latitude, longitude, CURRENT_VARIABLES
        )
    }

    /// Resolve current weather, serving a fresh cache entry when allowed.
    ///
    /// A cached entry is served without comparing its coordinates to the
    /// requested ones.
    pub fn resolve(
        &self,
        latitude: f64,
        longitude: f64,
        policy: CachePolicy,
    ) -> Result<Resolved<WeatherRecord>> {
        if policy == CachePolicy::PreferCache {
            if let Some(entry) = self.store.read::<WeatherRecord>() {
                return Ok(Resolved::cached(entry.record, entry.age));
            }
        }

        let body = self
            .http
            .get(Service::Weather, &self.url_for(latitude, longitude))?;

        let record: WeatherRecord = serde_json::from_slice(&body)
            .map_err(|e| IpWeatherError::decode(Service::Weather, e.to_string()))?;

        let warning = self.store.write(CacheKind::Weather, &body).err();
        if let Some(warning) = &warning {
            tracing::warn!("{}", warning);
        }

        tracing::debug!(
            "Current temperature at {:.4},{:.4} is {}",
            latitude,
            longitude,
            record.temperature()
        );
        Ok(Resolved::fetched(record, warning))
    }
}
