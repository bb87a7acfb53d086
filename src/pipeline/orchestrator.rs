//! Runs the cache check and the three lookups in order.

use crate::cache::{CacheKind, CacheStore};
use crate::config::{Endpoints, Settings};
use crate::error::{CacheWriteWarning, Result};
use crate::http::HttpClient;
use crate::model::{Forecast, GeolocationRecord, WeatherRecord};
use crate::resolve::{
    CachePolicy, GeolocationResolver, PublicIpResolver, Resolved, WeatherResolver,
};

use super::event::{PipelineEvent, PipelineObserver, Stage};

/// Resolves a [`Forecast`] for the caller's current location.
///
/// ```text
/// CheckingCache -> Done                                (both entries fresh)
/// CheckingCache -> FetchingWeather -> Done             (location fresh)
/// CheckingCache -> FetchingIp -> FetchingGeo -> FetchingWeather -> Done
/// ```
///
/// Any error moves to `Failed` and ends the run.
pub struct Pipeline {
    store: CacheStore,
    http: HttpClient,
    endpoints: Endpoints,
}

impl Pipeline {
    pub fn new(store: CacheStore, http: HttpClient, endpoints: Endpoints) -> Self {
        Self {
            store,
            http,
            endpoints,
        }
    }

    /// Build a pipeline from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(
            settings.cache_store(),
            HttpClient::new(settings.timeout)?,
            settings.endpoints.clone(),
        ))
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Run to completion, reporting every transition to `observer`.
    ///
    /// With `force_refresh` both cache files are removed before the cache
    /// check, so the run always goes to the network.
    pub fn run(&self, force_refresh: bool, observer: &mut dyn PipelineObserver) -> Result<Forecast> {
        match self.execute(force_refresh, observer) {
            Ok(forecast) => {
                let label = format!("{}: {}", forecast.city, forecast.temperature_label());
                observer.on_event(&PipelineEvent::new(
                    Stage::Done {
                        city: forecast.city.clone(),
                        temperature: forecast.temperature,
                    },
                    label,
                ));
                Ok(forecast)
            }
            Err(e) => {
                tracing::debug!("Pipeline failed: {}", e);
                observer.on_event(&PipelineEvent::new(Stage::Failed(e.kind()), e.to_string()));
                Err(e)
            }
        }
    }

    fn execute(&self, force_refresh: bool, observer: &mut dyn PipelineObserver) -> Result<Forecast> {
        if force_refresh {
            self.clear_caches();
        }
        let policy = CachePolicy::from_force_refresh(force_refresh);

        observer.on_event(&PipelineEvent::new(Stage::CheckingCache, "Checking cache"));
        let cached_geo = match policy {
            CachePolicy::PreferCache => self.store.read::<GeolocationRecord>(),
            CachePolicy::Bypass => None,
        };

        let Some(geo) = cached_geo else {
            let geo = self.locate(observer)?;
            let weather = self.fetch_weather(&geo, observer)?;
            return Ok(Forecast::new(&geo, &weather, false));
        };

        tracing::debug!(
            "Using cached location {} ({}s old)",
            geo.record.place(),
            geo.age.as_secs()
        );
        match self.store.read::<WeatherRecord>() {
            // Weather written before the location belongs to an earlier one.
            Some(weather) if weather.modified >= geo.modified => {
                tracing::debug!("Using cached weather ({}s old)", weather.age.as_secs());
                return Ok(Forecast::new(&geo.record, &weather.record, true));
            }
            Some(_) => tracing::debug!("Cached weather predates the cached location"),
            None => {}
        }

        let weather = self.fetch_weather(&geo.record, observer)?;
        Ok(Forecast::new(&geo.record, &weather, false))
    }

    fn locate(&self, observer: &mut dyn PipelineObserver) -> Result<GeolocationRecord> {
        observer.on_event(&PipelineEvent::new(Stage::FetchingIp, "Fetching public IP"));
        let ip = PublicIpResolver::new(&self.http, &self.endpoints.public_ip).resolve()?;

        observer.on_event(&PipelineEvent::new(
            Stage::FetchingGeo,
            format!("Locating {}", ip),
        ));
        let resolved = GeolocationResolver::new(&self.http, &self.store, &self.endpoints.geolocation)
            .resolve(ip, CachePolicy::Bypass)?;
        self.discard_weather();
        Ok(forward_warning(resolved, observer))
    }

    fn fetch_weather(
        &self,
        geo: &GeolocationRecord,
        observer: &mut dyn PipelineObserver,
    ) -> Result<WeatherRecord> {
        observer.on_event(&PipelineEvent::new(
            Stage::FetchingWeather,
            format!("Fetching weather for {}", geo.place()),
        ));
        // The cache was already consulted during the check.
        let resolved = WeatherResolver::new(&self.http, &self.store, &self.endpoints.forecast)
            .resolve(geo.lat, geo.lon, CachePolicy::Bypass)?;
        Ok(forward_warning(resolved, observer))
    }

    /// Drop cached weather once a new location is known, so a later run
    /// cannot pair the two if this run's weather lookup fails.
    fn discard_weather(&self) {
        match self.store.clear(CacheKind::Weather) {
            Ok(true) => tracing::debug!("Discarded weather cached for the previous location"),
            Ok(false) => {}
            Err(e) => tracing::warn!("Failed to discard cached weather: {}", e),
        }
    }

    fn clear_caches(&self) {
        for kind in CacheKind::ALL {
            match self.store.clear(kind) {
                Ok(true) => tracing::debug!("Cleared {} cache", kind),
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Failed to clear {} cache: {}", kind, e);
                }
            }
        }
    }
}

fn forward_warning<T>(mut resolved: Resolved<T>, observer: &mut dyn PipelineObserver) -> T {
    if let Some(warning) = resolved.warning.take() {
        observer.on_warning(&warning);
    }
    resolved.record
}

/// Collects events and warnings; used in tests and by callers that render
/// after the fact.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<PipelineEvent>,
    pub warnings: Vec<CacheWriteWarning>,
}

impl RecordingObserver {
    pub fn stages(&self) -> Vec<Stage> {
        self.events.iter().map(|e| e.stage.clone()).collect()
    }
}

impl PipelineObserver for RecordingObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        self.events.push(event.clone());
    }

    fn on_warning(&mut self, warning: &CacheWriteWarning) {
        self.warnings.push(warning.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use httpmock::prelude::*;
    use httpmock::Mock;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    const IP: &str = "203.0.113.5";
    const GEO: &str = r#"{"status":"success","country":"Testland","city":"Testville","lat":10.0,"lon":20.0,"isp":"Example ISP","query":"203.0.113.5"}"#;
    const GEO_ELSEWHERE: &str = r#"{"status":"success","country":"Otherland","city":"Cachedton","lat":-33.5,"lon":151.25,"isp":"Cached ISP","query":"198.51.100.7"}"#;
    const GEO_FAIL: &str = r#"{"status":"fail","message":"private range","query":"203.0.113.5"}"#;
    const WEATHER: &str = r#"{"latitude":10.0,"longitude":20.0,"current_units":{"temperature_2m":"°C"},"current":{"time":"2026-10-19T12:00","interval":900,"temperature_2m":21.3,"weather_code":2}}"#;
    const WEATHER_OLD: &str = r#"{"latitude":-33.5,"longitude":151.25,"current":{"time":"2026-10-19T08:00","temperature_2m":14.0,"weather_code":61}}"#;

    struct Harness {
        temp: TempDir,
        server: MockServer,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                temp: TempDir::new().unwrap(),
                server: MockServer::start(),
            }
        }

        fn store(&self) -> CacheStore {
            CacheStore::new(self.temp.path(), Duration::from_secs(3600))
        }

        fn pipeline(&self) -> Pipeline {
            Pipeline::new(
                self.store(),
                HttpClient::new(Some(Duration::from_secs(5))).unwrap(),
                Endpoints {
                    public_ip: self.server.url("/ip"),
                    geolocation: self.server.url("/json"),
                    forecast: self.server.url("/v1/forecast"),
                },
            )
        }

        fn mock_ip(&self) -> Mock<'_> {
            self.server.mock(|when, then| {
                when.method(GET).path("/ip");
                then.status(200).body(IP);
            })
        }

        fn mock_geo(&self, body: &str) -> Mock<'_> {
            let body = body.to_string();
            self.server.mock(move |when, then| {
                when.method(GET).path(format!("/json/{}", IP));
                then.status(200).body(body);
            })
        }

        fn mock_weather(&self, latitude: &str, longitude: &str) -> Mock<'_> {
            let (latitude, longitude) = (latitude.to_string(), longitude.to_string());
            self.server.mock(move |when, then| {
                when.method(GET)
                    .path("/v1/forecast")
                    .query_param("latitude", latitude)
                    .query_param("longitude", longitude);
                then.status(200).body(WEATHER);
            })
        }

        fn seed(&self, kind: CacheKind, body: &str) {
            self.store().write(kind, body.as_bytes()).unwrap();
        }
    }

    fn backdate(path: &std::path::Path, by: Duration) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(std::time::SystemTime::now() - by)
            .unwrap();
    }

    #[test]
    fn fresh_run_fetches_everything_and_caches_both() {
        let h = Harness::new();
        let ip = h.mock_ip();
        let geo = h.mock_geo(GEO);
        let weather = h.mock_weather("10.000000", "20.000000");

        let mut observer = RecordingObserver::default();
        let forecast = h.pipeline().run(false, &mut observer).unwrap();

        ip.assert_hits(1);
        geo.assert_hits(1);
        weather.assert_hits(1);
        assert_eq!(forecast.city, "Testville");
        assert_eq!(forecast.temperature_label(), "21.3°C");
        assert!(!forecast.from_cache);
        assert!(h.store().path(CacheKind::Geolocation).exists());
        assert!(h.store().path(CacheKind::Weather).exists());
        assert_eq!(
            observer.stages(),
            vec![
                Stage::CheckingCache,
                Stage::FetchingIp,
                Stage::FetchingGeo,
                Stage::FetchingWeather,
                Stage::Done {
                    city: "Testville".into(),
                    temperature: 21.3
                },
            ]
        );
        assert_eq!(observer.events[2].label, "Locating 203.0.113.5");
        assert_eq!(observer.events[4].label, "Testville: 21.3°C");
    }

    #[test]
    fn second_run_is_served_from_cache() {
        let h = Harness::new();
        let ip = h.mock_ip();
        let geo = h.mock_geo(GEO);
        let weather = h.mock_weather("10.000000", "20.000000");
        let pipeline = h.pipeline();

        let first = pipeline.run(false, &mut ()).unwrap();
        let mut observer = RecordingObserver::default();
        let second = pipeline.run(false, &mut observer).unwrap();

        ip.assert_hits(1);
        geo.assert_hits(1);
        weather.assert_hits(1);
        assert!(second.from_cache);
        assert_eq!(second.city, first.city);
        assert_eq!(second.temperature, first.temperature);
        assert_eq!(
            observer.stages(),
            vec![
                Stage::CheckingCache,
                Stage::Done {
                    city: "Testville".into(),
                    temperature: 21.3
                },
            ]
        );
    }

    #[test]
    fn cached_location_drives_weather_lookup() {
        let h = Harness::new();
        h.seed(CacheKind::Geolocation, GEO_ELSEWHERE);
        let ip = h.mock_ip();
        let geo = h.mock_geo(GEO);
        let weather = h.mock_weather("-33.500000", "151.250000");

        let mut observer = RecordingObserver::default();
        let forecast = h.pipeline().run(false, &mut observer).unwrap();

        ip.assert_hits(0);
        geo.assert_hits(0);
        weather.assert_hits(1);
        assert_eq!(forecast.city, "Cachedton");
        assert!(!forecast.from_cache);
        assert_eq!(
            &observer.stages()[..2],
            &[Stage::CheckingCache, Stage::FetchingWeather]
        );
    }

    #[test]
    fn fresh_location_ignores_cached_weather() {
        let h = Harness::new();
        h.seed(CacheKind::Weather, WEATHER_OLD);
        h.mock_ip();
        h.mock_geo(GEO);
        let weather = h.mock_weather("10.000000", "20.000000");

        let forecast = h.pipeline().run(false, &mut ()).unwrap();

        weather.assert_hits(1);
        assert_eq!(forecast.temperature, 21.3);
    }

    #[test]
    fn weather_failure_after_relocating_discards_old_weather() {
        let h = Harness::new();
        h.seed(CacheKind::Geolocation, GEO_ELSEWHERE);
        h.seed(CacheKind::Weather, WEATHER_OLD);
        backdate(&h.store().path(CacheKind::Geolocation), Duration::from_secs(3601));
        h.mock_ip();
        h.mock_geo(GEO);
        let mut unavailable = h.server.mock(|when, then| {
            when.method(GET).path("/v1/forecast");
            then.status(503);
        });
        let pipeline = h.pipeline();

        let err = pipeline.run(false, &mut ()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(h.store().path(CacheKind::Geolocation).exists());
        assert!(!h.store().path(CacheKind::Weather).exists());

        unavailable.delete();
        let weather = h.mock_weather("10.000000", "20.000000");
        let forecast = pipeline.run(false, &mut ()).unwrap();

        weather.assert_hits(1);
        assert_eq!(forecast.city, "Testville");
        assert_eq!(forecast.temperature, 21.3);
        assert!(!forecast.from_cache);
    }

    #[test]
    fn weather_write_failure_after_relocating_is_not_served_later() {
        let h = Harness::new();
        // A non-empty directory in place of the weather file: it can be
        // neither removed nor replaced.
        let weather_path = h.store().path(CacheKind::Weather);
        fs::create_dir_all(weather_path.join("held")).unwrap();
        h.mock_ip();
        h.mock_geo(GEO);
        let weather = h.mock_weather("10.000000", "20.000000");
        let pipeline = h.pipeline();

        let mut observer = RecordingObserver::default();
        let first = pipeline.run(false, &mut observer).unwrap();
        assert_eq!(first.city, "Testville");
        assert_eq!(observer.warnings.len(), 1);
        assert_eq!(observer.warnings[0].path, weather_path);

        let second = pipeline.run(false, &mut ()).unwrap();
        weather.assert_hits(2);
        assert!(!second.from_cache);
    }

    #[test]
    fn weather_older_than_location_is_not_served() {
        // What remains when a weather write fails after relocating and the
        // old entry could not be removed.
        let h = Harness::new();
        h.seed(CacheKind::Weather, WEATHER_OLD);
        backdate(&h.store().path(CacheKind::Weather), Duration::from_secs(60));
        h.seed(CacheKind::Geolocation, GEO);
        let ip = h.mock_ip();
        let weather = h.mock_weather("10.000000", "20.000000");

        let mut observer = RecordingObserver::default();
        let forecast = h.pipeline().run(false, &mut observer).unwrap();

        ip.assert_hits(0);
        weather.assert_hits(1);
        assert_eq!(forecast.city, "Testville");
        assert_eq!(forecast.temperature, 21.3);
        assert_eq!(
            &observer.stages()[..2],
            &[Stage::CheckingCache, Stage::FetchingWeather]
        );
    }

    #[test]
    fn force_refresh_clears_and_refetches() {
        let h = Harness::new();
        h.seed(CacheKind::Geolocation, GEO_ELSEWHERE);
        h.seed(CacheKind::Weather, WEATHER_OLD);
        let ip = h.mock_ip();
        let geo = h.mock_geo(GEO);
        let weather = h.mock_weather("10.000000", "20.000000");

        let mut observer = RecordingObserver::default();
        let forecast = h.pipeline().run(true, &mut observer).unwrap();

        ip.assert_hits(1);
        geo.assert_hits(1);
        weather.assert_hits(1);
        assert_eq!(forecast.city, "Testville");
        assert!(!forecast.from_cache);
        assert_eq!(observer.stages().len(), 5);
    }

    #[test]
    fn force_refresh_leaves_no_stale_files_when_lookup_fails() {
        let h = Harness::new();
        h.seed(CacheKind::Geolocation, GEO_ELSEWHERE);
        h.seed(CacheKind::Weather, WEATHER_OLD);
        h.server.mock(|when, then| {
            when.method(GET).path("/ip");
            then.status(503);
        });

        let err = h.pipeline().run(true, &mut ()).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(!h.store().path(CacheKind::Geolocation).exists());
        assert!(!h.store().path(CacheKind::Weather).exists());
    }

    #[test]
    fn failed_geolocation_aborts_before_weather() {
        let h = Harness::new();
        h.mock_ip();
        let geo = h.mock_geo(GEO_FAIL);
        let weather = h.mock_weather("0.000000", "0.000000");
        let pipeline = h.pipeline();

        let mut observer = RecordingObserver::default();
        let err = pipeline.run(false, &mut observer).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Geolocation);
        weather.assert_hits(0);
        assert_eq!(
            observer.stages(),
            vec![
                Stage::CheckingCache,
                Stage::FetchingIp,
                Stage::FetchingGeo,
                Stage::Failed(ErrorKind::Geolocation),
            ]
        );

        // Persisted for inspection, never served.
        assert!(h.store().path(CacheKind::Geolocation).exists());
        let _ = pipeline.run(false, &mut ());
        geo.assert_hits(2);
    }

    #[test]
    fn expired_entries_are_refetched() {
        let h = Harness::new();
        h.seed(CacheKind::Geolocation, GEO_ELSEWHERE);
        h.seed(CacheKind::Weather, WEATHER_OLD);
        for kind in CacheKind::ALL {
            backdate(&h.store().path(kind), Duration::from_secs(3601));
        }
        let ip = h.mock_ip();
        h.mock_geo(GEO);
        h.mock_weather("10.000000", "20.000000");

        let forecast = h.pipeline().run(false, &mut ()).unwrap();

        ip.assert_hits(1);
        assert_eq!(forecast.city, "Testville");
    }

    #[test]
    fn unwritable_cache_surfaces_warnings_but_succeeds() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();
        let h = Harness::new();
        h.mock_ip();
        h.mock_geo(GEO);
        h.mock_weather("10.000000", "20.000000");
        let pipeline = Pipeline::new(
            CacheStore::new(&blocker, Duration::from_secs(3600)),
            HttpClient::new(None).unwrap(),
            Endpoints {
                public_ip: h.server.url("/ip"),
                geolocation: h.server.url("/json"),
                forecast: h.server.url("/v1/forecast"),
            },
        );

        let mut observer = RecordingObserver::default();
        let forecast = pipeline.run(false, &mut observer).unwrap();

        assert_eq!(forecast.city, "Testville");
        assert_eq!(observer.warnings.len(), 2);
        assert!(observer.stages().last().unwrap().is_terminal());
    }

    #[test]
    fn from_settings_uses_configured_store() {
        let temp = TempDir::new().unwrap();
        let settings = Settings {
            cache_dir: temp.path().to_path_buf(),
            cache_ttl: Duration::from_secs(60),
            ..Default::default()
        };
        let pipeline = Pipeline::from_settings(&settings).unwrap();
        assert_eq!(pipeline.store().dir(), temp.path());
        assert_eq!(pipeline.store().ttl(), Duration::from_secs(60));
    }
}
