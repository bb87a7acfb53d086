//! Records returned by the remote services and the final forecast.
//!
//! Field names follow the providers' JSON so that cached files can be
//! decoded with the same types as live responses.

use serde::{Deserialize, Serialize};

/// Status value the geolocation provider uses for a successful lookup.
pub const GEOLOCATION_SUCCESS: &str = "success";

/// Location information for a public IP address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeolocationRecord {
    /// `"success"` or `"fail"`.
    pub status: String,
    /// Provider diagnostic, present on failed lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub country: String,
    #[serde(default, rename = "regionName", skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default)]
    pub isp: String,
    /// The IP address the lookup was made for.
    #[serde(default)]
    pub query: String,
}

impl GeolocationRecord {
    /// Whether the provider reported a successful lookup.
    pub fn is_success(&self) -> bool {
        self.status == GEOLOCATION_SUCCESS
    }

    /// "City, Country", dropping whichever part is empty.
    pub fn place(&self) -> String {
        describe_place(&self.city, &self.country, &self.query)
    }
}

/// Joins city and country, falling back to `ip` when both are empty.
fn describe_place(city: &str, country: &str, ip: &str) -> String {
    match (city.is_empty(), country.is_empty()) {
        (false, false) => format!("{}, {}", city, country),
        (false, true) => city.to_string(),
        (true, false) => country.to_string(),
        (true, true) => ip.to_string(),
    }
}

/// Unit labels for the `current` block of a forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUnits {
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub interval: String,
    #[serde(default = "default_temperature_unit")]
    pub temperature_2m: String,
    #[serde(default)]
    pub weather_code: String,
}

impl Default for CurrentUnits {
    fn default() -> Self {
        Self {
            time: String::new(),
            interval: String::new(),
            temperature_2m: default_temperature_unit(),
            weather_code: String::new(),
        }
    }
}

fn default_temperature_unit() -> String {
    "°C".to_string()
}

/// The current observation in a forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentObservation {
    /// Observation timestamp as sent by the provider (local ISO-8601).
    #[serde(default)]
    pub time: String,
    /// Observation window in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval: Option<u32>,
    pub temperature_2m: f64,
    pub weather_code: i32,
}

/// Current weather for a pair of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub current_units: CurrentUnits,
    pub current: CurrentObservation,
}

impl WeatherRecord {
    pub fn temperature(&self) -> f64 {
        self.current.temperature_2m
    }

    pub fn condition(&self) -> WeatherCondition {
        WeatherCondition::from_wmo_code(self.current.weather_code)
    }
}

/// Weather condition categories mapped from WMO codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Sleet,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Convert a WMO weather code.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1..=2 => Self::PartlyCloudy,
            3 => Self::Cloudy,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::Sleet, // Freezing drizzle
            61 | 63 | 80 => Self::Rain,
            65 | 81 | 82 => Self::HeavyRain,
            66 | 67 => Self::Sleet, // Freezing rain
            71 | 73 | 75 | 77 | 85 | 86 => Self::Snow,
            95 | 96 | 99 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Get a human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy rain",
            Self::Snow => "Snow",
            Self::Sleet => "Sleet",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown => "Unknown conditions",
        }
    }
}

/// Final result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub city: String,
    pub country: String,
    pub isp: String,
    pub ip: String,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub temperature_unit: String,
    pub weather_code: i32,
    pub condition: WeatherCondition,
    pub observed_at: String,
    /// True when neither lookup touched the network.
    pub from_cache: bool,
}

impl Forecast {
    pub fn new(geo: &GeolocationRecord, weather: &WeatherRecord, from_cache: bool) -> Self {
        Self {
            city: geo.city.clone(),
            country: geo.country.clone(),
            isp: geo.isp.clone(),
            ip: geo.query.clone(),
            latitude: geo.lat,
            longitude: geo.lon,
            temperature: weather.temperature(),
            temperature_unit: weather.current_units.temperature_2m.clone(),
            weather_code: weather.current.weather_code,
            condition: weather.condition(),
            observed_at: weather.current.time.clone(),
            from_cache,
        }
    }

    /// Where the forecast is for, as in [`GeolocationRecord::place`].
    pub fn place(&self) -> String {
        describe_place(&self.city, &self.country, &self.ip)
    }

    /// Temperature with one decimal and its unit, e.g. `21.3°C`.
    pub fn temperature_label(&self) -> String {
        format!("{:.1}{}", self.temperature, self.temperature_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_API_SUCCESS: &str = r#"{
        "status": "success",
        "country": "Testland",
        "countryCode": "TL",
        "region": "TS",
        "regionName": "Test State",
        "city": "Testville",
        "zip": "00000",
        "lat": 10.0,
        "lon": 20.0,
        "timezone": "Etc/UTC",
        "isp": "Example ISP",
        "org": "Example Org",
        "as": "AS64500 Example",
        "query": "203.0.113.5"
    }"#;

    const OPEN_METEO: &str = r#"{
        "latitude": 10.0,
        "longitude": 20.0,
        "generationtime_ms": 0.02,
        "utc_offset_seconds": 0,
        "timezone": "GMT",
        "timezone_abbreviation": "GMT",
        "elevation": 312.0,
        "current_units": {
            "time": "iso8601",
            "interval": "seconds",
            "temperature_2m": "°C",
            "weather_code": "wmo code"
        },
        "current": {
            "time": "2026-10-19T12:00",
            "interval": 900,
            "temperature_2m": 21.3,
            "weather_code": 2
        }
    }"#;

    #[test]
    fn decodes_ip_api_response_ignoring_extra_fields() {
        let geo: GeolocationRecord = serde_json::from_str(IP_API_SUCCESS).unwrap();
        assert!(geo.is_success());
        assert_eq!(geo.city, "Testville");
        assert_eq!(geo.region_name.as_deref(), Some("Test State"));
        assert_eq!(geo.lat, 10.0);
        assert_eq!(geo.lon, 20.0);
        assert_eq!(geo.query, "203.0.113.5");
    }

    #[test]
    fn decodes_ip_api_failure() {
        let geo: GeolocationRecord = serde_json::from_str(
            r#"{"status":"fail","message":"private range","query":"10.0.0.1"}"#,
        )
        .unwrap();
        assert!(!geo.is_success());
        assert_eq!(geo.message.as_deref(), Some("private range"));
        assert!(geo.city.is_empty());
    }

    #[test]
    fn decodes_open_meteo_response() {
        let weather: WeatherRecord = serde_json::from_str(OPEN_METEO).unwrap();
        assert_eq!(weather.temperature(), 21.3);
        assert_eq!(weather.current.weather_code, 2);
        assert_eq!(weather.current.interval, Some(900));
        assert_eq!(weather.current_units.weather_code, "wmo code");
        assert_eq!(weather.elevation, Some(312.0));
    }

    #[test]
    fn weather_without_units_defaults_to_celsius() {
        let weather: WeatherRecord =
            serde_json::from_str(r#"{"current":{"temperature_2m":-4.0,"weather_code":71}}"#)
                .unwrap();
        assert_eq!(weather.current_units.temperature_2m, "°C");
        assert_eq!(weather.condition(), WeatherCondition::Snow);
    }

    #[test]
    fn weather_without_current_block_is_rejected() {
        let result = serde_json::from_str::<WeatherRecord>(r#"{"latitude":1.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn wmo_codes_map_to_conditions() {
        assert_eq!(WeatherCondition::from_wmo_code(0), WeatherCondition::Clear);
        assert_eq!(
            WeatherCondition::from_wmo_code(2),
            WeatherCondition::PartlyCloudy
        );
        assert_eq!(WeatherCondition::from_wmo_code(45), WeatherCondition::Fog);
        assert_eq!(WeatherCondition::from_wmo_code(66), WeatherCondition::Sleet);
        assert_eq!(
            WeatherCondition::from_wmo_code(99),
            WeatherCondition::Thunderstorm
        );
        assert_eq!(
            WeatherCondition::from_wmo_code(42),
            WeatherCondition::Unknown
        );
    }

    #[test]
    fn place_skips_empty_parts() {
        let mut geo: GeolocationRecord = serde_json::from_str(IP_API_SUCCESS).unwrap();
        assert_eq!(geo.place(), "Testville, Testland");
        geo.country.clear();
        assert_eq!(geo.place(), "Testville");
        geo.city.clear();
        assert_eq!(geo.place(), "203.0.113.5");
    }

    #[test]
    fn forecast_combines_both_records() {
        let geo: GeolocationRecord = serde_json::from_str(IP_API_SUCCESS).unwrap();
        let weather: WeatherRecord = serde_json::from_str(OPEN_METEO).unwrap();
        let forecast = Forecast::new(&geo, &weather, false);

        assert_eq!(forecast.city, "Testville");
        assert_eq!(forecast.place(), geo.place());
        assert_eq!(forecast.temperature_label(), "21.3°C");
        assert_eq!(forecast.condition, WeatherCondition::PartlyCloudy);
        assert_eq!(forecast.observed_at, "2026-10-19T12:00");
        assert!(!forecast.from_cache);
    }
}
