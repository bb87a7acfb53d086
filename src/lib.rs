//! ipweather - the current temperature where your public IP says you are.
//!
//! A run resolves the caller's public IP, geolocates it, and fetches the
//! current weather for the resulting coordinates. Both lookups are cached
//! on disk and reused while younger than the configured TTL.
//!
//! # Modules
//!
//! - [`cache`] - File cache with modification-time expiry
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered settings from defaults, YAML, env and flags
//! - [`error`] - Error types and result aliases
//! - [`http`] - Blocking HTTP client
//! - [`model`] - Geolocation and weather records
//! - [`pipeline`] - Stage orchestration and progress events
//! - [`resolve`] - The public IP, geolocation and weather lookups
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use ipweather::model::WeatherCondition;
//!
//! assert_eq!(WeatherCondition::from_wmo_code(2).description(), "Partly cloudy");
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod resolve;
pub mod ui;

pub use error::{IpWeatherError, Result};
