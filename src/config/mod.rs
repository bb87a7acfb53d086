//! Configuration loading for ipweather.
//!
//! Settings are resolved in layers, later layers overriding earlier ones:
//! 1. Built-in defaults ([`Settings::default`])
//! 2. The config file (`--config`, `$IPWEATHER_CONFIG`, or
//!    `~/.ipweather/config.yml`)
//! 3. Environment variables and command-line flags
//!
//! # Example
//!
//! ```
//! use ipweather::config::{ConfigFile, Settings};
//! use std::time::Duration;
//!
//! let mut settings = Settings::default();
//! settings
//!     .apply(&ConfigFile {
//!         cache_ttl: Some("30m".to_string()),
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert_eq!(settings.cache_ttl, Duration::from_secs(1800));
//! ```

pub mod duration;
pub mod loader;
pub mod schema;
pub mod settings;

pub use duration::{format_duration, parse_duration};
pub use loader::{load_config_file, load_settings, parse_config, user_config_path};
pub use schema::{ConfigFile, EndpointOverrides};
pub use settings::{
    Endpoints, Settings, DEFAULT_FORECAST_URL, DEFAULT_GEOLOCATION_URL, DEFAULT_PUBLIC_IP_URL,
};
