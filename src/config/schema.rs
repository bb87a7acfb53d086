//! Configuration file schema.
//!
//! Every key is optional; anything left out keeps its built-in default.
//!
//! ```yaml
//! cache_ttl: 30m
//! cache_dir: /var/tmp/ipweather
//! timeout: 10s
//! endpoints:
//!   public_ip: https://api.ipify.org
//!   geolocation: http://ip-api.com/json
//!   forecast: https://api.open-meteo.com/v1/forecast
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Maximum cache age, e.g. "30m" or "1h".
    #[serde(default)]
    pub cache_ttl: Option<String>,

    /// Directory for the cache files.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Per-request timeout, e.g. "10s".
    #[serde(default)]
    pub timeout: Option<String>,

    #[serde(default)]
    pub endpoints: EndpointOverrides,
}

/// Replacement service URLs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointOverrides {
    #[serde(default)]
    pub public_ip: Option<String>,
    #[serde(default)]
    pub geolocation: Option<String>,
    #[serde(default)]
    pub forecast: Option<String>,
}
