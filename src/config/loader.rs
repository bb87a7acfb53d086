//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use super::schema::ConfigFile;
use super::settings::Settings;
use crate::error::{IpWeatherError, Result};

/// Find the user's config at `~/.ipweather/config.yml`, if it exists.
pub fn user_config_path() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    let path = PathBuf::from(home).join(".ipweather").join("config.yml");
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load and parse a config file.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| IpWeatherError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_config(&content, path)
}

/// Parse config YAML. `path` is only used in error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(content).map_err(|e| IpWeatherError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Resolve settings from defaults, a config file, and `overrides`.
///
/// An explicit config path must exist; otherwise the user config is used
/// when present.
pub fn load_settings(explicit: Option<&Path>, overrides: &ConfigFile) -> Result<Settings> {
    let file = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => user_config_path(),
    };
    resolve_settings(file.as_deref(), overrides)
}

fn resolve_settings(file: Option<&Path>, overrides: &ConfigFile) -> Result<Settings> {
    let mut settings = Settings::default();

    if let Some(path) = file {
        tracing::debug!("Loading config from {:?}", path);
        let config = load_config_file(path)?;
        settings.apply(&config)?;
    }

    settings.apply(overrides)?;
    tracing::debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}
