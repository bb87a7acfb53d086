//! Error types for ipweather operations.
//!
//! This module defines [`IpWeatherError`], the error type returned by every
//! fallible pipeline stage, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Any `IpWeatherError` returned from a resolver aborts the pipeline
//! - Cache read problems are never errors; they are treated as misses
//! - Cache write problems are reported as a [`CacheWriteWarning`] and the
//!   pipeline carries on

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The remote service a request was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Public IP echo service.
    PublicIp,
    /// IP to location lookup.
    Geolocation,
    /// Current conditions forecast.
    Weather,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PublicIp => "public IP service",
            Self::Geolocation => "geolocation service",
            Self::Weather => "weather service",
        };
        f.write_str(name)
    }
}

/// Core error type for ipweather operations.
#[derive(Debug, Error)]
pub enum IpWeatherError {
    /// Transport failure, non-2xx status, or an empty body.
    #[error("Request to {service} failed: {message}")]
    Network { service: Service, message: String },

    /// Response body could not be decoded into the expected shape.
    #[error("Could not decode response from {service}: {message}")]
    Decode { service: Service, message: String },

    /// The geolocation provider answered, but reported a failure.
    #[error("Geolocation lookup failed with status '{status}'{}", detail_suffix(.message))]
    Geolocation {
        status: String,
        message: Option<String>,
    },

    /// Invalid configuration file or value.
    #[error("Invalid configuration: {message}")]
    Config { message: String },

    /// Configuration file could not be parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Coarse classification of an [`IpWeatherError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Decode,
    Geolocation,
    Config,
    Io,
    Other,
}

impl IpWeatherError {
    /// Build a network error for `service`.
    pub fn network(service: Service, message: impl Into<String>) -> Self {
        Self::Network {
            service,
            message: message.into(),
        }
    }

    /// Build a decode error for `service`.
    pub fn decode(service: Service, message: impl Into<String>) -> Self {
        Self::Decode {
            service,
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network { .. } => ErrorKind::Network,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Geolocation { .. } => ErrorKind::Geolocation,
            Self::Config { .. } | Self::ConfigParse { .. } => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Other(_) => ErrorKind::Other,
        }
    }
}

/// Result type alias for ipweather operations.
pub type Result<T> = std::result::Result<T, IpWeatherError>;

/// A cache file could not be persisted.
///
/// Never aborts a run: the freshly fetched record is still used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to write cache file {path}: {message}")]
pub struct CacheWriteWarning {
    /// File that could not be written.
    pub path: PathBuf,
    /// Underlying failure.
    pub message: String,
}
