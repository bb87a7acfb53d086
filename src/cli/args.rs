//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{ConfigFile, EndpointOverrides};

/// ipweather - Current temperature for wherever your public IP says you are.
#[derive(Debug, Parser)]
#[command(name = "ipweather")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.ipweather/config.yml)
    #[arg(short, long, global = true, env = "IPWEATHER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Show location and cache details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the result (-qq: print nothing but errors)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Ignore and clear cached data before looking up
    #[arg(short, long)]
    pub refresh: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Settings that can come from flags or the environment.
///
/// Anything given here overrides the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// How long cached lookups stay valid (e.g. 30m, 1h, 90s)
    #[arg(long, global = true, env = "IPWEATHER_CACHE_TTL", value_name = "TTL")]
    pub ttl: Option<String>,

    /// Directory holding the cache files
    #[arg(long, global = true, env = "IPWEATHER_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Per-request timeout (e.g. 10s; 0 for none)
    #[arg(long, global = true, env = "IPWEATHER_TIMEOUT", value_name = "DURATION")]
    pub timeout: Option<String>,

    /// Public IP echo service
    #[arg(long, hide = true, env = "IPWEATHER_PUBLIC_IP_URL", value_name = "URL")]
    pub public_ip_url: Option<String>,

    /// Geolocation service; the IP is appended as a path segment
    #[arg(long, hide = true, env = "IPWEATHER_GEOLOCATION_URL", value_name = "URL")]
    pub geolocation_url: Option<String>,

    /// Forecast service
    #[arg(long, hide = true, env = "IPWEATHER_FORECAST_URL", value_name = "URL")]
    pub forecast_url: Option<String>,
}

impl SettingsArgs {
    /// The overrides as a config layer.
    pub fn to_layer(&self) -> ConfigFile {
        ConfigFile {
            cache_ttl: self.ttl.clone(),
            cache_dir: self.cache_dir.clone(),
            timeout: self.timeout.clone(),
            endpoints: EndpointOverrides {
                public_ip: self.public_ip_url.clone(),
                geolocation: self.geolocation_url.clone(),
                forecast: self.forecast_url.clone(),
            },
        }
    }
}

use super::commands::cache::CacheArgs;

/// Available subcommands. Without one, the forecast is shown.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Inspect or clear cached lookups
    Cache(CacheArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
