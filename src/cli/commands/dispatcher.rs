//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands};
use crate::config::{load_settings, ConfigFile, Settings};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
///
/// Settings are only resolved for commands that need them, so a broken
/// config file does not get in the way of `completions`.
pub struct CommandDispatcher {
    config_path: Option<PathBuf>,
    overrides: ConfigFile,
}

impl CommandDispatcher {
    /// Create a dispatcher from an optional explicit config file and the
    /// flag/environment layer.
    pub fn new(config_path: Option<PathBuf>, overrides: ConfigFile) -> Self {
        Self {
            config_path,
            overrides,
        }
    }

    /// Create a dispatcher for parsed arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::new(cli.config.clone(), cli.settings.to_layer())
    }

    /// Resolve settings from defaults, the config file, and overrides.
    pub fn settings(&self) -> Result<Settings> {
        load_settings(self.config_path.as_deref(), &self.overrides)
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand the forecast is shown.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Cache(args)) => {
                let cmd = super::cache::CacheCommand::new(self.settings()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd = super::run::RunCommand::new(self.settings()?, cli.refresh);
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn settings_layer_file_under_overrides() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        std::fs::write(&path, "cache_ttl: 10m\ntimeout: 3s\n").unwrap();

        let dispatcher = CommandDispatcher::new(
            Some(path),
            ConfigFile {
                cache_ttl: Some("2m".into()),
                ..Default::default()
            },
        );
        let settings = dispatcher.settings().unwrap();

        assert_eq!(settings.cache_ttl, Duration::from_secs(120));
        assert_eq!(settings.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dispatcher = CommandDispatcher::new(
            Some(Path::new("/nonexistent/ipweather.yml").to_path_buf()),
            ConfigFile::default(),
        );
        assert!(dispatcher.settings().is_err());
    }
}
