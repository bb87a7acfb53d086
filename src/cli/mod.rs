//! Command-line interface for ipweather.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, SettingsArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
