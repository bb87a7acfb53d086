//! Cache command implementation.
//!
//! Provides `ipweather cache show`, `ipweather cache clear` and
//! `ipweather cache path`.

use clap::{Args, Subcommand};

use crate::cache::{CacheKind, CacheStatus, CacheStore, EntryState};
use crate::config::{format_duration, Settings};
use crate::error::Result;
use crate::ui::{format_age, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// Arguments for the cache command.
#[derive(Debug, Clone, Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show both cache entries and whether they would be used.
    Show {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete both cache entries.
    Clear,
    /// Print the cache directory.
    Path,
}

/// The cache command implementation.
pub struct CacheCommand {
    store: CacheStore,
    args: CacheArgs,
}

impl CacheCommand {
    /// Create a new cache command.
    pub fn new(settings: Settings, args: CacheArgs) -> Self {
        Self {
            store: settings.cache_store(),
            args,
        }
    }
}

impl Command for CacheCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.command {
            CacheSubcommand::Show { json } => show_cache(&self.store, *json, ui)?,
            CacheSubcommand::Clear => clear_cache(&self.store, ui)?,
            CacheSubcommand::Path => ui.message(&self.store.dir().display().to_string()),
        }
        Ok(CommandResult::success())
    }
}

fn show_cache(store: &CacheStore, json: bool, ui: &mut dyn UserInterface) -> Result<()> {
    let statuses: Vec<CacheStatus> = CacheKind::ALL
        .iter()
        .map(|kind| store.inspect(*kind))
        .collect();

    if json {
        let output = serde_json::to_string_pretty(&statuses)
            .map_err(|e| anyhow::anyhow!("Failed to serialize cache status: {}", e))?;
        ui.message(&output);
        return Ok(());
    }

    ui.show_header(&format!(
        "Cache in {} (TTL {})",
        store.dir().display(),
        format_duration(store.ttl())
    ));
    for status in &statuses {
        ui.show_detail(status.kind.label(), &describe(status));
    }
    Ok(())
}

/// One-line summary of an entry, e.g. "fresh, 4 minutes ago, 312 bytes".
fn describe(status: &CacheStatus) -> String {
    let state = match status.state {
        EntryState::Missing => return "missing".to_string(),
        EntryState::Fresh => "fresh",
        EntryState::Expired => "expired",
        EntryState::Invalid => "invalid",
    };

    let mut parts = vec![state.to_string()];
    match status.age_secs {
        Some(secs) => parts.push(format_age(std::time::Duration::from_secs(secs))),
        None => parts.push("modified in the future".to_string()),
    }
    if let Some(size) = status.size_bytes {
        parts.push(format!("{} bytes", size));
    }
    parts.join(", ")
}

fn clear_cache(store: &CacheStore, ui: &mut dyn UserInterface) -> Result<()> {
    let removed = store.clear_all()?;
    match removed {
        0 => ui.message("Cache is already empty"),
        1 => ui.success("Removed 1 cache file"),
        n => ui.success(&format!("Removed {} cache files", n)),
    }
    Ok(())
}
