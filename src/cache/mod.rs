//! Time-boxed file cache for provider responses.
//!
//! Each [`CacheKind`] maps to one fixed file holding the raw JSON body the
//! provider returned. There is no envelope and no stored expiry: freshness is
//! derived from the file's modification time on every read and compared to a
//! single TTL shared by both kinds.

pub mod entry;
pub mod kind;
pub mod store;

pub use entry::{CacheEntry, CacheStatus, EntryState};
pub use kind::{CacheKind, CachedRecord};
pub use store::CacheStore;

use std::path::PathBuf;
use std::time::Duration;

/// TTL used when nothing else is configured.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Get the default cache directory (the platform temp dir).
pub fn default_cache_dir() -> PathBuf {
    std::env::temp_dir()
}
