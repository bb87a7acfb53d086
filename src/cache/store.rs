//! Cache storage implementation.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{DateTime, Utc};
use tempfile::{Builder, NamedTempFile};

use super::entry::{age_at, is_fresh, CacheEntry, CacheStatus, EntryState};
use super::kind::{CacheKind, CachedRecord};
use crate::error::{CacheWriteWarning, Result};
use crate::model::{GeolocationRecord, WeatherRecord};

/// Storage for cached provider responses.
#[derive(Debug, Clone)]
pub struct CacheStore {
    /// Directory holding the cache files.
    dir: PathBuf,
    /// Maximum age of a servable entry, shared by every kind.
    ttl: Duration,
}

impl CacheStore {
    /// Create a new cache store.
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    /// Get the cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get the file path for a kind.
    pub fn path(&self, kind: CacheKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Read a fresh, usable record.
    ///
    /// Every failure (missing, unreadable, expired, malformed, failed lookup)
    /// is a miss.
    pub fn read<T: CachedRecord>(&self) -> Option<CacheEntry<T>> {
        self.read_at(SystemTime::now())
    }

    /// Like [`read`](Self::read), evaluating freshness at `now`.
    pub fn read_at<T: CachedRecord>(&self, now: SystemTime) -> Option<CacheEntry<T>> {
        let kind = T::KIND;
        let path = self.path(kind);

        let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                tracing::debug!("No {} cache at {:?}: {}", kind, path, e);
                return None;
            }
        };

        let age = match age_at(modified, now) {
            Some(age) if is_fresh(age, self.ttl) => age,
            _ => {
                tracing::debug!("{} cache at {:?} has expired", kind, path);
                return None;
            }
        };

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!("Failed to read {} cache: {}", kind, e);
                return None;
            }
        };

        let record: T = match serde_json::from_slice(&bytes) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Ignoring malformed {} cache: {}", kind, e);
                return None;
            }
        };

        if !record.is_usable() {
            tracing::debug!("Ignoring unusable {} cache entry", kind);
            return None;
        }

        tracing::debug!("{} cache hit ({}s old)", kind, age.as_secs());
        Some(CacheEntry {
            record,
            path,
            modified,
            age,
        })
    }

    /// Persist raw response bytes for a kind.
    ///
    /// The bytes go to a temporary file in the cache directory which is then
    /// renamed over the target, so readers never see a partial file.
    pub fn write(
        &self,
        kind: CacheKind,
        bytes: &[u8],
    ) -> std::result::Result<PathBuf, CacheWriteWarning> {
        let path = self.path(kind);
        self.write_atomic(&path, bytes)
            .map_err(|e| CacheWriteWarning {
                path: path.clone(),
                message: e.to_string(),
            })?;
        tracing::debug!("Wrote {} bytes to {} cache", bytes.len(), kind);
        Ok(path)
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut file = self.temp_file()?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// A temporary file next to the entries, readable by other users like
    /// any ordinary file so a shared cache directory keeps working.
    fn temp_file(&self) -> io::Result<NamedTempFile> {
        let mut builder = Builder::new();
        builder.prefix(".ipweather-");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
        builder.tempfile_in(&self.dir)
    }

    /// Remove the file for a kind. Returns whether a file was removed.
    pub fn clear(&self, kind: CacheKind) -> io::Result<bool> {
        match fs::remove_file(self.path(kind)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Remove every cache file. Returns how many files were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for kind in CacheKind::ALL {
            if self.clear(kind)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Describe the file for a kind without serving it.
    pub fn inspect(&self, kind: CacheKind) -> CacheStatus {
        self.inspect_at(kind, SystemTime::now())
    }

    /// Like [`inspect`](Self::inspect), evaluating freshness at `now`.
    pub fn inspect_at(&self, kind: CacheKind, now: SystemTime) -> CacheStatus {
        let path = self.path(kind);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(_) => return CacheStatus::missing(kind, path),
        };

        let modified = metadata.modified().ok();
        let age = modified.and_then(|m| age_at(m, now));

        let state = match age {
            Some(age) if is_fresh(age, self.ttl) => {
                let usable = fs::read(&path)
                    .map(|bytes| decodes_usable(kind, &bytes))
                    .unwrap_or(false);
                if usable {
                    EntryState::Fresh
                } else {
                    EntryState::Invalid
                }
            }
            _ => EntryState::Expired,
        };

        CacheStatus {
            kind,
            path,
            state,
            cached_at: modified.map(DateTime::<Utc>::from),
            age_secs: age.map(|a| a.as_secs()),
            size_bytes: Some(metadata.len()),
        }
    }
}

fn decodes_usable(kind: CacheKind, bytes: &[u8]) -> bool {
    fn usable<T: CachedRecord>(bytes: &[u8]) -> bool {
        serde_json::from_slice::<T>(bytes)
            .map(|record| record.is_usable())
            .unwrap_or(false)
    }

    match kind {
        CacheKind::Geolocation => usable::<GeolocationRecord>(bytes),
        CacheKind::Weather => usable::<WeatherRecord>(bytes),
    }
}
