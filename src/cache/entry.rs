//! Cache entry and status types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use super::CacheKind;

/// A record served from the cache.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The decoded record.
    pub record: T,
    /// File the record was read from.
    pub path: PathBuf,
    /// Last write time of the file.
    pub modified: SystemTime,
    /// Age at the time of the read.
    pub age: Duration,
}

/// Age of a file written at `modified`, seen from `now`.
///
/// Returns `None` for modification times in the future, whose age cannot be
/// established.
pub fn age_at(modified: SystemTime, now: SystemTime) -> Option<Duration> {
    now.duration_since(modified).ok()
}

/// An entry is fresh while strictly younger than the TTL.
pub fn is_fresh(age: Duration, ttl: Duration) -> bool {
    age < ttl
}

/// State of a cache file as seen by `inspect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    /// No file.
    Missing,
    /// Younger than the TTL and decodes to a usable record.
    Fresh,
    /// Older than the TTL (or timestamped in the future).
    Expired,
    /// Young enough, but unreadable, malformed, or a failed lookup.
    Invalid,
}

/// Snapshot of one cache file.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub kind: CacheKind,
    pub path: PathBuf,
    pub state: EntryState,
    pub cached_at: Option<DateTime<Utc>>,
    pub age_secs: Option<u64>,
    pub size_bytes: Option<u64>,
}

impl CacheStatus {
    pub(crate) fn missing(kind: CacheKind, path: PathBuf) -> Self {
        Self {
            kind,
            path,
            state: EntryState::Missing,
            cached_at: None,
            age_secs: None,
            size_bytes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_of_past_write() {
        let now = SystemTime::now();
        let written = now - Duration::from_secs(90);
        assert_eq!(age_at(written, now), Some(Duration::from_secs(90)));
    }

    #[test]
    fn future_write_has_no_age() {
        let now = SystemTime::now();
        let written = now + Duration::from_secs(5);
        assert_eq!(age_at(written, now), None);
    }

    #[test]
    fn fresh_is_strictly_below_ttl() {
        let ttl = Duration::from_secs(60);
        assert!(is_fresh(Duration::from_secs(59), ttl));
        assert!(!is_fresh(Duration::from_secs(60), ttl));
        assert!(!is_fresh(Duration::from_secs(61), ttl));
    }
}
