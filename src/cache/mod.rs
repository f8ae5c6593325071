//! Cache module for storing the feed snapshot between runs
//!
//! The loader talks to the cache only through the [`TtlCache`] trait, so the
//! on-disk store used by the binary can be swapped for the in-memory one (or a
//! test double) without touching the cache-or-fetch logic. Entries carry an
//! expiry timestamp; expired entries are misses for [`TtlCache::get`] but can
//! still be recovered through [`TtlCache::get_stale`] when the network fails.

mod manager;
mod memory;

use std::time::Duration;

use thiserror::Error;

pub use manager::{CacheManager, CachedValue};
pub use memory::MemoryCache;

/// Errors that can occur when writing to a cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// Directory creation or file write failed
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The entry could not be encoded
    #[error("failed to encode cache entry: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value store whose entries expire a fixed time after writing.
pub trait TtlCache: Send + Sync {
    /// Returns the value stored under `key` if it exists and has not expired.
    fn get(&self, key: &str) -> Option<String>;

    /// Returns the value stored under `key` regardless of expiry.
    fn get_stale(&self, _key: &str) -> Option<String> {
        None
    }

    /// Stores `value` under `key`, replacing any previous entry. The entry
    /// expires `ttl` from now.
    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}

/// Computes the expiry instant for an entry written at `now`, saturating
/// instead of overflowing for absurd TTLs.
pub(crate) fn expiry_from(
    now: chrono::DateTime<chrono::Utc>,
    ttl: Duration,
) -> chrono::DateTime<chrono::Utc> {
    chrono::Duration::from_std(ttl)
        .ok()
        .and_then(|ttl| now.checked_add_signed(ttl))
        .unwrap_or(chrono::DateTime::<chrono::Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_expiry_adds_ttl() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let expires = expiry_from(now, Duration::from_secs(3600));
        assert_eq!(expires, Utc.with_ymd_and_hms(2024, 5, 1, 13, 0, 0).unwrap());
    }

    #[test]
    fn test_expiry_saturates_on_huge_ttl() {
        let now = Utc::now();
        let expires = expiry_from(now, Duration::from_secs(u64::MAX));
        assert_eq!(expires, chrono::DateTime::<Utc>::MAX_UTC);
    }
}
