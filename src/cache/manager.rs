//! File-backed cache for the feed snapshot
//!
//! Provides a `CacheManager` that stores string values in JSON files with
//! expiry timestamps, one file per key.

use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use super::{expiry_from, CacheError, TtlCache};

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// The cached value
    value: String,
    /// When the value was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry expires
    expires_at: DateTime<Utc>,
}

/// Result of reading from cache, including metadata about cache freshness
#[derive(Debug)]
pub struct CachedValue {
    /// The cached value
    pub value: String,
    /// When the value was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the cache entry has expired
    pub is_expired: bool,
}

/// Manages reading and writing cached values to disk
///
/// Values are stored as JSON files in an XDG-compliant cache directory
/// (`~/.cache/workoutfeed/` on Linux). Each entry includes an expiry
/// timestamp; expired entries are still readable through [`CacheManager::read`]
/// with `is_expired = true`.
#[derive(Debug, Clone)]
pub struct CacheManager {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
}

impl CacheManager {
    /// Creates a new CacheManager using XDG-compliant cache directory
    ///
    /// Returns `None` if the cache directory cannot be determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        Self::default_dir().map(|cache_dir| Self { cache_dir })
    }

    /// Returns the default cache directory for this application, if any
    pub fn default_dir() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "workoutfeed")?;
        Some(project_dirs.cache_dir().to_path_buf())
    }

    /// Creates a new CacheManager with a custom cache directory
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Directory where cache files are stored
    pub fn dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes a value to the cache, expiring `ttl` from now
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation, encoding or file writing fails
    pub fn write(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.ensure_dir()?;

        let now = Utc::now();
        let entry = CacheEntry {
            value: value.to_string(),
            cached_at: now,
            expires_at: expiry_from(now, ttl),
        };

        let json = serde_json::to_string_pretty(&entry)?;
        fs::write(self.cache_path(key), json)?;
        debug!(key, expires_at = %entry.expires_at, "cache entry written");
        Ok(())
    }

    /// Reads a value from the cache
    ///
    /// Returns `None` if the cache entry doesn't exist or cannot be parsed.
    /// Returns `Some(CachedValue)` with `is_expired = true` if the entry exists
    /// but has expired.
    pub fn read(&self, key: &str) -> Option<CachedValue> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(error) => {
                warn!(key, path = %path.display(), %error, "ignoring corrupt cache entry");
                return None;
            }
        };

        let is_expired = Utc::now() >= entry.expires_at;

        Some(CachedValue {
            value: entry.value,
            cached_at: entry.cached_at,
            is_expired,
        })
    }
}

impl TtlCache for CacheManager {
    fn get(&self, key: &str) -> Option<String> {
        self.read(key)
            .filter(|cached| !cached.is_expired)
            .map(|cached| cached.value)
    }

    fn get_stale(&self, key: &str) -> Option<String> {
        self.read(key).map(|cached| cached.value)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.write(key, value, ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    fn create_test_cache() -> (CacheManager, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheManager::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    #[test]
    fn test_write_creates_file_in_cache_directory() {
        let (cache, temp_dir) = create_test_cache();

        cache
            .write("items", r#"[{"id":1}]"#, HOUR)
            .expect("Write should succeed");

        let expected_path = temp_dir.path().join("items.json");
        assert!(expected_path.exists(), "Cache file should exist");

        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"value\""));
        assert!(content.contains("\"expires_at\""));
    }

    #[test]
    fn test_read_returns_none_for_missing_key() {
        let (cache, _temp_dir) = create_test_cache();

        assert!(cache.read("nonexistent_key").is_none());
        assert!(cache.get("nonexistent_key").is_none());
    }

    #[test]
    fn test_fresh_entry_is_a_hit() {
        let (cache, _temp_dir) = create_test_cache();

        cache.set("items", "[]", HOUR).expect("Write should succeed");

        let cached = cache.read("items").expect("Should read fresh cache");
        assert_eq!(cached.value, "[]");
        assert!(!cached.is_expired, "Fresh cache should not be expired");
        assert_eq!(cache.get("items").as_deref(), Some("[]"));
    }

    #[test]
    fn test_zero_ttl_entry_is_expired_but_stale_readable() {
        let (cache, _temp_dir) = create_test_cache();

        cache
            .set("items", "[1,2]", Duration::ZERO)
            .expect("Write should succeed");

        let cached = cache.read("items").expect("Should read expired cache");
        assert!(cached.is_expired, "Cache with 0 TTL should be expired");
        assert!(cache.get("items").is_none(), "Expired entry must be a miss");
        assert_eq!(cache.get_stale("items").as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_corrupt_file_is_a_miss() {
        let (cache, temp_dir) = create_test_cache();
        fs::write(temp_dir.path().join("items.json"), "{not json").unwrap();

        assert!(cache.read("items").is_none());
        assert!(cache.get_stale("items").is_none());
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache").join("dir");
        let cache = CacheManager::with_dir(nested_path.clone());

        cache.write("items", "[]", HOUR).expect("Write should succeed");

        assert!(nested_path.join("items.json").exists(), "Cache file should exist");
    }

    #[test]
    fn test_cached_at_timestamp_is_recorded() {
        let (cache, _temp_dir) = create_test_cache();

        let before = Utc::now();
        cache.write("items", "[]", HOUR).expect("Write should succeed");
        let after = Utc::now();

        let cached = cache.read("items").expect("Should read cache");
        assert!(cached.cached_at >= before);
        assert!(cached.cached_at <= after);
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(cache) = CacheManager::new() {
            let path_str = cache.dir().to_string_lossy();
            assert!(path_str.contains("workoutfeed"));
        }
        // Passes when no home directory is available (e.g. CI)
    }

    #[test]
    fn test_overwrite_existing_entry() {
        let (cache, _temp_dir) = create_test_cache();

        cache.set("items", "first", HOUR).unwrap();
        cache.set("items", "second", HOUR).unwrap();

        assert_eq!(cache.get("items").as_deref(), Some("second"));
    }
}
