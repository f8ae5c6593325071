//! In-process TTL cache, used by `--no-cache` runs and tests

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{expiry_from, CacheError, TtlCache};

/// A `TtlCache` that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, DateTime<Utc>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lookup(&self, key: &str) -> Option<(String, DateTime<Utc>)> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned()
    }
}

impl TtlCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.lookup(key)
            .filter(|(_, expires_at)| Utc::now() < *expires_at)
            .map(|(value, _)| value)
    }

    fn get_stale(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|(value, _)| value)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = expiry_from(Utc::now(), ttl);
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), (value.to_string(), expires_at));
        Ok(())
    }
}
