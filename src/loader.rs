//! Cache-or-fetch loading of the workout feed
//!
//! The loader first looks for a fresh snapshot in the TTL cache. On a miss it
//! issues a single GET to the feed endpoint, parses the body and writes the
//! snapshot back with a fresh TTL. [`LoadHandle`] runs a load in the
//! background and discards its result if the handle is dropped first.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::cache::{CacheError, TtlCache};
use crate::feed::{parse_items, snapshot, Item};

/// Key the feed snapshot is stored under
pub const CACHE_KEY: &str = "items";

/// How long a cached snapshot stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Feed endpoint used when none is configured
pub const DEFAULT_FEED_URL: &str = "https://api.workoutme.app/api/feed/get/";

/// Per-request timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when loading the feed
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request failed (connection, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Feed endpoint returned {0}")]
    Status(StatusCode),

    /// The body is not a list of feed items
    #[error("Failed to parse feed: {0}")]
    Parse(#[from] serde_json::Error),

    /// The load was dropped before it produced a result
    #[error("Load was cancelled")]
    Cancelled,
}

/// Client for the feed endpoint
#[derive(Debug, Clone)]
pub struct FeedClient {
    /// HTTP client for making requests
    http_client: Client,
    /// Feed endpoint
    url: String,
}

impl FeedClient {
    /// Creates a client for `url` whose requests give up after `timeout`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches and parses the full feed
    pub async fn fetch_items(&self) -> Result<Vec<Item>, FeedError> {
        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        let body = response.text().await?;
        Ok(parse_items(&body)?)
    }
}

/// Where a loaded collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Fresh cache entry
    Cache,
    /// Network fetch
    Network,
    /// Expired cache entry, used because the fetch failed
    StaleCache,
}

impl LoadSource {
    pub fn label(self) -> &'static str {
        match self {
            LoadSource::Cache => "cache",
            LoadSource::Network => "network",
            LoadSource::StaleCache => "stale cache",
        }
    }
}

/// A successfully loaded collection
#[derive(Debug, Clone)]
pub struct Loaded {
    pub items: Vec<Item>,
    pub source: LoadSource,
}

/// Produces the item collection from the cache or the network
#[derive(Clone)]
pub struct Loader {
    client: FeedClient,
    cache: Arc<dyn TtlCache>,
    ttl: Duration,
    skip_cache_read: bool,
}

impl Loader {
    pub fn new(client: FeedClient, cache: Arc<dyn TtlCache>) -> Self {
        Self {
            client,
            cache,
            ttl: DEFAULT_TTL,
            skip_cache_read: false,
        }
    }

    /// Sets the TTL applied when the snapshot is written
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// When set, a fresh cache entry is ignored and the feed is always fetched
    pub fn skip_cache_read(mut self, skip: bool) -> Self {
        self.skip_cache_read = skip;
        self
    }

    /// Loads the collection
    ///
    /// # Behavior
    /// - A fresh cache entry is returned without touching the network
    /// - Otherwise the feed is fetched once and the snapshot is written back
    /// - If the fetch fails and an expired entry exists, the expired entry is returned
    /// - A failed cache write is logged and does not fail the load
    pub async fn load(&self) -> Result<Loaded, FeedError> {
        if !self.skip_cache_read {
            if let Some(items) = self.read_cached(|cache| cache.get(CACHE_KEY)) {
                info!(count = items.len(), "feed loaded from cache");
                return Ok(Loaded {
                    items,
                    source: LoadSource::Cache,
                });
            }
            debug!(key = CACHE_KEY, "cache miss");
        }

        info!(url = self.client.url(), "fetching feed");
        match self.client.fetch_items().await {
            Ok(items) => {
                info!(count = items.len(), "feed fetched");
                self.store(&items);
                Ok(Loaded {
                    items,
                    source: LoadSource::Network,
                })
            }
            Err(error) => {
                warn!(url = self.client.url(), %error, "feed fetch failed");
                if let Some(items) = self.read_cached(|cache| cache.get_stale(CACHE_KEY)) {
                    info!(count = items.len(), "falling back to expired cache entry");
                    return Ok(Loaded {
                        items,
                        source: LoadSource::StaleCache,
                    });
                }
                Err(error)
            }
        }
    }

    fn read_cached(&self, read: impl FnOnce(&dyn TtlCache) -> Option<String>) -> Option<Vec<Item>> {
        let raw = read(self.cache.as_ref())?;
        match parse_items(&raw) {
            Ok(items) => Some(items),
            Err(error) => {
                warn!(key = CACHE_KEY, %error, "cached feed is unreadable, treating as miss");
                None
            }
        }
    }

    fn store(&self, items: &[Item]) {
        let written = snapshot(items)
            .map_err(CacheError::from)
            .and_then(|json| self.cache.set(CACHE_KEY, &json, self.ttl));
        if let Err(error) = written {
            warn!(key = CACHE_KEY, %error, "failed to write feed to cache");
        }
    }
}

/// A load running in the background
///
/// Dropping the handle aborts the load; a result that arrives afterwards is
/// never observed.
pub struct LoadHandle {
    receiver: oneshot::Receiver<Result<Loaded, FeedError>>,
    task: JoinHandle<()>,
}

impl LoadHandle {
    /// Spawns `loader.load()` on the current tokio runtime
    pub fn spawn(loader: Loader) -> Self {
        let (sender, receiver) = oneshot::channel();
        let task = tokio::spawn(async move {
            let result = loader.load().await;
            if sender.send(result).is_err() {
                debug!("load finished after its handle was dropped, result discarded");
            }
        });
        Self { receiver, task }
    }

    /// Returns the result if the load has finished, without blocking
    pub fn try_take(&mut self) -> Option<Result<Loaded, FeedError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(FeedError::Cancelled)),
        }
    }

    /// Waits for the load to finish
    pub async fn wait(mut self) -> Result<Loaded, FeedError> {
        (&mut self.receiver)
            .await
            .unwrap_or(Err(FeedError::Cancelled))
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        if !self.task.is_finished() {
            debug!("cancelling pending feed load");
        }
        self.task.abort();
    }
}
