//! Command-line interface parsing for the workout feed viewer
//!
//! This module handles parsing of CLI arguments using clap and validating them
//! into the `StartupConfig` the application is built from.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use thiserror::Error;

use crate::cache::CacheManager;
use crate::loader::{DEFAULT_FEED_URL, DEFAULT_TIMEOUT, DEFAULT_TTL};
use crate::sort::SortKey;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified sort key is not recognized
    #[error(transparent)]
    InvalidSortKey(#[from] crate::sort::ParseSortKeyError),

    /// The feed URL cannot be parsed
    #[error("Invalid feed URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// A zero timeout would fail every request
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// Workout feed viewer - browse the feed sorted by date, kudos or level
#[derive(Parser, Debug)]
#[command(name = "workoutfeed")]
#[command(about = "Browse the workout feed sorted by date, kudos or level")]
#[command(version)]
pub struct Cli {
    /// Initial sort key: created, kudos or level
    #[arg(long, value_name = "KEY", default_value = "created")]
    pub sort: String,

    /// Feed endpoint to fetch from
    #[arg(long, value_name = "URL", default_value = DEFAULT_FEED_URL)]
    pub url: String,

    /// How long a fetched feed stays cached, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TTL.as_secs())]
    pub ttl: u64,

    /// HTTP request timeout, in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// Keep the feed cache in memory only; the feed is not cached on disk
    #[arg(long)]
    pub no_cache: bool,

    /// Ignore a cached feed and fetch a fresh one
    #[arg(long)]
    pub refresh: bool,

    /// Directory for the on-disk cache
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// File to write logs to
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// Sort key selected when the list first appears
    pub initial_sort: SortKey,
    /// Feed endpoint
    pub feed_url: String,
    /// TTL applied when the snapshot is written
    pub cache_ttl: Duration,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Whether the cache is persisted to disk
    pub persistent_cache: bool,
    /// Whether a fresh cache entry is ignored
    pub force_refresh: bool,
    /// Cache directory; `None` means the platform default
    pub cache_dir: Option<PathBuf>,
    /// Log file; `None` means `<cache dir>/workoutfeed.log`
    pub log_file: Option<PathBuf>,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_sort: SortKey::default(),
            feed_url: DEFAULT_FEED_URL.to_string(),
            cache_ttl: DEFAULT_TTL,
            request_timeout: DEFAULT_TIMEOUT,
            persistent_cache: true,
            force_refresh: false,
            cache_dir: None,
            log_file: None,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if a value is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_sort = cli.sort.parse::<SortKey>()?;

        Url::parse(&cli.url).map_err(|e| CliError::InvalidUrl {
            url: cli.url.clone(),
            reason: e.to_string(),
        })?;

        if cli.timeout == 0 {
            return Err(CliError::InvalidTimeout);
        }

        Ok(StartupConfig {
            initial_sort,
            feed_url: cli.url.clone(),
            cache_ttl: Duration::from_secs(cli.ttl),
            request_timeout: Duration::from_secs(cli.timeout),
            persistent_cache: !cli.no_cache,
            force_refresh: cli.refresh,
            cache_dir: cli.cache_dir.clone(),
            log_file: cli.log_file.clone(),
        })
    }

    /// Cache directory to use, if one can be determined
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        self.cache_dir.clone().or_else(CacheManager::default_dir)
    }

    /// Log file to use, if one can be determined
    pub fn resolved_log_file(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            self.resolved_cache_dir()
                .map(|dir| dir.join("workoutfeed.log"))
        })
    }
}
