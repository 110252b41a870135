//! Command-line and environment configuration.
//!
//! Every setting can be given as a flag or through its environment variable.
//! [`Cli::into_config`] validates the raw values once at startup.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use url::Url;

/// Venues - Look up venues near a location, with a cache in front of the provider
#[derive(Parser, Debug, Clone)]
#[command(name = "venues")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "80", env = "PORT")]
    pub port: u16,

    /// Log filter directive (e.g. "info" or "venues=debug,tower_http=info")
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json, env = "LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Base URL of the venue provider API
    #[arg(long, env = "VENUES_BASE_URL")]
    pub venues_base_url: String,

    /// Client id sent to the venue provider
    #[arg(long, env = "VENUES_CLIENT_ID")]
    pub venues_client_id: String,

    /// Client secret sent to the venue provider
    #[arg(long, env = "VENUES_SECRET", hide_env_values = true)]
    pub venues_secret: String,

    /// Timeout for a single request to the venue provider, in seconds
    #[arg(long, default_value = "30", env = "UPSTREAM_TIMEOUT_SECS")]
    pub upstream_timeout_secs: u64,

    /// Redis URL. When unset the in-process cache is used
    #[arg(long, env = "REDIS_URL")]
    pub redis_url: Option<String>,

    /// Redis password, if not part of the URL
    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    pub redis_password: Option<String>,

    /// Timeout for a single Redis operation, in milliseconds
    #[arg(long, default_value = "500", env = "REDIS_TIMEOUT_MS")]
    pub redis_timeout_ms: u64,

    /// How long a cached lookup stays valid, in seconds
    #[arg(long, default_value = "86400", env = "CACHE_TTL_SECS")]
    pub cache_ttl_secs: u64,

    /// How often the in-process cache sweeps expired entries, in seconds
    #[arg(long, default_value = "600", env = "CACHE_CLEANUP_INTERVAL_SECS")]
    pub cache_cleanup_interval_secs: u64,

    /// Maximum number of entries held by the in-process cache
    #[arg(long, default_value = "10000", env = "CACHE_MAX_ENTRIES")]
    pub cache_max_entries: usize,

    /// What to do when the cache backend cannot be reached
    #[arg(long, value_enum, default_value_t = CacheFailurePolicy::Degrade, env = "CACHE_FAILURE_POLICY")]
    pub cache_failure_policy: CacheFailurePolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// How a service reacts when a cache read fails because the backend is
/// unreachable. A plain miss is never affected by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CacheFailurePolicy {
    /// Log and fall through to the upstream call.
    #[default]
    Degrade,
    /// Fail the request with `upstream_unavailable`.
    FailFast,
}

/// Cache backend selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Memory {
        cleanup_interval: Duration,
        max_entries: usize,
    },
    Redis {
        url: String,
        password: Option<String>,
        op_timeout: Duration,
    },
}

/// Validated application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub venues_base_url: Url,
    pub venues_client_id: String,
    pub venues_secret: String,
    pub upstream_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_backend: CacheBackend,
    pub cache_failure_policy: CacheFailurePolicy,
}

/// Errors found while validating configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    MustBePositive(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("invalid venue provider URL: {0}")]
    InvalidUrl(String),
}

impl Cli {
    /// Validates the raw settings into a [`Config`].
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let venues_base_url = Url::parse(&self.venues_base_url)
            .map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
        if self.venues_client_id.trim().is_empty() {
            return Err(ConfigError::Empty("venues client id"));
        }
        if self.venues_secret.trim().is_empty() {
            return Err(ConfigError::Empty("venues secret"));
        }

        let upstream_timeout = positive_secs(self.upstream_timeout_secs, "upstream timeout")?;
        let cache_ttl = positive_secs(self.cache_ttl_secs, "cache ttl")?;

        let cache_backend = match self.redis_url.filter(|url| !url.trim().is_empty()) {
            Some(url) => CacheBackend::Redis {
                url,
                password: self.redis_password.filter(|p| !p.is_empty()),
                op_timeout: positive_millis(self.redis_timeout_ms, "redis timeout")?,
            },
            None => {
                if self.cache_max_entries == 0 {
                    return Err(ConfigError::MustBePositive("cache max entries"));
                }
                CacheBackend::Memory {
                    cleanup_interval: positive_secs(
                        self.cache_cleanup_interval_secs,
                        "cache cleanup interval",
                    )?,
                    max_entries: self.cache_max_entries,
                }
            }
        };

        Ok(Config {
            venues_base_url,
            venues_client_id: self.venues_client_id,
            venues_secret: self.venues_secret,
            upstream_timeout,
            cache_ttl,
            cache_backend,
            cache_failure_policy: self.cache_failure_policy,
        })
    }
}

fn positive_secs(value: u64, name: &'static str) -> Result<Duration, ConfigError> {
    if value == 0 {
        return Err(ConfigError::MustBePositive(name));
    }
    Ok(Duration::from_secs(value))
}

fn positive_millis(value: u64, name: &'static str) -> Result<Duration, ConfigError> {
    if value == 0 {
        return Err(ConfigError::MustBePositive(name));
    }
    Ok(Duration::from_millis(value))
}
