//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{
    CacheOptions, DEFAULT_CLEANUP_COOLDOWN_MS, DEFAULT_MAX_EXPIRED_BEFORE_FORCE,
    DEFAULT_QUEUE_GROWTH_FACTOR,
};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in milliseconds; `<= 0` disables expiry by default
    pub default_ttl_ms: i64,
    /// Reject values larger than this many bytes
    pub max_entry_bytes: Option<usize>,
    /// Minimum interval between expiration sweeps
    pub cleanup_cooldown_ms: u64,
    /// Expired backlog that forces a sweep
    pub max_expired_before_force: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Snowflake worker id of this instance
    pub worker_id: u16,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `MAX_ENTRY_BYTES` - Entry size limit (default: unlimited)
    /// - `CLEANUP_COOLDOWN_MS` - Sweep rate limit (default: 1000)
    /// - `MAX_EXPIRED_BEFORE_FORCE` - Backlog forcing a sweep (default: 100)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `WORKER_ID` - Snowflake worker id (default: 0)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            default_ttl_ms: env_or("DEFAULT_TTL_MS", defaults.default_ttl_ms),
            max_entry_bytes: env::var("MAX_ENTRY_BYTES")
                .ok()
                .and_then(|v| v.parse().ok()),
            cleanup_cooldown_ms: env_or("CLEANUP_COOLDOWN_MS", defaults.cleanup_cooldown_ms),
            max_expired_before_force: env_or(
                "MAX_EXPIRED_BEFORE_FORCE",
                defaults.max_expired_before_force,
            ),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            worker_id: env_or("WORKER_ID", defaults.worker_id),
        }
    }

    /// Cache options derived from this configuration.
    pub fn cache_options(&self) -> CacheOptions {
        CacheOptions {
            max_entry_bytes: self.max_entry_bytes,
            default_ttl_ms: Some(self.default_ttl_ms),
            cleanup_cooldown_ms: self.cleanup_cooldown_ms,
            max_expired_before_force: self.max_expired_before_force,
            queue_growth_factor: DEFAULT_QUEUE_GROWTH_FACTOR,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl_ms: 300_000,
            max_entry_bytes: None,
            cleanup_cooldown_ms: DEFAULT_CLEANUP_COOLDOWN_MS,
            max_expired_before_force: DEFAULT_MAX_EXPIRED_BEFORE_FORCE,
            server_port: 3000,
            worker_id: 0,
        }
    }
}
