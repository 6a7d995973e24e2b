//! Expiring LRU - a bounded in-memory cache
//!
//! Fixed-capacity LRU eviction with per-entry TTLs and lazily amortized
//! expiration sweeps, plus a small HTTP front-end and a snowflake id
//! generator.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod id;
pub mod models;

pub use api::AppState;
pub use cache::{BoundedCache, CacheOptions};
pub use config::Config;
pub use error::ConfigError;
