//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction and lazily swept
//! TTL expiration.

mod clock;
mod entry;
mod expiry;
mod options;
mod size;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use expiry::ExpirationIndex;
pub use options::{
    CacheOptions, DEFAULT_CLEANUP_COOLDOWN_MS, DEFAULT_MAX_EXPIRED_BEFORE_FORCE,
    DEFAULT_QUEUE_GROWTH_FACTOR,
};
pub use size::estimate_size;
pub use stats::CacheStats;
pub use store::{BoundedCache, Entries};
