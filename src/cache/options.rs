//! Cache Options Module
//!
//! Tuning knobs accepted by `BoundedCache::with_options`.

// == Defaults ==
/// Minimum interval between two expiration sweeps
pub const DEFAULT_CLEANUP_COOLDOWN_MS: u64 = 1000;

/// Number of expired entries that forces a sweep during the cooldown
pub const DEFAULT_MAX_EXPIRED_BEFORE_FORCE: usize = 100;

/// Multiple of the live entry count the deadline queue may reach before a
/// forced reconciliation
pub const DEFAULT_QUEUE_GROWTH_FACTOR: usize = 2;

// == Cache Options ==
/// Optional cache settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheOptions {
    /// Values whose estimated size exceeds this are not stored
    pub max_entry_bytes: Option<usize>,
    /// TTL applied when `set` gets no override; `<= 0` means no expiration
    pub default_ttl_ms: Option<i64>,
    /// Rate limit for expiration sweeps
    pub cleanup_cooldown_ms: u64,
    /// Expired backlog that bypasses the cooldown
    pub max_expired_before_force: usize,
    /// Queue growth multiplier that triggers `force_cleanup`
    pub queue_growth_factor: usize,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            max_entry_bytes: None,
            default_ttl_ms: None,
            cleanup_cooldown_ms: DEFAULT_CLEANUP_COOLDOWN_MS,
            max_expired_before_force: DEFAULT_MAX_EXPIRED_BEFORE_FORCE,
            queue_growth_factor: DEFAULT_QUEUE_GROWTH_FACTOR,
        }
    }
}

impl CacheOptions {
    pub fn with_max_entry_bytes(mut self, bytes: usize) -> Self {
        self.max_entry_bytes = Some(bytes);
        self
    }

    pub fn with_default_ttl_ms(mut self, ttl_ms: i64) -> Self {
        self.default_ttl_ms = Some(ttl_ms);
        self
    }

    pub fn with_cleanup_cooldown_ms(mut self, cooldown_ms: u64) -> Self {
        self.cleanup_cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_max_expired_before_force(mut self, count: usize) -> Self {
        self.max_expired_before_force = count;
        self
    }

    pub fn with_queue_growth_factor(mut self, factor: usize) -> Self {
        self.queue_growth_factor = factor;
        self
    }

    /// Resolves the TTL for a `set` call.
    ///
    /// An explicit override wins over the default, and any resolved value
    /// `<= 0` means the entry never expires.
    pub fn resolve_ttl(&self, override_ms: Option<i64>) -> Option<u64> {
        override_ms
            .or(self.default_ttl_ms)
            .filter(|ttl| *ttl > 0)
            .map(|ttl| ttl as u64)
    }
}
