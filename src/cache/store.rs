//! Cache Store Module
//!
//! Main cache engine: an ordered map for LRU recency, a deadline index for
//! TTL expiration, and cooperative sweeps folded into regular operations.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::cache::{
    estimate_size, CacheEntry, CacheOptions, CacheStats, Clock, ExpirationIndex, SystemClock,
};
use crate::error::ConfigError;

// == Bounded Cache ==
/// Fixed-capacity key/value store with LRU eviction and optional TTLs.
///
/// The backing map iterates oldest-access-first: every `get` and `set`
/// moves its key to the newest end, and eviction takes the front.
///
/// Expired entries are never visible to reads. Physical removal is lazy:
/// reads remove the entry they trip over, and a sweep rate-limited by
/// `cleanup_cooldown_ms` drains the head of the deadline queue.
///
/// All operations take `&mut self`. Sharing a cache between threads needs
/// an external lock around the whole value.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage in recency order
    entries: IndexMap<K, CacheEntry<V>>,
    /// Deadlines of expiring entries
    expirations: ExpirationIndex<K>,
    /// Activity counters
    stats: CacheStats,
    /// Tuning knobs
    options: CacheOptions,
    /// Maximum number of entries allowed
    capacity: usize,
    /// Time of the last sweep decision
    last_cleanup: u64,
    /// Time source
    clock: Arc<dyn Clock>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Serialize + Debug,
{
    // == Constructors ==
    /// Creates a cache with default options.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        Self::with_options(capacity, CacheOptions::default())
    }

    /// Creates a cache reading wall-clock time.
    pub fn with_options(capacity: usize, options: CacheOptions) -> Result<Self, ConfigError> {
        Self::with_clock(capacity, options, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit time source.
    ///
    /// # Errors
    /// `ConfigError::InvalidCapacity` when `capacity` is zero.
    pub fn with_clock(
        capacity: usize,
        options: CacheOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::InvalidCapacity(capacity));
        }

        Ok(Self {
            entries: IndexMap::new(),
            expirations: ExpirationIndex::new(),
            stats: CacheStats::new(),
            options,
            capacity,
            last_cleanup: 0,
            clock,
        })
    }

    // == Has ==
    /// Checks whether `key` holds a live entry.
    ///
    /// Does not change recency. An expired entry found here is removed.
    pub fn has<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        self.run_cleanup(now, false);

        let Some(index) = self.entries.get_index_of(key) else {
            return false;
        };

        if self.is_expired_index(index, now) {
            self.remove_expired_index(index);
            return false;
        }
        true
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Absent and expired keys return `None` and count as misses; an expired
    /// entry is removed on the spot.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        self.run_cleanup(now, false);

        let Some(index) = self.entries.get_index_of(key) else {
            self.stats.record_miss();
            return None;
        };

        if self.is_expired_index(index, now) {
            self.remove_expired_index(index);
            self.stats.record_miss();
            return None;
        }

        // Reinsert so the key lands at the newest end
        let (key, entry) = self.entries.shift_remove_index(index)?;
        let (index, _) = self.entries.insert_full(key, entry);
        self.stats.record_hit();

        self.entries.get_index(index).map(|(_, entry)| &entry.value)
    }

    // == Set ==
    /// Stores a key-value pair.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl_override_ms` - TTL for this entry; `None` uses the default,
    ///   `Some(ttl <= 0)` stores it without expiration
    ///
    /// # Returns
    /// `false` when the value exceeds `max_entry_bytes`. The cache is left
    /// untouched in that case.
    pub fn set(&mut self, key: K, value: V, ttl_override_ms: Option<i64>) -> bool {
        let now = self.clock.now_ms();
        let ttl_ms = self.options.resolve_ttl(ttl_override_ms);

        let size_bytes = match self.options.max_entry_bytes {
            Some(limit) => {
                let size = estimate_size(&value);
                if size > limit {
                    self.stats.record_rejection();
                    debug!(?key, size, limit, "rejecting oversized cache entry");
                    return false;
                }
                size
            }
            None => 0,
        };

        if self.entries.shift_remove(&key).is_some() {
            self.untrack(&key);
        } else if self.entries.len() >= self.capacity {
            // Capacity bounds live entries: drop the expired ones before
            // picking a live victim.
            if self.expirations.expired_count(now) > 0 {
                self.run_cleanup(now, true);
            }
            if self.entries.len() >= self.capacity {
                if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                    self.untrack(&evicted);
                    self.stats.record_eviction();
                    debug!(key = ?evicted, "evicted least recently used entry");
                }
            }
        }

        self.run_cleanup(now, false);

        let entry = CacheEntry::new(value, size_bytes, now, ttl_ms);
        if let Some(expires_at) = entry.expires_at {
            self.expirations.insert(key.clone(), expires_at);
        }
        self.entries.insert(key, entry);
        true
    }

    // == Delete ==
    /// Removes an entry by key, expired or not.
    ///
    /// Returns whether anything was removed.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.entries.shift_remove(key).is_some() {
            self.untrack(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Drops every entry and all expiration bookkeeping.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.expirations.clear();
    }

    // == Entries ==
    /// Iterates live entries from oldest to newest.
    ///
    /// Expired entries met during the walk are removed instead of yielded.
    /// Each call starts a fresh pass.
    pub fn entries(&mut self) -> Entries<'_, K, V>
    where
        V: Clone,
    {
        Entries {
            now: self.clock.now_ms(),
            position: 0,
            cache: self,
        }
    }

    // == Size ==
    /// Returns the number of live entries.
    pub fn size(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.run_cleanup(now, false);
        self.live_count(now)
    }

    // == Force Cleanup ==
    /// Sweeps expired entries regardless of cooldown and backlog, then
    /// reconciles the deadline index against the live map.
    ///
    /// Returns the number of entries removed.
    pub fn force_cleanup(&mut self) -> usize {
        let now = self.clock.now_ms();
        let removed = self.run_cleanup(now, true);

        let entries = &self.entries;
        self.expirations.reconcile(|key| entries.contains_key(key));
        removed
    }

    // == TTL Remaining ==
    /// Remaining lifetime of a live, expiring entry in milliseconds.
    ///
    /// Does not change recency. Returns `None` for absent, expired and
    /// non-expiring keys.
    pub fn ttl_remaining_ms<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .and_then(|entry| entry.ttl_remaining_ms(now))
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.live_count(self.clock.now_ms()));
        stats
    }

    // == Accessors ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internals ==
    /// Stored entries minus those already past their deadline.
    fn live_count(&self, now: u64) -> usize {
        self.entries
            .len()
            .saturating_sub(self.expirations.expired_count(now))
    }

    fn is_expired_index(&self, index: usize, now: u64) -> bool {
        self.entries
            .get_index(index)
            .is_some_and(|(_, entry)| entry.is_expired_at(now))
    }

    /// Removes an entry found expired on a read path.
    fn remove_expired_index(&mut self, index: usize) {
        if let Some((key, _)) = self.entries.shift_remove_index(index) {
            self.expirations.remove(&key);
            self.stats.record_expirations(1);
        }
    }

    /// Drops the deadline of a deleted, replaced or evicted entry.
    ///
    /// Forces a full reconciliation once the queue outgrows
    /// `queue_growth_factor` times the stored entry count.
    fn untrack<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.expirations.remove(key).is_none() {
            return;
        }

        let limit = self
            .options
            .queue_growth_factor
            .saturating_mul(self.entries.len().max(1));
        if self.expirations.queue_len() > limit {
            debug!(
                queue_len = self.expirations.queue_len(),
                limit, "expiration queue outgrew the cache, forcing cleanup"
            );
            self.force_cleanup();
        }
    }

    /// Lazy expiration sweep.
    ///
    /// Skipped while the cooldown runs, unless forced or the expired
    /// backlog reached `max_expired_before_force`. Returns the number of
    /// entries removed.
    fn run_cleanup(&mut self, now: u64, force: bool) -> usize {
        let expired = self.expirations.expired_count(now);
        let cooling_down = now.saturating_sub(self.last_cleanup) < self.options.cleanup_cooldown_ms;

        if !force && cooling_down && expired < self.options.max_expired_before_force {
            return 0;
        }

        self.last_cleanup = now;
        if expired == 0 {
            return 0;
        }

        let doomed: HashSet<K> = self.expirations.take_expired(expired).into_iter().collect();
        let before = self.entries.len();
        self.entries.retain(|key, _| !doomed.contains(key));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        debug!(
            removed,
            remaining = self.entries.len(),
            "swept expired cache entries"
        );
        removed
    }
}

// == Entries Iterator ==
/// Lazy walk over live entries, oldest first. Created by
/// [`BoundedCache::entries`].
///
/// Yields owned clones since the walk may remove expired entries between
/// items.
#[derive(Debug)]
pub struct Entries<'a, K, V> {
    cache: &'a mut BoundedCache<K, V>,
    position: usize,
    now: u64,
}

impl<K, V> Iterator for Entries<'_, K, V>
where
    K: Hash + Eq + Clone + Debug,
    V: Serialize + Debug + Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cache.is_expired_index(self.position, self.now) {
                self.cache.remove_expired_index(self.position);
                continue;
            }

            let (key, entry) = self.cache.entries.get_index(self.position)?;
            self.position += 1;
            return Some((key.clone(), entry.value.clone()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cache.entries.len().saturating_sub(self.position);
        (0, Some(remaining))
    }
}
