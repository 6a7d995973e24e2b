//! Expiration Index Module
//!
//! Tracks entry deadlines for lazy expiration sweeps.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

// == Expiration Index ==
/// Sorted deadline queue plus a per-key lookup map.
///
/// - `queue` holds `(expires_at, key)` sorted ascending by deadline; keys
///   with equal deadlines keep insertion order
/// - `deadlines` is authoritative: a queue record whose deadline does not
///   match the lookup map is stale and gets dropped on the next sweep
///
/// Keys that never expire are not tracked here.
#[derive(Debug)]
pub struct ExpirationIndex<K> {
    queue: Vec<(u64, K)>,
    deadlines: HashMap<K, u64>,
}

impl<K> Default for ExpirationIndex<K> {
    fn default() -> Self {
        Self {
            queue: Vec::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> ExpirationIndex<K> {
    // == Constructor ==
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Records `key` as expiring at `expires_at`.
    ///
    /// The position is found by binary search. A previous record for the
    /// same key is replaced.
    pub fn insert(&mut self, key: K, expires_at: u64) {
        if let Some(previous) = self.deadlines.insert(key.clone(), expires_at) {
            self.splice_out(&key, previous);
        }
        let pos = self.queue.partition_point(|(t, _)| *t <= expires_at);
        self.queue.insert(pos, (expires_at, key));
    }

    // == Remove ==
    /// Forgets `key`, returning the deadline it had.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expires_at = self.deadlines.remove(key)?;
        self.splice_out(key, expires_at);
        Some(expires_at)
    }

    /// Removes the queue record `(expires_at, key)` if present.
    ///
    /// Only the run of records sharing `expires_at` is scanned.
    fn splice_out<Q>(&mut self, key: &Q, expires_at: u64) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let start = self.queue.partition_point(|(t, _)| *t < expires_at);
        let found = self.queue[start..]
            .iter()
            .take_while(|(t, _)| *t == expires_at)
            .position(|(_, k)| <K as Borrow<Q>>::borrow(k) == key);

        match found {
            Some(offset) => {
                self.queue.remove(start + offset);
                true
            }
            None => false,
        }
    }

    // == Expired Count ==
    /// Counts queue records at the head with `expires_at <= now`.
    pub fn expired_count(&self, now: u64) -> usize {
        self.queue.partition_point(|(t, _)| *t <= now)
    }

    // == Take Expired ==
    /// Removes the first `count` queue records and returns the keys whose
    /// lookup record still matches, i.e. the entries that must leave the
    /// cache.
    ///
    /// When the whole queue is expired both structures are reset in one
    /// go. Otherwise the remaining queue is rebuilt without stale records.
    pub fn take_expired(&mut self, count: usize) -> Vec<K> {
        let count = count.min(self.queue.len());
        if count == 0 {
            return Vec::new();
        }

        if count == self.queue.len() {
            let queue = std::mem::take(&mut self.queue);
            let deadlines = std::mem::take(&mut self.deadlines);
            return queue
                .into_iter()
                .filter(|(t, k)| deadlines.get(k) == Some(t))
                .map(|(_, k)| k)
                .collect();
        }

        let mut expired = Vec::with_capacity(count);
        for (t, key) in self.queue.drain(..count) {
            if self.deadlines.get(&key) == Some(&t) {
                self.deadlines.remove(&key);
                expired.push(key);
            }
        }

        let deadlines = &self.deadlines;
        self.queue.retain(|(t, k)| deadlines.get(k) == Some(t));
        expired
    }

    // == Reconcile ==
    /// Drops lookup records for keys that are no longer live, then every
    /// queue record that no longer matches the lookup map.
    pub fn reconcile<F>(&mut self, mut is_live: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.deadlines.retain(|k, _| is_live(k));
        let deadlines = &self.deadlines;
        self.queue.retain(|(t, k)| deadlines.get(k) == Some(t));
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.queue.clear();
        self.deadlines.clear();
    }

    // == Accessors ==
    /// Returns the recorded deadline for `key`.
    #[cfg(test)]
    pub(crate) fn deadline<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.deadlines.get(key).copied()
    }

    /// Returns the earliest deadline in the queue.
    #[cfg(test)]
    pub(crate) fn next_expiry(&self) -> Option<u64> {
        self.queue.first().map(|(t, _)| *t)
    }

    /// Number of queue records, stale ones included.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of tracked keys.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.deadlines.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
