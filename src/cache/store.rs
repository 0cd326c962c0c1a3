//! Cache Store Module
//!
//! Single-threaded entry map behind the `TimedCache` lock.

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

use crate::cache::{CacheEntry, CacheStats};

// == Cache Store ==
/// Key to payload storage with hit, miss and reap accounting.
///
/// Not synchronized on its own; `TimedCache` wraps it in a mutex.
#[derive(Debug, Default)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Insert ==
    /// Stores a payload under `key`, stamped with the current time.
    ///
    /// An existing entry is replaced outright, timestamp included.
    pub fn insert(&mut self, key: String, value: Bytes) {
        self.insert_at(key, value, Instant::now());
    }

    /// Stores a payload under `key` with an explicit insertion time.
    pub fn insert_at(&mut self, key: String, value: Bytes, created_at: Instant) {
        self.entries.insert(key, CacheEntry::with_created_at(value, created_at));
    }

    // == Get ==
    /// Returns the payload for `key` if present.
    ///
    /// Age is not checked here; only `remove_expired` drops entries.
    pub fn get(&mut self, key: &str) -> Option<Bytes> {
        match self.entries.get(key) {
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove Expired ==
    /// Removes every entry whose age is at least `max_age` as of `now`.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self, now: Instant, max_age: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now, max_age));

        let removed = before - self.entries.len();
        self.stats.record_reaped(removed);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
