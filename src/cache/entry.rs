//! Cache Entry Module
//!
//! Defines the structure for individual cache entries stamped with their insertion time.

use std::time::Duration;

use bytes::Bytes;
use tokio::time::Instant;

// == Cache Entry ==
/// Represents a single cache entry with its payload and insertion time.
///
/// The payload is an immutable `Bytes` handle, so callers can never mutate
/// what the cache holds after handing it over.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored payload
    pub value: Bytes,
    /// Insertion time (monotonic)
    pub created_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(value: Bytes) -> Self {
        Self::with_created_at(value, Instant::now())
    }

    /// Creates a cache entry with an explicit insertion time.
    pub fn with_created_at(value: Bytes, created_at: Instant) -> Self {
        Self { value, created_at }
    }

    // == Age ==
    /// Returns how long the entry has lived as of `now`.
    ///
    /// Saturates to zero if `now` is earlier than the insertion time.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has reached `max_age` as of `now`.
    ///
    /// Boundary condition: an entry whose age equals `max_age` is expired.
    pub fn is_expired(&self, now: Instant, max_age: Duration) -> bool {
        self.age(now) >= max_age
    }
}
