//! Timed Cache Module
//!
//! Thread-safe, self-expiring key/value cache shared between the REPL and
//! the background reaper.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cache::{CacheStats, CacheStore};
use crate::error::{PokedexError, Result};
use crate::tasks::{spawn_reaper_task, ReaperState, ReaperStatus};

// == Timed Cache ==
/// Handle to a cache whose entries are removed once they reach the
/// configured interval in age.
///
/// Cloning is cheap; all clones share the same store and reaper. The reaper
/// stops on [`TimedCache::shutdown`] or once the last handle is dropped.
///
/// Lookups never check age themselves. An entry stays readable until the
/// first sweep that finds it expired, so it may outlive its interval by up to
/// one sweep period.
#[derive(Clone)]
pub struct TimedCache {
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    reaper: Arc<Reaper>,
}

struct Reaper {
    shutdown: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
    status: Arc<ReaperStatus>,
}

impl TimedCache {
    // == Constructor ==
    /// Creates an empty cache and starts its reaper on the current tokio runtime.
    ///
    /// # Errors
    /// - `InvalidInterval` if `interval` is zero
    /// - `NoRuntime` if called outside a tokio runtime
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(PokedexError::InvalidInterval);
        }
        Handle::try_current().map_err(|_| PokedexError::NoRuntime)?;

        let store = Arc::new(Mutex::new(CacheStore::new()));
        let (shutdown, shutdown_rx) = watch::channel(false);
        let status = Arc::new(ReaperStatus::new());
        let task = spawn_reaper_task(store.clone(), interval, shutdown_rx, status.clone());

        Ok(Self {
            store,
            interval,
            reaper: Arc::new(Reaper {
                shutdown,
                task: Mutex::new(Some(task)),
                status,
            }),
        })
    }

    // == Add ==
    /// Inserts or replaces the payload stored under `key`.
    ///
    /// The entry's age restarts from zero on every call.
    pub fn add(&self, key: impl Into<String>, value: impl Into<Bytes>) {
        let key = key.into();
        let value = value.into();
        debug!(key = %key, bytes = value.len(), "cache add");
        self.store.lock().insert(key, value);
    }

    // == Get ==
    /// Returns the most recently added payload for `key`, or `None` if it was
    /// never added or has been reaped.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.store.lock().get(key)
    }

    // == Shutdown ==
    /// Stops the reaper and waits for it to finish.
    ///
    /// Entries already stored stay readable; they are simply no longer
    /// expired. Calling this more than once is a no-op.
    pub async fn shutdown(&self) {
        self.reaper.shutdown.send_replace(true);

        let task = self.reaper.task.lock().take();
        if let Some(task) = task {
            if let Err(err) = task.await {
                warn!("Cache reaper ended abnormally: {}", err);
            }
        }
    }

    /// Sweep period and maximum entry age.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn reaper_state(&self) -> ReaperState {
        self.reaper.status.get()
    }

    /// Returns a snapshot of hit, miss and reap counters.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}

impl fmt::Debug for TimedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedCache")
            .field("interval", &self.interval)
            .field("entries", &self.len())
            .field("reaper", &self.reaper_state())
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tokio::time::sleep;
    use tokio_test::assert_ok;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_new_rejects_zero_interval() {
        let result = TimedCache::new(Duration::ZERO);
        assert!(matches!(result, Err(PokedexError::InvalidInterval)));
    }

    #[test]
    fn test_new_requires_runtime() {
        let result = TimedCache::new(INTERVAL);
        assert!(matches!(result, Err(PokedexError::NoRuntime)));
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let cache = assert_ok!(TimedCache::new(Duration::from_secs(60)));

        cache.add("key", vec![1u8, 2, 3]);

        assert_eq!(cache.get("key"), Some(Bytes::from_static(&[1, 2, 3])));
        assert_eq!(cache.interval(), Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_get_unknown_key() {
        let cache = assert_ok!(TimedCache::new(Duration::from_secs(60)));
        assert!(cache.get("never-added").is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_readd_replaces_value() {
        let cache = assert_ok!(TimedCache::new(Duration::from_secs(60)));

        cache.add("x", Bytes::from_static(b"A"));
        cache.add("x", Bytes::from_static(b"B"));

        assert_eq!(cache.get("x"), Some(Bytes::from_static(b"B")));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_caller_mutation_not_observed() {
        let cache = assert_ok!(TimedCache::new(Duration::from_secs(60)));
        let mut buf = vec![1u8, 2, 3];

        cache.add("key", Bytes::copy_from_slice(&buf));
        buf[0] = 9;

        assert_eq!(cache.get("key"), Some(Bytes::from_static(&[1, 2, 3])));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_within_bounded_window() {
        let cache = assert_ok!(TimedCache::new(INTERVAL));

        cache.add("a", vec![1u8, 2, 3]);

        sleep(Duration::from_millis(10)).await;
        assert_eq!(cache.get("a"), Some(Bytes::from_static(&[1, 2, 3])));

        sleep(Duration::from_millis(240)).await;
        assert!(cache.get("a").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_visible_until_next_sweep() {
        let cache = assert_ok!(TimedCache::new(INTERVAL));

        // Sweeps run at 100ms, 200ms, ...; this entry expires at 150ms
        sleep(Duration::from_millis(50)).await;
        cache.add("late", Bytes::from_static(b"v"));

        sleep(Duration::from_millis(125)).await; // t = 175ms
        assert_eq!(cache.get("late"), Some(Bytes::from_static(b"v")));

        sleep(Duration::from_millis(30)).await; // t = 205ms
        assert!(cache.get("late").is_none());
        assert_eq!(cache.stats().reaped, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_readd_resets_age() {
        let cache = assert_ok!(TimedCache::new(INTERVAL));

        cache.add("k", Bytes::from_static(b"v1"));
        sleep(Duration::from_millis(90)).await;
        cache.add("k", Bytes::from_static(b"v2"));

        // The sweep at 100ms sees the replacement at 10ms of age
        sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k"), Some(Bytes::from_static(b"v2")));

        // The sweep at 200ms sees it at 110ms of age
        sleep(Duration::from_millis(60)).await;
        assert!(cache.get("k").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_disjoint_keys() {
        let cache = assert_ok!(TimedCache::new(Duration::from_secs(60)));
        let mut handles = Vec::new();

        for writer in 0..8 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..250 {
                    cache.add(format!("writer{}-key{}", writer, i), vec![writer as u8]);
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(cache.len(), 8 * 250);
        let distinct: HashSet<_> = (0..8)
            .flat_map(|w| (0..250).map(move |i| format!("writer{}-key{}", w, i)))
            .collect();
        assert!(distinct.iter().all(|key| cache.get(key).is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_reaper() {
        let cache = assert_ok!(TimedCache::new(INTERVAL));
        sleep(Duration::from_millis(1)).await;
        assert_eq!(cache.reaper_state(), ReaperState::Idle);

        cache.shutdown().await;
        assert_eq!(cache.reaper_state(), ReaperState::Stopped);

        cache.add("kept", Bytes::from_static(b"v"));
        sleep(Duration::from_millis(500)).await;
        assert!(cache.get("kept").is_some());

        // Second call is a no-op
        cache.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_stops_when_last_handle_dropped() {
        let cache = assert_ok!(TimedCache::new(INTERVAL));
        let status = cache.reaper.status.clone();
        let clone = cache.clone();

        drop(cache);
        sleep(Duration::from_millis(150)).await;
        assert_eq!(status.get(), ReaperState::Idle);

        drop(clone);
        sleep(Duration::from_millis(1)).await;
        assert_eq!(status.get(), ReaperState::Stopped);
    }

    #[tokio::test]
    async fn test_stats_track_lookups() {
        let cache = assert_ok!(TimedCache::new(Duration::from_secs(60)));
        cache.add("hit", Bytes::from_static(b"v"));

        assert!(cache.get("hit").is_some());
        assert!(cache.get("miss").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
