//! Cache Reaper Task
//!
//! Background task that periodically removes cache entries older than the
//! cache interval.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::CacheStore;

// == Reaper State ==
/// Lifecycle of the reaper task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaperState {
    /// Waiting for the next tick
    Idle,
    /// Scanning the store
    Sweeping,
    /// Terminal; no further sweeps
    Stopped,
}

/// Lock-free cell holding the current `ReaperState`, shared with cache handles.
#[derive(Debug)]
pub struct ReaperStatus(AtomicU8);

impl ReaperStatus {
    pub fn new() -> Self {
        Self(AtomicU8::new(ReaperState::Idle as u8))
    }

    pub fn get(&self) -> ReaperState {
        match self.0.load(Ordering::Acquire) {
            0 => ReaperState::Idle,
            1 => ReaperState::Sweeping,
            _ => ReaperState::Stopped,
        }
    }

    fn set(&self, state: ReaperState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

impl Default for ReaperStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns a background task that sweeps expired entries out of `store`.
///
/// Every `interval` the task takes the store lock once and removes each
/// entry whose age is at least `interval`. An entry added at `t` is therefore
/// gone by `t + 2 * interval` at the latest.
///
/// The task stops when `true` is published on `shutdown` or when the sender
/// side is dropped. Must be called from within a tokio runtime.
///
/// # Example
/// ```ignore
/// let (tx, rx) = watch::channel(false);
/// let handle = spawn_reaper_task(store.clone(), Duration::from_secs(300), rx, status);
/// // Later, during shutdown:
/// tx.send_replace(true);
/// handle.await?;
/// ```
pub fn spawn_reaper_task(
    store: Arc<Mutex<CacheStore>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
    status: Arc<ReaperStatus>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting cache reaper with interval of {:?}", interval);

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await; // first tick completes immediately

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    status.set(ReaperState::Sweeping);
                    let removed = store.lock().remove_expired(Instant::now(), interval);
                    status.set(ReaperState::Idle);

                    if removed > 0 {
                        info!("Cache sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Cache sweep: no expired entries found");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        status.set(ReaperState::Stopped);
        info!("Cache reaper stopped");
    })
}
