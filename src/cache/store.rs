//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with timer-driven TTL expiration.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::stats::StatsCounters;
use crate::cache::{CacheEntry, CacheStats};
use crate::tasks::spawn_expiry_timer;

// == TTL Cache ==
/// Concurrent key/value cache with optional per-entry expiry.
///
/// Cloning is cheap and yields another handle to the same entries, so one
/// instance built at startup can be handed to every handler and middleware.
/// Reads share the lock; `set`, `delete` and expiry take it exclusively.
///
/// Expiry is scheduled, not checked: a `set` with a TTL spawns a timer that
/// removes the key when it fires. A later `set` or `delete` on the same key
/// retracts that timer, so an entry only ever expires on the TTL it was
/// stored with.
pub struct TtlCache<V> {
    inner: Arc<Shared<V>>,
}

struct Shared<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, CacheEntry<V>>>,
    /// Source of entry generations
    next_generation: AtomicU64,
    /// Performance statistics
    stats: StatsCounters,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache")
            .field("handles", &Arc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

impl<V> Default for TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Shared {
                entries: RwLock::new(HashMap::new()),
                next_generation: AtomicU64::new(0),
                stats: StatsCounters::default(),
            }),
        }
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// A missing key is a normal result, not an error.
    pub async fn get(&self, key: &str) -> Option<V> {
        let entries = self.inner.entries.read().await;
        match entries.get(key) {
            Some(entry) => {
                self.inner.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.inner.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any existing entry.
    ///
    /// A positive `ttl` schedules removal of the key once it elapses. `None`
    /// or a zero duration stores the entry without expiry. Any expiry pending
    /// from an earlier `set` on the same key is retracted.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live
    ///
    /// # Panics
    /// Panics if called with a TTL outside a Tokio runtime, since the expiry
    /// timer is spawned onto it.
    pub async fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let key = key.into();
        let ttl = ttl.filter(|ttl| !ttl.is_zero());

        let mut entries = self.inner.entries.write().await;
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed) + 1;

        // The timer cannot observe the map before this guard is released.
        let expiry = ttl.map(|ttl| spawn_expiry_timer(self.clone(), key.clone(), generation, ttl));

        let replaced = entries.insert(key.clone(), CacheEntry::new(value, generation, expiry));
        if let Some(mut previous) = replaced {
            previous.cancel_expiry();
        }

        debug!("Set key '{}' (generation {}, ttl {:?})", key, generation, ttl);
    }

    // == Delete ==
    /// Removes the entry for `key` if present. Deleting a missing key is a no-op.
    pub async fn delete(&self, key: &str) {
        let mut entries = self.inner.entries.write().await;
        if let Some(mut entry) = entries.remove(key) {
            entry.cancel_expiry();
            debug!("Deleted key '{}'", key);
        }
    }

    // == Expire ==
    /// Removes `key` only if it still holds the entry stored at `generation`.
    ///
    /// Returns true if an entry was removed.
    pub(crate) async fn expire(&self, key: &str, generation: u64) -> bool {
        let mut entries = self.inner.entries.write().await;
        let current = entries.get(key).map(|entry| entry.generation);
        if current != Some(generation) {
            return false;
        }

        entries.remove(key);
        self.inner.stats.record_expiration();
        true
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub async fn stats(&self) -> CacheStats {
        let entries = self.inner.entries.read().await;
        self.inner.stats.snapshot(entries.len())
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub async fn len(&self) -> usize {
        self.inner.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.inner.entries.read().await.is_empty()
    }
}
