//! Expiry Timer Task
//!
//! One-shot task that removes a cache entry once its TTL has elapsed.

use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::debug;

use crate::cache::TtlCache;

/// Spawns a timer that expires `key` after `ttl`.
///
/// The timer only removes the entry stored at `generation`; if the key was
/// overwritten or deleted in the meantime it does nothing. The returned
/// handle lets the cache retract the timer early.
///
/// Timers are fire-and-forget: nothing waits on them, and any still pending
/// at shutdown are dropped with the runtime.
///
/// # Arguments
/// * `cache` - Handle to the cache owning the entry
/// * `key` - Key of the entry to expire
/// * `generation` - Generation of the entry the timer belongs to
/// * `ttl` - Delay before the entry is removed
pub fn spawn_expiry_timer<V>(
    cache: TtlCache<V>,
    key: String,
    generation: u64,
    ttl: Duration,
) -> AbortHandle
where
    V: Clone + Send + Sync + 'static,
{
    let task = tokio::spawn(async move {
        tokio::time::sleep(ttl).await;

        if cache.expire(&key, generation).await {
            debug!("TTL expiry: removed key '{}' after {:?}", key, ttl);
        } else {
            debug!("TTL expiry: key '{}' already replaced, skipping", key);
        }
    });

    task.abort_handle()
}
