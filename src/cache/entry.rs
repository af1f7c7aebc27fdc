//! Cache Entry Module
//!
//! Defines the structure for individual cache entries and their pending expiry.

use tokio::task::AbortHandle;

// == Cache Entry ==
/// A single stored value together with the bookkeeping for its expiry timer.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
    /// The stored value
    pub(crate) value: V,
    /// Generation assigned by the `set` that created this entry
    pub(crate) generation: u64,
    /// Handle of the scheduled expiry, None = no expiration
    expiry: Option<AbortHandle>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `generation` - Generation of the `set` call that produced it
    /// * `expiry` - Handle of the timer that will remove it, if any
    pub(crate) fn new(value: V, generation: u64, expiry: Option<AbortHandle>) -> Self {
        Self {
            value,
            generation,
            expiry,
        }
    }

    // == Expires ==
    /// Returns true if a timer is scheduled to remove this entry.
    #[cfg(test)]
    pub(crate) fn expires(&self) -> bool {
        self.expiry.is_some()
    }

    // == Cancel Expiry ==
    /// Retracts the scheduled expiry, if any.
    ///
    /// Called when the entry is replaced or deleted so a stale timer cannot
    /// outlive the value it was scheduled for.
    pub(crate) fn cancel_expiry(&mut self) {
        if let Some(handle) = self.expiry.take() {
            handle.abort();
        }
    }
}
