//! Background Tasks Module
//!
//! Contains tasks the runtime drives on behalf of the cache.
//!
//! # Tasks
//! - Expiry timer: one-shot removal of a cache entry once its TTL elapses

mod expiry;

pub use expiry::spawn_expiry_timer;
