//! Post Cache - A posts API fronted by an in-memory read-through cache
//!
//! Slow store lookups are cached per request path with a per-entry TTL, and
//! cached routes are answered without running their handlers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod posts;
pub mod tasks;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
