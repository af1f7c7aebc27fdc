//! API Module
//!
//! HTTP handlers, routing and the read-through cache middleware.
//!
//! # Endpoints
//! - `GET /posts` - All posts, uncached
//! - `GET /posts/most-popular` - Popular posts, served through the cache
//! - `DELETE /cache/*key` - Invalidate a cached entry
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::*;
pub use middleware::{cache_key, read_through};
pub use routes::create_router;
