//! API Handlers
//!
//! HTTP request handlers for each endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{Method, Uri},
    Json,
};
use serde_json::Value;

use super::middleware::cache_key;
use crate::cache::TtlCache;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{DeleteResponse, HealthResponse, Post, StatsResponse};
use crate::posts::{MemoryPostStore, PostStore};

/// Application state shared across all handlers.
///
/// Built once by the composition root; every handler and the read-through
/// middleware work against the same cache handle.
#[derive(Clone)]
pub struct AppState {
    /// Response cache, keyed by request path
    pub cache: TtlCache<Value>,
    /// Slow source of posts
    pub store: Arc<dyn PostStore>,
    /// TTL for the cached most-popular listing
    pub popular_posts_ttl: Option<Duration>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        cache: TtlCache<Value>,
        store: Arc<dyn PostStore>,
        popular_posts_ttl: Option<Duration>,
    ) -> Self {
        Self {
            cache,
            store,
            popular_posts_ttl,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses an empty cache and the seeded in-memory post store.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            TtlCache::new(),
            Arc::new(MemoryPostStore::seeded(config.store_latency())),
            config.popular_posts_ttl(),
        )
    }
}

/// Handler for GET /posts
///
/// Always queries the store.
pub async fn get_posts_handler(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.store.get_posts().await)
}

/// Handler for GET /posts/most-popular
///
/// Runs only on a cache miss. Queries the store, caches the encoded result
/// under the request path, and returns it.
pub async fn get_popular_posts_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<Value>> {
    let posts = state.store.get_popular_posts().await;
    let value = serde_json::to_value(&posts)?;

    if let Some(key) = cache_key(uri.path()) {
        state
            .cache
            .set(key, value.clone(), state.popular_posts_ttl)
            .await;
    }

    Ok(Json(value))
}

/// Handler for DELETE /cache/*key
///
/// Drops a cached entry. Succeeds whether or not the key was cached.
pub async fn invalidate_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<DeleteResponse> {
    state.cache.delete(&key).await;
    Json(DeleteResponse::new(key))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Fallback for unmatched routes.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Fallback for known routes hit with an unsupported method.
pub async fn method_not_allowed_handler(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(method.to_string(), uri.path().to_string())
}
