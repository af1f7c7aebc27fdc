//! API Routes
//!
//! Configures the Axum router with all endpoints.

use axum::{
    middleware,
    routing::{delete, get},
    Router,
};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    get_popular_posts_handler, get_posts_handler, health_handler, invalidate_handler,
    method_not_allowed_handler, not_found_handler, stats_handler, AppState,
};
use super::middleware::read_through;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /posts` - All posts, uncached
/// - `GET /posts/most-popular` - Popular posts, served through the cache
/// - `DELETE /cache/*key` - Invalidate a cached entry
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Read-through: only on the cached routes
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cached = Router::new()
        .route("/posts/most-popular", get(get_popular_posts_handler))
        .route_layer(middleware::from_fn_with_state(
            state.cache.clone(),
            read_through::<Value>,
        ));

    Router::new()
        .route("/posts", get(get_posts_handler))
        .merge(cached)
        .route("/cache/*key", delete(invalidate_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(method_not_allowed_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
