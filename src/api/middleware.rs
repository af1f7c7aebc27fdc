//! Read-Through Middleware
//!
//! Answers GET and HEAD requests straight from the cache when the request path has a
//! cached value, without running the wrapped handler.

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::TtlCache;

/// Response header telling clients whether the cache answered.
pub const X_CACHE: &str = "x-cache";

/// Derives the cache key for a request path: the path without its leading `/`.
///
/// Returns None for the root path, which is never cached.
pub fn cache_key(path: &str) -> Option<String> {
    let key = path.strip_prefix('/').unwrap_or(path);
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

/// Middleware serving cached results for the wrapped routes.
///
/// On a hit the cached value is encoded as the JSON body and the downstream
/// handler never runs. On a miss the request passes through untouched; the
/// handler is responsible for storing its result with whatever TTL it wants.
///
/// Anything the cache cannot answer cleanly (methods other than GET or HEAD, an empty key,
/// a value that fails to serialize) is treated as a miss.
///
/// # Usage
/// ```ignore
/// let layer = axum::middleware::from_fn_with_state(cache.clone(), read_through::<Value>);
/// Router::new().route("/posts/most-popular", get(handler)).route_layer(layer);
/// ```
pub async fn read_through<V>(
    State(cache): State<TtlCache<V>>,
    request: Request,
    next: Next,
) -> Response
where
    V: Serialize + Clone + Send + Sync + 'static,
{
    if !matches!(*request.method(), Method::GET | Method::HEAD) {
        return next.run(request).await;
    }

    let Some(key) = cache_key(request.uri().path()) else {
        return next.run(request).await;
    };

    if let Some(cached) = cache.get(&key).await {
        match serde_json::to_vec(&cached) {
            Ok(body) => {
                debug!("Cache hit for '{}'", key);
                return (
                    [
                        (header::CONTENT_TYPE, "application/json"),
                        (HeaderName::from_static(X_CACHE), "HIT"),
                    ],
                    body,
                )
                    .into_response();
            }
            Err(err) => {
                warn!("Cached value for '{}' is not serializable, bypassing cache: {}", key, err);
            }
        }
    }

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(X_CACHE, HeaderValue::from_static("MISS"));
    response
}
