//! Integration Tests for API Endpoints
//!
//! Drives the full router with `oneshot`, using a counting post store to
//! observe when the slow path runs. TTL scenarios run on a paused clock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use post_cache::{
    api::create_router,
    models::Post,
    posts::{MemoryPostStore, PostStore},
    AppState, TtlCache,
};
use serde_json::{json, Value};
use tower::ServiceExt;

// == Test Doubles ==

/// Post store that counts popular-post queries and stamps each answer with
/// the number of the call that produced it.
struct CountingStore {
    inner: MemoryPostStore,
    popular_calls: AtomicUsize,
}

impl CountingStore {
    fn new(latency: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryPostStore::seeded(latency),
            popular_calls: AtomicUsize::new(0),
        })
    }

    fn popular_calls(&self) -> usize {
        self.popular_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostStore for CountingStore {
    async fn get_posts(&self) -> Vec<Post> {
        self.inner.get_posts().await
    }

    async fn get_popular_posts(&self) -> Vec<Post> {
        let call = self.popular_calls.fetch_add(1, Ordering::SeqCst) + 1;
        let mut posts = self.inner.get_popular_posts().await;
        posts.push(Post::new(format!("call {}", call), "stamp", 5));
        posts
    }
}

// == Helper Functions ==

fn create_test_app(store: Arc<CountingStore>, ttl: Option<Duration>) -> (Router, TtlCache<Value>) {
    let cache = TtlCache::new();
    let state = AppState::new(cache.clone(), store, ttl);
    (create_router(state), cache)
}

async fn send(app: &Router, method: &str, uri: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_to_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn stamp(body: &Value) -> String {
    body.as_array()
        .and_then(|posts| posts.last())
        .and_then(|post| post["title"].as_str())
        .unwrap()
        .to_string()
}

// == Read-Through Tests ==

#[tokio::test(start_paused = true)]
async fn test_popular_posts_miss_then_hit() {
    let store = CountingStore::new(Duration::from_secs(3));
    let (app, _) = create_test_app(store.clone(), Some(Duration::from_secs(10)));

    let first = send(&app, "GET", "/posts/most-popular").await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-cache"], "MISS");
    assert_eq!(first.headers()["content-type"], "application/json");
    let first_body = body_to_json(first).await;

    let second = send(&app, "GET", "/posts/most-popular").await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(second.headers()["x-cache"], "HIT");
    assert_eq!(second.headers()["content-type"], "application/json");
    let second_body = body_to_json(second).await;

    assert_eq!(first_body, second_body);
    assert_eq!(store.popular_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_hit_bypasses_handler_side_effects() {
    let store = CountingStore::new(Duration::ZERO);
    let (app, cache) = create_test_app(store.clone(), Some(Duration::from_secs(10)));

    cache
        .set("posts/most-popular", json!([{"title": "seeded"}]), None)
        .await;

    for _ in 0..5 {
        let response = send(&app, "GET", "/posts/most-popular").await;
        assert_eq!(body_to_json(response).await, json!([{"title": "seeded"}]));
    }

    assert_eq!(store.popular_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_popular_posts_recomputed_after_ttl() {
    let store = CountingStore::new(Duration::from_secs(3));
    let (app, cache) = create_test_app(store.clone(), Some(Duration::from_secs(10)));

    let first = body_to_json(send(&app, "GET", "/posts/most-popular").await).await;
    assert_eq!(stamp(&first), "call 1");
    assert!(cache.get("posts/most-popular").await.is_some());

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(cache.get("posts/most-popular").await.is_none());

    let again = send(&app, "GET", "/posts/most-popular").await;
    assert_eq!(again.headers()["x-cache"], "MISS");
    assert_eq!(stamp(&body_to_json(again).await), "call 2");
    assert_eq!(store.popular_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cached_listing_set_with_ttl_expires() {
    let cache = TtlCache::new();
    let listing = json!([{"title": "Post three", "rating": 5}]);

    cache
        .set("posts/most-popular", listing.clone(), Some(Duration::from_secs(10)))
        .await;
    assert_eq!(cache.get("posts/most-popular").await, Some(listing));

    tokio::time::sleep(Duration::from_secs(11)).await;
    assert!(cache.get("posts/most-popular").await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_misses_each_run_producer() {
    let store = CountingStore::new(Duration::from_secs(3));
    let (app, cache) = create_test_app(store.clone(), Some(Duration::from_secs(10)));

    let (a, b) = tokio::join!(
        send(&app, "GET", "/posts/most-popular"),
        send(&app, "GET", "/posts/most-popular"),
    );
    assert_eq!(a.status(), StatusCode::OK);
    assert_eq!(b.status(), StatusCode::OK);

    let stamps = [
        stamp(&body_to_json(a).await),
        stamp(&body_to_json(b).await),
    ];
    assert_eq!(store.popular_calls(), 2);

    let cached = cache.get("posts/most-popular").await.unwrap();
    assert!(stamps.contains(&stamp(&cached)));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_zero_ttl_listing_never_expires() {
    let store = CountingStore::new(Duration::ZERO);
    let (app, _) = create_test_app(store.clone(), None);

    send(&app, "GET", "/posts/most-popular").await;
    tokio::time::sleep(Duration::from_secs(3600)).await;
    let later = send(&app, "GET", "/posts/most-popular").await;

    assert_eq!(later.headers()["x-cache"], "HIT");
    assert_eq!(store.popular_calls(), 1);
}

#[tokio::test]
async fn test_uncached_route_always_runs_store() {
    let store = CountingStore::new(Duration::ZERO);
    let (app, cache) = create_test_app(store, Some(Duration::from_secs(10)));

    let response = send(&app, "GET", "/posts").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_to_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
    assert!(cache.is_empty().await);
}

// == Invalidation Tests ==

#[tokio::test]
async fn test_invalidate_forces_recompute() {
    let store = CountingStore::new(Duration::ZERO);
    let (app, cache) = create_test_app(store.clone(), Some(Duration::from_secs(10)));

    send(&app, "GET", "/posts/most-popular").await;
    assert!(cache.get("posts/most-popular").await.is_some());

    let response = send(&app, "DELETE", "/cache/posts/most-popular").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["key"], "posts/most-popular");
    assert!(cache.get("posts/most-popular").await.is_none());

    let response = send(&app, "GET", "/posts/most-popular").await;
    assert_eq!(response.headers()["x-cache"], "MISS");
    assert_eq!(store.popular_calls(), 2);
}

#[tokio::test]
async fn test_invalidate_missing_key_is_ok() {
    let (app, _) = create_test_app(CountingStore::new(Duration::ZERO), None);

    let response = send(&app, "DELETE", "/cache/never/cached").await;

    assert_eq!(response.status(), StatusCode::OK);
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_counts_hits_and_misses() {
    let (app, _) = create_test_app(CountingStore::new(Duration::ZERO), Some(Duration::from_secs(10)));

    send(&app, "GET", "/posts/most-popular").await; // miss
    send(&app, "GET", "/posts/most-popular").await; // hit

    let response = send(&app, "GET", "/stats").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["expirations"].as_u64().unwrap(), 0);
    assert!(json.get("hit_rate").is_some());
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _) = create_test_app(CountingStore::new(Duration::ZERO), None);

    let response = send(&app, "GET", "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_unknown_route_returns_json_error() {
    let (app, _) = create_test_app(CountingStore::new(Duration::ZERO), None);

    let response = send(&app, "GET", "/does/not/exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response).await;
    assert!(json.get("error").is_some());
}
