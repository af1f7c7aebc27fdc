//! In-memory post store
//!
//! Holds a fixed list of posts and simulates a slow backend by sleeping
//! before every answer.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::PostStore;
use crate::models::Post;

/// Post store backed by a Vec, with artificial latency.
#[derive(Debug, Clone)]
pub struct MemoryPostStore {
    posts: Vec<Post>,
    latency: Duration,
}

impl MemoryPostStore {
    /// Creates a store over `posts` that takes `latency` per query.
    pub fn new(posts: Vec<Post>, latency: Duration) -> Self {
        Self { posts, latency }
    }

    /// Creates a store holding the four demo posts.
    pub fn seeded(latency: Duration) -> Self {
        Self::new(
            vec![
                Post::new("Post one", "Post one content", 4),
                Post::new("Post two", "Post two content", 2),
                Post::new("Post three", "Post three content", 5),
                Post::new("Post four", "Post four content", 3),
            ],
            latency,
        )
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            debug!("Post store query, waiting {:?}", self.latency);
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn get_posts(&self) -> Vec<Post> {
        self.simulate_latency().await;
        self.posts.clone()
    }

    async fn get_popular_posts(&self) -> Vec<Post> {
        self.simulate_latency().await;
        self.posts.iter().filter(|p| p.is_popular()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test]
    async fn test_seeded_get_posts() {
        let store = MemoryPostStore::seeded(Duration::ZERO);
        let posts = store.get_posts().await;
        assert_eq!(posts.len(), 4);
        assert_eq!(posts[0].title, "Post one");
    }

    #[tokio::test]
    async fn test_popular_posts_filter_by_rating() {
        let store = MemoryPostStore::seeded(Duration::ZERO);
        let titles: Vec<String> = store
            .get_popular_posts()
            .await
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Post one", "Post three"]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryPostStore::new(Vec::new(), Duration::ZERO);
        assert!(store.get_popular_posts().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_applied() {
        let store = MemoryPostStore::seeded(Duration::from_secs(3));
        let started = Instant::now();

        store.get_posts().await;

        assert!(started.elapsed() >= Duration::from_secs(3));
    }
}
