//! Posts Module
//!
//! The slow data source behind the API. Stores know nothing about the cache;
//! handlers decide what to cache and for how long.

mod memory;

use async_trait::async_trait;

use crate::models::Post;

pub use memory::MemoryPostStore;

/// Source of posts.
///
/// Implementations may take seconds to answer and must tolerate concurrent
/// calls from many in-flight requests.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Returns every post.
    async fn get_posts(&self) -> Vec<Post>;

    /// Returns the posts rated 4 or higher.
    async fn get_popular_posts(&self) -> Vec<Post>;
}
