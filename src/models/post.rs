//! Post model
//!
//! The record produced by the post store and served as JSON.

use serde::Serialize;

/// A blog post as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,
    /// Post content
    pub body: String,
    /// Reader rating, 1 to 5
    pub rating: u8,
}

impl Post {
    /// Creates a new Post
    pub fn new(title: impl Into<String>, body: impl Into<String>, rating: u8) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            rating,
        }
    }

    /// Returns true if the post qualifies for the most-popular listing.
    pub fn is_popular(&self) -> bool {
        self.rating >= 4
    }
}
