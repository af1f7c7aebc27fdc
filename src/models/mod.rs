//! Data models for the posts API
//!
//! This module defines the domain type served by the API and the DTOs
//! (Data Transfer Objects) used for serializing HTTP response bodies.

pub mod post;
pub mod responses;

// Re-export commonly used types
pub use post::Post;
pub use responses::{DeleteResponse, ErrorResponse, HealthResponse, StatsResponse};
