//! Error types for the posts API
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

// == App Error Enum ==
/// Unified error type for the HTTP layer.
///
/// The cache itself never fails; these errors come from routing and from
/// encoding handler results.
#[derive(Error, Debug)]
pub enum AppError {
    /// No route matches the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// The route exists but not for this method
    #[error("Method not allowed: {0} {1}")]
    MethodNotAllowed(String, String),

    /// A handler result could not be encoded as JSON
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(path) => (StatusCode::NOT_FOUND, format!("{} not found", path)),
            AppError::MethodNotAllowed(method, path) => (
                StatusCode::METHOD_NOT_ALLOWED,
                format!("{} not allowed on {}", method, path),
            ),
            AppError::Serialization(_) => {
                // Details stay in the log, the client gets a generic message.
                error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;
