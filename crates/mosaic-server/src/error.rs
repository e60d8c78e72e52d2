//! Error types for the REST API layer.
//!
//! [`ApiError`] unifies the REST failure modes into a single enum that
//! converts into an HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Write
//! rejections never appear here — they travel over the `WebSocket` as
//! protocol messages, not as HTTP errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors that can occur in the REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested resource does not exist (e.g. an empty history has
    /// no time range).
    #[error("not found: {0}")]
    NotFound(String),

    /// A player id could not be parsed from the request path.
    #[error("invalid player id: {0}")]
    InvalidPlayerId(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::InvalidPlayerId(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
