// Error types for the API server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// API server error types. Each variant maps to one of the wire shapes the
/// HTTP contract defines.
#[derive(Debug)]
pub enum ApiError {
    /// No `file` field in the upload (or the body was not multipart at all).
    MissingFile,
    /// Malformed multipart payload.
    BadRequest(String),
    /// Any failure of the enhancement pipeline; carries the detail string.
    Enhancement(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingFile => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No file provided" })),
            )
                .into_response(),
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            Self::Enhancement(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Enhancement failed", "detail": detail })),
            )
                .into_response(),
        }
    }
}
