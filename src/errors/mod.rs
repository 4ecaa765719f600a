use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Custom error types for the markdown server
#[derive(Debug)]
pub enum ServeError {
    Io(io::Error),
    NotFound,
    Forbidden,
}

impl From<io::Error> for ServeError {
    fn from(err: io::Error) -> Self {
        ServeError::Io(err)
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        match self {
            ServeError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({"success": false, "error": "path escapes the served directory"})),
            )
                .into_response(),
            ServeError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({"success": false, "error": "file not found"})),
            )
                .into_response(),
            ServeError::Io(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"success": false, "error": e.to_string()})),
            )
                .into_response(),
        }
    }
}
