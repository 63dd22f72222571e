//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_store::StoreError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Request path refused by the serving policy.
    #[error("Access denied")]
    AccessDenied,

    /// Static asset not found at the given path.
    #[error("File not found: {0}")]
    AssetNotFound(String),

    /// Error from the document store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::AccessDenied => (StatusCode::FORBIDDEN, "Access denied").into_response(),
            Self::AssetNotFound(path) => (
                StatusCode::NOT_FOUND,
                axum::Json(json!({"error": "File not found", "path": path})),
            )
                .into_response(),
            Self::Store(StoreError::InvalidName(name)) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({"error": "Invalid document name", "name": name})),
            )
                .into_response(),
            Self::Store(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({"error": e.to_string()})),
            )
                .into_response(),
        }
    }
}
