//! Public site file serving.
//!
//! Serves the static site from the configured site root. Request paths
//! are percent-decoded, checked against a blocklist of source and
//! configuration files, then canonicalized and confined to the root
//! before anything is read from disk.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::response::Response;
use percent_encoding::percent_decode_str;

use crate::error::ServerError;
use crate::state::AppState;

/// Extensions never served, wherever the file lives.
const BLOCKED_EXTENSIONS: [&str; 2] = [".rs", ".env"];

/// File names never served.
const BLOCKED_FILENAMES: [&str; 3] = ["Cargo.toml", "Cargo.lock", "folio.toml"];

/// Create router serving the public site as the fallback.
pub(crate) fn static_router() -> Router<Arc<AppState>> {
    Router::new().fallback(serve_asset)
}

/// Serve a file from the site root.
async fn serve_asset(
    State(state): State<Arc<AppState>>,
    req: Request<Body>,
) -> Result<Response, ServerError> {
    let decoded = percent_decode_str(req.uri().path()).decode_utf8_lossy();
    let path = decoded.trim_start_matches('/');

    // Map root to index.html
    let file_path = if path.is_empty() { "index.html" } else { path };

    if is_blocked(file_path) {
        tracing::warn!(path = %file_path, "Refused blocked file");
        return Err(ServerError::AccessDenied);
    }

    // Canonicalize the joined path and require it to stay inside the site
    // root; anything that resolves elsewhere is a traversal attempt
    let canonical = state
        .site_root
        .join(file_path)
        .canonicalize()
        .map_err(|_| ServerError::AssetNotFound(file_path.to_owned()))?;
    if !canonical.starts_with(&state.site_root) {
        tracing::warn!(path = %file_path, "Refused path outside site root");
        return Err(ServerError::AccessDenied);
    }
    if !canonical.is_file() {
        return Err(ServerError::AssetNotFound(file_path.to_owned()));
    }

    let content = tokio::fs::read(&canonical)
        .await
        .map_err(|_| ServerError::AssetNotFound(file_path.to_owned()))?;
    let mime = mime_guess::from_path(&canonical).first_or_octet_stream();

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .body(Body::from(content))
        .unwrap())
}

/// Check whether a request path may never be served.
fn is_blocked(path: &str) -> bool {
    if BLOCKED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return true;
    }
    let file_name = path.rsplit('/').next().unwrap_or(path);
    BLOCKED_FILENAMES.contains(&file_name)
}
