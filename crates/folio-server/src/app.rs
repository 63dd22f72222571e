//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{auth, security};
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    // Public authentication routes
    let auth_routes = Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout));

    // Admin panel and content API, gated behind a verified session
    let admin_routes = Router::new()
        .route("/admin", get(handlers::admin::dashboard))
        .route("/api/get/{filename}", get(handlers::content::get_document))
        .route(
            "/api/save/{filename}",
            post(handlers::content::save_document),
        )
        .route_layer(from_fn_with_state(
            Arc::clone(&state),
            auth::require_session,
        ));

    // Everything else falls through to the public site
    Router::new()
        .merge(auth_routes)
        .merge(admin_routes)
        .merge(static_files::static_router())
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer())
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenSigner;
    use folio_store::DocStore;
    use tempfile::TempDir;

    #[test]
    fn test_router_construction() {
        let temp = TempDir::new().unwrap();
        let state = Arc::new(AppState {
            store: DocStore::new(temp.path().join("data")),
            site_root: temp.path().to_path_buf(),
            admin_password: Some("test-password".to_owned()),
            signer: TokenSigner::new(b"test-key").unwrap(),
        });

        let _router = create_router(state);
    }
}
