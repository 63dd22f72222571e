//! Session authentication middleware.
//!
//! Gates the admin panel and content API behind a verified session
//! token. The signature is checked on every request, so a forged or
//! stale cookie never reaches a handler.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::session::SESSION_COOKIE;
use crate::state::AppState;

/// Redirect to the login page unless the request carries a valid session.
pub(crate) async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    req: Request<Body>,
    next: Next,
) -> Response {
    if has_valid_session(&state, &jar) {
        return next.run(req).await;
    }

    Redirect::to("/login").into_response()
}

/// Check the jar for a session cookie with a verifiable signature.
fn has_valid_session(state: &AppState, jar: &CookieJar) -> bool {
    jar.get(SESSION_COOKIE)
        .is_some_and(|cookie| state.signer.verify(cookie.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenSigner;
    use axum::http::{HeaderMap, header};
    use folio_store::DocStore;
    use std::path::PathBuf;

    fn make_state() -> AppState {
        AppState {
            store: DocStore::new(PathBuf::from("/tmp/unused")),
            site_root: PathBuf::from("/tmp/unused"),
            admin_password: Some("test-password".to_owned()),
            signer: TokenSigner::new(b"test-key").unwrap(),
        }
    }

    fn jar_with_cookie(value: &str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("{SESSION_COOKIE}={value}").parse().unwrap(),
        );
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_issued_token_passes_the_gate() {
        let state = make_state();
        let jar = jar_with_cookie(&state.signer.issue());
        assert!(has_valid_session(&state, &jar));
    }

    #[test]
    fn test_missing_cookie_fails_the_gate() {
        let state = make_state();
        assert!(!has_valid_session(&state, &CookieJar::new()));
    }

    #[test]
    fn test_tampered_token_fails_the_gate() {
        let state = make_state();
        let jar = jar_with_cookie(
            "1700000000.0000000000000000000000000000000000000000000000000000000000000000",
        );
        assert!(!has_valid_session(&state, &jar));
    }

    #[test]
    fn test_cookie_under_other_name_fails_the_gate() {
        let state = make_state();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("other_cookie={}", state.signer.issue())
                .parse()
                .unwrap(),
        );
        let jar = CookieJar::from_headers(&headers);
        assert!(!has_valid_session(&state, &jar));
    }
}
