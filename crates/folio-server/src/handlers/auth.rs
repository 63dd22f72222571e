//! Login and logout handlers.

use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::session;
use crate::state::AppState;
use crate::views;

/// Login form fields.
#[derive(Deserialize)]
pub(crate) struct LoginForm {
    password: String,
}

/// Handle GET /login.
pub(crate) async fn login_page() -> Html<String> {
    Html(views::login_page(None))
}

/// Handle POST /login.
///
/// A rejected password re-renders the login page with an error message,
/// not a 401.
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    if state.password_matches(&form.password) {
        let token = state.signer.issue();
        tracing::info!("Admin session opened");
        return (
            jar.add(session::session_cookie(token)),
            Redirect::to("/admin"),
        )
            .into_response();
    }

    tracing::info!("Rejected admin login attempt");
    Html(views::login_page(Some("Invalid Credentials."))).into_response()
}

/// Handle GET /logout.
pub(crate) async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (
        jar.remove(session::removal_cookie()),
        Redirect::to("/login"),
    )
}
