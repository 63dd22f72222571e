//! Application state.
//!
//! Shared state for all request handlers.

use std::path::PathBuf;

use folio_store::DocStore;
use subtle::ConstantTimeEq;

use crate::session::TokenSigner;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Flat-file store for content documents.
    pub(crate) store: DocStore,
    /// Canonicalized root directory of the public site.
    pub(crate) site_root: PathBuf,
    /// Admin panel password (`None` disables login).
    pub(crate) admin_password: Option<String>,
    /// Signer for session tokens.
    pub(crate) signer: TokenSigner,
}

impl AppState {
    /// Check a login attempt against the configured password.
    ///
    /// The comparison runs in constant time. With no password configured
    /// every attempt fails, including an empty one.
    #[must_use]
    pub(crate) fn password_matches(&self, candidate: &str) -> bool {
        self.admin_password
            .as_ref()
            .is_some_and(|expected| bool::from(candidate.as_bytes().ct_eq(expected.as_bytes())))
    }
}
