//! Signed session tokens for the admin panel.
//!
//! A token has the form `{issued_at}.{signature}` where the signature is
//! an HMAC-SHA256 over the issue timestamp, hex encoded. Every request
//! recomputes and checks the signature, so there is no server-side
//! session table and a tampered cookie is rejected outright.

use axum_extra::extract::cookie::{Cookie, SameSite};
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Session cookie name.
pub(crate) const SESSION_COOKIE: &str = "folio_session";

/// Issues and verifies signed session tokens.
pub(crate) struct TokenSigner {
    mac: Hmac<Sha256>,
}

impl TokenSigner {
    /// Create a signer from the session secret.
    pub(crate) fn new(secret: &[u8]) -> Result<Self, InvalidLength> {
        Ok(Self {
            mac: Hmac::<Sha256>::new_from_slice(secret)?,
        })
    }

    /// Issue a token for a fresh admin session.
    pub(crate) fn issue(&self) -> String {
        let issued_at = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        format!("{issued_at}.{}", self.sign(issued_at))
    }

    /// Verify a token presented by a client.
    pub(crate) fn verify(&self, token: &str) -> bool {
        let Some((issued_at, signature)) = token.split_once('.') else {
            return false;
        };
        let Ok(issued_at) = issued_at.parse::<u64>() else {
            return false;
        };
        let expected = self.sign(issued_at);
        bool::from(signature.as_bytes().ct_eq(expected.as_bytes()))
    }

    fn sign(&self, issued_at: u64) -> String {
        let mut mac = self.mac.clone();
        mac.update(format!("admin\n{issued_at}\n").as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

/// Build the session cookie carrying a freshly issued token.
pub(crate) fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build()
}

/// Build the cookie used to clear the session on logout.
pub(crate) fn removal_cookie() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE).path("/").build()
}
