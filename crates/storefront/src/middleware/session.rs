//! Session cookie handling.
//!
//! The session is the bakery API's access token, held in an HttpOnly `token`
//! cookie. Logout overwrites it with an empty, expired value.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Session cookie name.
pub const TOKEN_COOKIE: &str = "token";

/// Session expiry (7 days).
const SESSION_EXPIRY: Duration = Duration::days(7);

/// Cookie carrying a freshly issued access token.
#[must_use]
pub fn token_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(SESSION_EXPIRY)
        .build()
}

/// Cookie that clears the session.
#[must_use]
pub fn clear_token_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}
