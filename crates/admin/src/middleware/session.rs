//! Staff session cookies.
//!
//! A staff session is the bakery API access token in an HttpOnly `token`
//! cookie, plus the staff role in a `role` cookie used only to pick which
//! pages to show. Both are SameSite=Strict and expire after 24 hours.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use bakehouse_core::StaffRole;
use time::Duration;

/// Access token cookie name.
pub const TOKEN_COOKIE: &str = "token";

/// Staff role cookie name.
pub const ROLE_COOKIE: &str = "role";

/// Session expiry (24 hours).
const SESSION_EXPIRY: Duration = Duration::hours(24);

fn session_cookie(name: &'static str, value: String, secure: bool, max_age: Duration) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(max_age)
        .build()
}

/// Add the token and role cookies for a fresh login.
#[must_use]
pub fn start_session(jar: CookieJar, token: String, role: StaffRole, secure: bool) -> CookieJar {
    jar.add(session_cookie(TOKEN_COOKIE, token, secure, SESSION_EXPIRY))
        .add(session_cookie(
            ROLE_COOKIE,
            role.as_str().to_string(),
            secure,
            SESSION_EXPIRY,
        ))
}

/// Overwrite both session cookies with empty, expired values.
#[must_use]
pub fn end_session(jar: CookieJar, secure: bool) -> CookieJar {
    jar.add(session_cookie(TOKEN_COOKIE, String::new(), secure, Duration::ZERO))
        .add(session_cookie(ROLE_COOKIE, String::new(), secure, Duration::ZERO))
}

/// Staff role named by the `role` cookie, if it names a known role.
#[must_use]
pub fn role_from_jar(jar: &CookieJar) -> Option<StaffRole> {
    jar.get(ROLE_COOKIE).and_then(|c| c.value().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_sets_strict_cookies() {
        let jar = start_session(CookieJar::new(), "tok".into(), StaffRole::Accountant, true);
        let token = jar.get(TOKEN_COOKIE).map(Cookie::value);
        assert_eq!(token, Some("tok"));
        assert_eq!(role_from_jar(&jar), Some(StaffRole::Accountant));
        let role = jar.get(ROLE_COOKIE);
        assert_eq!(role.and_then(Cookie::same_site), Some(SameSite::Strict));
        assert_eq!(role.and_then(Cookie::max_age), Some(Duration::hours(24)));
    }

    #[test]
    fn logout_blanks_both_cookies() {
        let jar = start_session(CookieJar::new(), "tok".into(), StaffRole::Admin, false);
        let jar = end_session(jar, false);
        assert_eq!(jar.get(TOKEN_COOKIE).map(Cookie::value), Some(""));
        assert_eq!(role_from_jar(&jar), None);
    }
}
