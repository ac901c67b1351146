//! Navigation guard middleware.
//!
//! Runs before every matched request: private pages without a `token` cookie
//! are redirected to the login page, everything else passes through. A token
//! the bakery API rejects is cleared on the way out.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use bakehouse_core::{GuardDecision, RouteTable, token_present};

use crate::error::SessionRejected;
use crate::middleware::session::{TOKEN_COOKIE, clear_token_cookie};
use crate::state::AppState;

/// Customer pages that need a session.
pub const PRIVATE_ROUTES: &[&str] = &["/dashboard", "/profile", "/billing"];

/// Pages for signed-out visitors.
pub const PUBLIC_ROUTES: &[&str] = &["/login", "/client-signup-registration"];

/// Pages open to everyone.
pub const SHARED_ROUTES: &[&str] = &["/about-us", "/blog", "/home", "/"];

/// Paths the guard runs on. Anything else is never intercepted.
pub const MATCHER: &[&str] = &[
    "/dashboard",
    "/profile",
    "/login",
    "/client-signup-registration",
    "/about-us",
    "/blog",
    "/billing",
    "/",
];

pub const LOGIN_PATH: &str = "/login";

/// The storefront's route table.
#[must_use]
pub fn storefront_routes() -> RouteTable {
    RouteTable::new(LOGIN_PATH)
        .private(PRIVATE_ROUTES.iter().copied())
        .public(PUBLIC_ROUTES.iter().copied())
        .shared(SHARED_ROUTES.iter().copied())
        .intercept(MATCHER.iter().copied())
}

/// Redirect tokenless requests for private pages to the login page, and
/// clear the token cookie once the bakery API has rejected it.
pub async fn route_guard_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let has_token = token_present(jar.get(TOKEN_COOKIE).map(|c| c.value()));

    match state.routes().evaluate(&path, has_token) {
        GuardDecision::Allow => {
            let response = next.run(request).await;
            if response.extensions().get::<SessionRejected>().is_some() {
                tracing::info!(path = %path, "Bakery API rejected session, clearing cookie");
                let jar = CookieJar::new().add(clear_token_cookie(state.config().secure_cookies()));
                return (jar, response).into_response();
            }
            response
        }
        GuardDecision::Redirect(target) => {
            tracing::debug!(path = %path, target = %target, "Guard redirect");
            Redirect::to(&target).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakehouse_core::RouteClass;

    #[test]
    fn every_private_route_redirects_without_token() {
        let routes = storefront_routes();
        for path in PRIVATE_ROUTES {
            assert_eq!(
                routes.evaluate(path, false),
                GuardDecision::Redirect(LOGIN_PATH.to_string()),
                "{path}"
            );
            assert!(routes.evaluate(path, true).is_allow(), "{path}");
        }
    }

    #[test]
    fn shared_and_public_routes_always_pass() {
        let routes = storefront_routes();
        for path in SHARED_ROUTES.iter().chain(PUBLIC_ROUTES) {
            assert!(routes.evaluate(path, false).is_allow(), "{path}");
            assert!(routes.evaluate(path, true).is_allow(), "{path}");
        }
    }

    #[test]
    fn unmatched_paths_are_not_intercepted() {
        let routes = storefront_routes();
        assert!(!routes.intercepts("/products"));
        assert!(!routes.intercepts("/static/css/main.css"));
        assert!(routes.evaluate("/products", false).is_allow());
    }

    #[test]
    fn billing_is_private() {
        assert_eq!(storefront_routes().classify("/billing"), Some(RouteClass::Private));
    }
}
