//! Role-aware access guard.
//!
//! Staff pages need a token, and each page is open to a fixed set of staff
//! roles. A signed-in member who opens a page outside their role lands on
//! their role's home page instead; one whose role has no home page is sent to
//! log in again.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use bakehouse_core::{GuardDecision, RouteClass, RouteTable, StaffRole, token_present};

use crate::error::SessionRejected;
use crate::middleware::session::{TOKEN_COOKIE, end_session, role_from_jar};
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/login";

pub const PUBLIC_ROUTES: &[&str] = &[LOGIN_PATH];

const MANAGERS: &[StaffRole] = &[StaffRole::Admin, StaffRole::Bakery];

const PRODUCT_STAFF: &[StaffRole] = &[
    StaffRole::Admin,
    StaffRole::Bakery,
    StaffRole::StockManager,
    StaffRole::Accountant,
];

const ORDER_STAFF: &[StaffRole] = &[StaffRole::Admin, StaffRole::Bakery, StaffRole::Accountant];

/// Staff pages and the roles allowed on each.
pub const ROLE_ACCESS: &[(&str, &[StaffRole])] = &[
    ("/", MANAGERS),
    ("/dashboard", MANAGERS),
    ("/products", PRODUCT_STAFF),
    ("/products/select", PRODUCT_STAFF),
    ("/products/select-all", PRODUCT_STAFF),
    ("/products/bulk", PRODUCT_STAFF),
    ("/orders-management", ORDER_STAFF),
    // Same roles as products; only workers are kept out.
    ("/notifications", PRODUCT_STAFF),
];

/// The admin route table. Every path is intercepted.
#[must_use]
pub fn admin_routes() -> RouteTable {
    RouteTable::new(LOGIN_PATH)
        .private(ROLE_ACCESS.iter().map(|(path, _)| *path))
        .public(PUBLIC_ROUTES.iter().copied())
}

/// Home page of a role, or `None` if the role may not use the panel.
#[must_use]
pub const fn landing_page(role: StaffRole) -> Option<&'static str> {
    match role {
        StaffRole::Admin | StaffRole::Bakery => Some("/dashboard"),
        StaffRole::StockManager => Some("/products"),
        StaffRole::Accountant => Some("/orders-management"),
        StaffRole::Worker => None,
    }
}

/// Whether `role` may open `path`. Paths without a role list are open.
#[must_use]
pub fn is_permitted(path: &str, role: Option<StaffRole>) -> bool {
    match ROLE_ACCESS.iter().find(|(p, _)| *p == path) {
        Some((_, roles)) => role.is_some_and(|r| roles.contains(&r)),
        None => true,
    }
}

/// Decide a navigation from the path, token presence and role cookie.
#[must_use]
pub fn decide(
    routes: &RouteTable,
    path: &str,
    has_token: bool,
    role: Option<StaffRole>,
) -> GuardDecision {
    let decision = routes.evaluate(path, has_token);
    if !decision.is_allow() || !has_token {
        return decision;
    }

    let landing = role.and_then(landing_page);
    match routes.classify(path) {
        Some(RouteClass::Private) if !is_permitted(path, role) => {
            GuardDecision::Redirect(landing.unwrap_or(routes.login_path()).to_string())
        }
        // A role without a landing page stays on the login form so it can
        // sign in as someone else.
        Some(RouteClass::Public) => {
            landing.map_or(GuardDecision::Allow, |l| GuardDecision::Redirect(l.to_string()))
        }
        _ => GuardDecision::Allow,
    }
}

/// Apply [`decide`] to every request.
///
/// A response marked [`SessionRejected`] also clears both session cookies;
/// otherwise the stale token would bounce between `/login` and the landing
/// page.
pub async fn access_guard_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    let has_token = token_present(jar.get(TOKEN_COOKIE).map(|c| c.value()));
    let role = role_from_jar(&jar);

    match decide(state.routes(), &path, has_token, role) {
        GuardDecision::Allow => {
            let response = next.run(request).await;
            if response.extensions().get::<SessionRejected>().is_some() {
                tracing::info!(path = %path, "Bakery API rejected session, clearing cookies");
                let jar = end_session(CookieJar::new(), state.config().secure_cookies());
                return (jar, response).into_response();
            }
            response
        }
        GuardDecision::Redirect(target) => {
            tracing::debug!(path = %path, target = %target, role = ?role, "Access redirect");
            Redirect::to(&target).into_response()
        }
    }
}
