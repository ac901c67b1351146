//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Health check
//!
//! # Auth
//! GET  /login                       - Login page
//! POST /login                       - Login action (sets `token` and `role`)
//! POST /logout                      - Logout action
//!
//! # Staff pages (access guard checks token and role)
//! GET  /, /dashboard                - Overview counts
//! GET  /products?page=&selected=    - Product listing with row selection
//! GET  /products/select?id=         - Toggle one row
//! GET  /products/select-all         - Toggle every visible row
//! POST /products/bulk               - Bulk duplicate/delete/draft/publish
//! GET  /orders-management?page=     - Order listing
//! GET  /notifications?page=         - Notification listing
//! ```

pub mod auth;
pub mod dashboard;
pub mod notifications;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use bakehouse_core::StaffRole;
use serde::Deserialize;

use crate::middleware::access::is_permitted;
use crate::state::AppState;

/// Main navigation, filtered per role.
const NAVIGATION: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/products", "Products"),
    ("/orders-management", "Orders"),
    ("/notifications", "Notifications"),
];

/// One navigation entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Layout data shared by every page: navigation and who is signed in.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    pub nav: Vec<NavLink>,
    pub role: String,
}

impl Chrome {
    /// Navigation for `role`, highlighting `current`.
    #[must_use]
    pub fn for_staff(role: Option<StaffRole>, current: &str) -> Self {
        Self {
            nav: NAVIGATION
                .iter()
                .filter(|(href, _)| is_permitted(href, role))
                .map(|&(href, label)| NavLink {
                    href,
                    label,
                    active: href == current,
                })
                .collect(),
            role: role.map(StaffRole::as_str).unwrap_or_default().to_string(),
        }
    }

    /// Layout for the login page.
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(&self) -> bool {
        !self.role.is_empty()
    }
}

/// Parse a 1-based `?page=` value. Missing, zero or malformed means 1.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> u64 {
    raw.and_then(|p| p.trim().parse::<u64>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}

/// `?page=N` query.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    #[must_use]
    pub fn page(&self) -> u64 {
        parse_page(self.page.as_deref())
    }
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create all routes for admin.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Overview
        .route("/", get(dashboard::dashboard))
        .route("/dashboard", get(dashboard::dashboard))
        // Products
        .route("/products", get(products::index))
        .route("/products/select", get(products::toggle_row))
        .route("/products/select-all", get(products::toggle_all))
        .route("/products/bulk", post(products::bulk))
        // Orders and notifications
        .route("/orders-management", get(orders::index))
        .route("/notifications", get(notifications::index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hrefs(chrome: &Chrome) -> Vec<&str> {
        chrome.nav.iter().map(|link| link.href).collect()
    }

    #[test]
    fn navigation_follows_role() {
        let admin = Chrome::for_staff(Some(StaffRole::Admin), "/products");
        assert_eq!(hrefs(&admin).len(), 4);
        assert!(admin.nav.iter().any(|l| l.href == "/products" && l.active));

        let stock = Chrome::for_staff(Some(StaffRole::StockManager), "/products");
        assert_eq!(hrefs(&stock), ["/products", "/notifications"]);
        assert_eq!(stock.role, "stock_manager");
    }

    #[test]
    fn signed_out_has_no_navigation() {
        let chrome = Chrome::signed_out();
        assert!(chrome.nav.is_empty());
        assert!(!chrome.signed_in());
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("x")), 1);
        assert_eq!(parse_page(Some("3")), 3);
    }
}
