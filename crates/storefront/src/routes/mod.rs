//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home page (also /home)
//! GET  /about-us          - About page
//! GET  /health            - Health check
//!
//! # Catalog
//! GET  /products?page=N   - Product listing
//! GET  /products/{id}     - Product detail
//! GET  /blog?page=N       - Blog listing
//! GET  /blog/{key}        - Blog post, by slug or id
//!
//! # Auth
//! GET  /login             - Login page
//! POST /login             - Login action (sets the `token` cookie)
//! POST /logout            - Logout action
//!
//! # Account (guarded, requires the `token` cookie)
//! GET  /dashboard         - Overview with recent orders
//! GET  /profile?page=N    - Order history
//!
//! # Cart and checkout (requires the `token` cookie)
//! GET  /billing                     - Cart, delivery address, coupon form
//! POST /cart/items                  - Add a product variant to the cart
//! POST /billing/items/{id}/remove   - Remove a cart line
//! POST /billing/coupon              - Apply a coupon code
//! POST /billing/checkout            - Place the order, show the confirmation
//! ```

pub mod account;
pub mod auth;
pub mod blog;
pub mod cart;
pub mod pages;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;

/// `?page=N` query. Missing, zero or malformed values mean the first page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// The requested 1-based page.
    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1)
    }
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/home", get(pages::home))
        .route("/about-us", get(pages::about_us))
        .route("/health", get(health))
        // Catalog
        .route("/products", get(products::index))
        .route("/products/{id}", get(products::show))
        .route("/blog", get(blog::index))
        .route("/blog/{key}", get(blog::show))
        // Auth
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Account
        .route("/dashboard", get(account::dashboard))
        .route("/profile", get(account::profile))
        // Cart and checkout
        .route("/billing", get(cart::billing))
        .route("/cart/items", post(cart::add_item))
        .route("/billing/items/{id}/remove", post(cart::remove_item))
        .route("/billing/coupon", post(cart::apply_coupon))
        .route("/billing/checkout", post(cart::checkout))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(String::from),
        }
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(query(None).page(), 1);
        assert_eq!(query(Some("0")).page(), 1);
        assert_eq!(query(Some("-2")).page(), 1);
        assert_eq!(query(Some("abc")).page(), 1);
        assert_eq!(query(Some(" 4 ")).page(), 4);
    }
}
