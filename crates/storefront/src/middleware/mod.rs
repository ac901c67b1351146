//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame options, etc.)
//! 5. Route guard (redirect tokenless requests for private pages)

pub mod auth;
pub mod request_id;
pub mod route_guard;
pub mod security_headers;
pub mod session;

pub use auth::{RequireToken, SignedIn};
pub use request_id::request_id_middleware;
pub use route_guard::route_guard_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{TOKEN_COOKIE, clear_token_cookie, token_cookie};
