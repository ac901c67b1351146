//! HTTP middleware stack for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (stricter than storefront, no external sources)
//! 4. Access guard (token and role check for every staff page)

pub mod access;
pub mod auth;
pub mod session;

pub use access::access_guard_middleware;
pub use auth::StaffSession;
pub use session::{ROLE_COOKIE, TOKEN_COOKIE, end_session, start_session};
