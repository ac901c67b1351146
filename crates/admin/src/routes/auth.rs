//! Staff login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use bakehouse_core::{Credentials, StaffRole};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::access::landing_page;
use crate::middleware::{end_session, start_session};
use crate::routes::Chrome;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub chrome: Chrome,
    pub email: String,
    pub error: String,
}

impl LoginTemplate {
    fn with_error(email: &str, error: impl Into<String>) -> Self {
        Self {
            chrome: Chrome::signed_out(),
            email: email.trim().to_string(),
            error: error.into(),
        }
    }
}

/// Display the login page.
pub async fn login_page() -> LoginTemplate {
    LoginTemplate::with_error("", "")
}

/// Role from a login response, if that role may use the panel.
fn panel_role(raw: &str) -> Option<(StaffRole, &'static str)> {
    let role: StaffRole = raw.parse().ok()?;
    landing_page(role).map(|landing| (role, landing))
}

/// Handle the login form.
///
/// Staff whose role has a landing page get the session cookies and are sent
/// there. Other accounts are turned away without a session.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let credentials = match Credentials::parse(&form.email, &form.password) {
        Ok(credentials) => credentials,
        Err(e) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                LoginTemplate::with_error(&form.email, e.to_string()),
            )
                .into_response();
        }
    };

    let login = match state.bakery().login(&credentials).await {
        Ok(login) => login,
        Err(BackendError::Unauthorized | BackendError::Forbidden) => {
            tracing::info!("Staff login rejected");
            return (
                StatusCode::UNAUTHORIZED,
                LoginTemplate::with_error(&form.email, "Invalid email or password."),
            )
                .into_response();
        }
        Err(e) => {
            tracing::error!(error = %e, "Staff login request failed");
            return (
                StatusCode::BAD_GATEWAY,
                LoginTemplate::with_error(&form.email, "The bakery API is unavailable."),
            )
                .into_response();
        }
    };

    let Some((role, landing)) = panel_role(&login.role) else {
        tracing::warn!(staff_id = %login.id, role = %login.role, "Login without panel access");
        return (
            StatusCode::FORBIDDEN,
            LoginTemplate::with_error(&form.email, "This account has no access to the admin panel."),
        )
            .into_response();
    };

    set_sentry_user(&login.id, Some(&login.email));
    tracing::info!(staff_id = %login.id, role = %role, "Staff logged in");
    let jar = start_session(jar, login.access, role, state.config().secure_cookies());
    (jar, Redirect::to(landing)).into_response()
}

/// Clear the session and return to the login page.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    clear_sentry_user();
    let jar = end_session(jar, state.config().secure_cookies());
    (jar, Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_panel_roles_may_sign_in() {
        assert_eq!(panel_role("admin"), Some((StaffRole::Admin, "/dashboard")));
        assert_eq!(
            panel_role("accountant"),
            Some((StaffRole::Accountant, "/orders-management"))
        );
        assert_eq!(panel_role("worker"), None);
        assert_eq!(panel_role("customer"), None);
    }

    #[test]
    fn login_page_renders_form() {
        let html = LoginTemplate::with_error("ops@bakehouse.test", "Nope")
            .render()
            .unwrap_or_default();
        assert!(html.contains(r#"action="/login""#));
        assert!(html.contains("ops@bakehouse.test"));
        assert!(html.contains("Nope"));
    }
}
