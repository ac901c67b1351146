//! Login and logout.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use bakehouse_core::Credentials;
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{SignedIn, clear_token_cookie, token_cookie};
use crate::state::AppState;

/// Where a successful login lands.
pub const AFTER_LOGIN: &str = "/dashboard";

/// Login form fields.
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
    pub email: String,
    pub signed_in: bool,
    pub error: String,
}

impl LoginTemplate {
    fn failed(email: &str, error: impl Into<String>) -> Self {
        Self {
            email: email.trim().to_string(),
            signed_in: false,
            error: error.into(),
        }
    }
}

/// Display the login page.
pub async fn login_page(SignedIn(signed_in): SignedIn) -> LoginTemplate {
    LoginTemplate {
        email: String::new(),
        signed_in,
        error: String::new(),
    }
}

/// Handle the login form.
///
/// On success the access token is stored in the `token` cookie and the
/// customer is sent to the dashboard. Failures re-render the form.
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
                LoginTemplate::failed(&form.email, e.to_string()),
            )
                .into_response();
        }
    };

    match state.bakery().login(&credentials).await {
        Ok(login) => {
            set_sentry_user(&login.id, Some(&login.email));
            tracing::info!(customer_id = %login.id, "Customer logged in");
            let cookie = token_cookie(login.access, state.config().secure_cookies());
            (jar.add(cookie), Redirect::to(AFTER_LOGIN)).into_response()
        }
        Err(BackendError::Unauthorized) => {
            tracing::info!("Login rejected");
            (
                StatusCode::UNAUTHORIZED,
                LoginTemplate::failed(&form.email, "Invalid email or password."),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Login request failed");
            (
                StatusCode::BAD_GATEWAY,
                LoginTemplate::failed(
                    &form.email,
                    "We couldn't reach the bakery. Please try again.",
                ),
            )
                .into_response()
        }
    }
}

/// Clear the session and return to the home page.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    clear_sentry_user();
    let cookie = clear_token_cookie(state.config().secure_cookies());
    (jar.add(cookie), Redirect::to("/"))
}
