//! Staff session extractor.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use bakehouse_core::{StaffRole, token_present};
use secrecy::SecretString;

use super::session::{TOKEN_COOKIE, role_from_jar};

/// The signed-in staff member's token and role.
///
/// The access guard has already checked the role against the path; handlers
/// use the token for API calls and the role for navigation.
///
/// # Example
///
/// ```rust,ignore
/// async fn orders(staff: StaffSession) -> impl IntoResponse {
///     // call the API with `staff.token`
/// }
/// ```
pub struct StaffSession {
    pub token: SecretString,
    pub role: Option<StaffRole>,
}

/// Rejection sending the visitor to the login page.
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for StaffSession
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(TOKEN_COOKIE)
            .map(|c| c.value().to_owned())
            .filter(|v| token_present(Some(v)))
            .ok_or(LoginRedirect)?;

        Ok(Self {
            token: SecretString::from(token),
            role: role_from_jar(&jar),
        })
    }
}
