//! Session token extractors.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use bakehouse_core::token_present;
use secrecy::SecretString;

use super::session::TOKEN_COOKIE;

fn read_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    let value = jar.get(TOKEN_COOKIE).map(|c| c.value().to_owned());
    token_present(value.as_deref()).then(|| value.unwrap_or_default())
}

/// Extractor that requires a session token.
///
/// The route guard already redirects tokenless requests for private pages;
/// this extractor hands the token to the handler and redirects as a fallback.
///
/// # Example
///
/// ```rust,ignore
/// async fn profile(RequireToken(token): RequireToken) -> impl IntoResponse {
///     // call the API with `token`
/// }
/// ```
pub struct RequireToken(pub SecretString);

/// Rejection sending the visitor to the login page.
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireToken
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        read_token(parts)
            .map(|token| Self(SecretString::from(token)))
            .ok_or(LoginRedirect)
    }
}

/// Whether the visitor has a session, for navigation links.
pub struct SignedIn(pub bool);

impl<S> FromRequestParts<S> for SignedIn
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_token(parts).is_some()))
    }
}
