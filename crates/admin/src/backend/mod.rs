//! Bakery REST API client for staff operations.
//!
//! Every call except login carries the staff member's bearer token. Nothing
//! is cached: admin views must reflect writes immediately.

pub mod types;

use std::sync::Arc;

use bakehouse_core::{Credentials, ListPage, ProductId};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::BakeryApiConfig;

pub use types::{AdminOrder, AdminProduct, BulkAction, Notification, NotificationKind, StaffLogin};

/// Errors from the bakery API client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Token missing or expired, or bad login credentials.
    #[error("Unauthorized")]
    Unauthorized,

    /// Token valid but the staff role may not perform the call.
    #[error("Forbidden")]
    Forbidden,

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Client for the bakery REST API.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl AdminClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BakeryApiConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                base_url: config.base_url.clone(),
            }),
        })
    }

    fn request(
        &self,
        method: Method,
        url: Url,
        token: Option<&SecretString>,
    ) -> RequestBuilder {
        let builder = self.inner.client.request(method, url);
        match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    /// Send a request and return the body of a success response.
    async fn send(&self, request: RequestBuilder) -> Result<String, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        match status {
            s if s.is_success() => Ok(body),
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(body)),
            StatusCode::UNAUTHORIZED => Err(BackendError::Unauthorized),
            StatusCode::FORBIDDEN => Err(BackendError::Forbidden),
            _ => {
                tracing::error!(
                    status = %status,
                    body = %body.chars().take(500).collect::<String>(),
                    "Bakery API returned non-success status"
                );
                Err(BackendError::Status {
                    status,
                    body: body.chars().take(200).collect(),
                })
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse bakery API response"
            );
            BackendError::Parse(e)
        })
    }

    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u64,
        page_size: u64,
        token: &SecretString,
    ) -> Result<ListPage<T>, BackendError> {
        let mut url = self.inner.base_url.join(path)?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string())
            .append_pair("page_size", &page_size.to_string());
        self.execute(self.request(Method::GET, url, Some(token)))
            .await
    }

    /// Exchange staff credentials for tokens.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for rejected credentials, or an error if the
    /// API request fails.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<StaffLogin, BackendError> {
        let url = self.inner.base_url.join("login/")?;
        let request = self.request(Method::POST, url, None).json(credentials);
        match self.execute(request).await {
            Err(BackendError::Status { status, .. }) if status == StatusCode::BAD_REQUEST => {
                Err(BackendError::Unauthorized)
            }
            other => other,
        }
    }

    /// Get one page of the product catalog, drafts included.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn products(
        &self,
        token: &SecretString,
        page: u64,
        page_size: u64,
    ) -> Result<ListPage<AdminProduct>, BackendError> {
        self.list("products/", page, page_size, token).await
    }

    /// Get one page of all customer orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn orders(
        &self,
        token: &SecretString,
        page: u64,
        page_size: u64,
    ) -> Result<ListPage<AdminOrder>, BackendError> {
        self.list("orders/", page, page_size, token).await
    }

    /// Get one page of the staff member's notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn notifications(
        &self,
        token: &SecretString,
        page: u64,
        page_size: u64,
    ) -> Result<ListPage<Notification>, BackendError> {
        self.list("notification/", page, page_size, token).await
    }

    /// Apply `action` to every product in `ids`.
    ///
    /// # Errors
    ///
    /// Returns `Forbidden` if the staff role may not edit products, or an
    /// error if the API request fails.
    #[instrument(skip(self, token, ids), fields(action = %action, count = ids.len()))]
    pub async fn bulk_products(
        &self,
        token: &SecretString,
        action: BulkAction,
        ids: &[ProductId],
    ) -> Result<(), BackendError> {
        let url = self.inner.base_url.join("bulk-product-update/")?;
        let request = self
            .request(action.method(), url, Some(token))
            .json(&action.body(ids));
        self.send(request).await?;
        tracing::info!("Bulk product action applied");
        Ok(())
    }
}
