//! Bakery REST API client.
//!
//! Thin `reqwest` wrapper over the backend's list, detail, login, cart and
//! checkout endpoints. Catalog reads (products) are cached with `moka` for 5
//! minutes; anything tied to a customer token is never cached.

mod cache;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use bakehouse_core::{AddressId, CartId, CartItemId, Credentials, ListPage, ProductId, VariantId};
use moka::future::Cache;
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::BakeryApiConfig;

use cache::{CacheKey, CacheValue};
pub use types::{
    Address, BlogPost, Cart, CartItem, CheckoutReceipt, LoginResponse, Order, Product, Variant,
};

/// Blog posts fetched per page while looking one up.
const BLOG_SCAN_PAGE_SIZE: u64 = 50;

/// Blog pages scanned before giving up on a lookup.
const BLOG_SCAN_PAGES: u64 = 10;

/// Errors from the bakery API client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint path could not be joined onto the API root.
    #[error("Invalid endpoint: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Token missing, expired or rejected, or bad login credentials.
    #[error("Unauthorized")]
    Unauthorized,

    /// The API refused the request (400) with a message meant for the customer.
    #[error("Rejected: {0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Client for the bakery REST API.
#[derive(Clone)]
pub struct BakeryClient {
    inner: Arc<BakeryClientInner>,
}

struct BakeryClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl BakeryClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &BakeryApiConfig) -> Result<Self, BackendError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            inner: Arc::new(BakeryClientInner {
                client,
                base_url: config.base_url.clone(),
                cache,
            }),
        })
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&SecretString>,
    ) -> Result<RequestBuilder, BackendError> {
        let url = self.inner.base_url.join(path)?;
        let builder = self.inner.client.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    /// Send a request whose success body is ignored (`204 No Content`).
    async fn execute_empty(&self, request: RequestBuilder) -> Result<(), BackendError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        match status {
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(body)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
            StatusCode::BAD_REQUEST => Err(BackendError::Rejected(
                rejection_message(&body).unwrap_or_else(|| "The request was refused.".to_string()),
            )),
            _ => Err(BackendError::Status {
                status,
                body: body.chars().take(200).collect(),
            }),
        }
    }

    /// Send a request and decode a JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        match status {
            s if s.is_success() => serde_json::from_str(&body).map_err(|e| {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse bakery API response"
                );
                BackendError::Parse(e)
            }),
            StatusCode::NOT_FOUND => Err(BackendError::NotFound(body)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(BackendError::Unauthorized),
            StatusCode::BAD_REQUEST => Err(BackendError::Rejected(
                rejection_message(&body).unwrap_or_else(|| "The request was refused.".to_string()),
            )),
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

    /// Fetch one page of a list endpoint.
    async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u64,
        page_size: u64,
        token: Option<&SecretString>,
    ) -> Result<ListPage<T>, BackendError> {
        let mut url = self.inner.base_url.join(path)?;
        url.query_pairs_mut()
            .append_pair("page", &page.max(1).to_string())
            .append_pair("page_size", &page_size.to_string());

        let mut request = self.inner.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token.expose_secret());
        }
        self.execute(request).await
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Get one page of the product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self, page: u64, page_size: u64) -> Result<ListPage<Product>, BackendError> {
        let key = CacheKey::Products { page, page_size };
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: ListPage<Product> = self.list("products/", page, page_size, None).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Products(products.clone()))
            .await;
        Ok(products)
    }

    /// Get a product by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the product doesn't exist, or an error if the
    /// API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product, BackendError> {
        let key = CacheKey::Product(id);
        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let request = self.request(Method::GET, &format!("products/{id}/"), None)?;
        let product: Product = self.execute(request).await?;
        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(product)
    }

    /// Get one page of blog posts.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn blogs(&self, page: u64, page_size: u64) -> Result<ListPage<BlogPost>, BackendError> {
        self.list("blogs/", page, page_size, None).await
    }

    /// Find a blog post by slug or numeric id.
    ///
    /// The API has no single-post read, so this scans the listing.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no post matches, or an error if the API request
    /// fails.
    #[instrument(skip(self))]
    pub async fn blog(&self, key: &str) -> Result<BlogPost, BackendError> {
        for page in 1..=BLOG_SCAN_PAGES {
            let listing = self.blogs(page, BLOG_SCAN_PAGE_SIZE).await?;
            let exhausted = listing.items.is_empty()
                || page.saturating_mul(BLOG_SCAN_PAGE_SIZE) >= listing.total_count;
            if let Some(post) = listing.items.into_iter().find(|post| post.answers_to(key)) {
                return Ok(post);
            }
            if exhausted {
                break;
            }
        }
        Err(BackendError::NotFound(format!("blog {key}")))
    }

    // =========================================================================
    // Customer
    // =========================================================================

    /// Exchange credentials for tokens.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for rejected credentials, or an error if the
    /// API request fails.
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, BackendError> {
        let request = self
            .request(Method::POST, "login/", None)?
            .json(credentials);
        // The API answers bad credentials with 400.
        match self.execute(request).await {
            Err(BackendError::Rejected(_)) => Err(BackendError::Unauthorized),
            other => other,
        }
    }

    /// Get one page of the signed-in customer's orders.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token is rejected, or an error if the
    /// API request fails.
    #[instrument(skip(self, token))]
    pub async fn customer_orders(
        &self,
        token: &SecretString,
        page: u64,
        page_size: u64,
    ) -> Result<ListPage<Order>, BackendError> {
        self.list("orders/", page, page_size, Some(token)).await
    }

    // =========================================================================
    // Cart and checkout
    // =========================================================================

    /// Get (or open) the signed-in customer's cart.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token is rejected, or an error if the
    /// API request fails.
    #[instrument(skip(self, token))]
    pub async fn cart(&self, token: &SecretString) -> Result<Cart, BackendError> {
        let request = self
            .request(Method::POST, "cart/", Some(token))?
            .json(&json!({}));
        self.execute(request).await
    }

    /// Add `quantity` of a variant to the cart.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` with the API's message if the variant can't be
    /// added, or an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn add_to_cart(
        &self,
        token: &SecretString,
        variant: VariantId,
        quantity: u32,
    ) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, "cart/item/", Some(token))?
            .json(&json!({ "product_variant": variant, "quantity": quantity }));
        self.execute_empty(request).await
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the line is gone, or an error if the API request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn remove_cart_item(
        &self,
        token: &SecretString,
        item: CartItemId,
    ) -> Result<(), BackendError> {
        let request = self.request(Method::DELETE, &format!("cart/item/{item}/"), Some(token))?;
        self.execute_empty(request).await
    }

    /// Apply a coupon code to a cart.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` with the API's message for an unknown or expired
    /// code, or an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn apply_coupon(
        &self,
        token: &SecretString,
        cart: CartId,
        code: &str,
    ) -> Result<(), BackendError> {
        let request = self
            .request(Method::POST, "apply/coupon/", Some(token))?
            .json(&json!({ "coupon_code": code, "cart_id": cart }));
        // Unknown codes come back as 404 with a `detail`.
        match self.execute_empty(request).await {
            Err(BackendError::NotFound(body)) => Err(BackendError::Rejected(
                rejection_message(&body).unwrap_or_else(|| "Invalid coupon code.".to_string()),
            )),
            other => other,
        }
    }

    /// Place an order for the cart's contents.
    ///
    /// Payment is collected outside the storefront; the receipt carries the
    /// new order id and, when the API produced one, an invoice link.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` with the API's message (empty cart, missing
    /// address, ordering paused), or an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn checkout(
        &self,
        token: &SecretString,
        address: Option<AddressId>,
    ) -> Result<CheckoutReceipt, BackendError> {
        let body = match address {
            Some(id) => json!({ "shipping_address_id": id }),
            None => json!({}),
        };
        let request = self
            .request(Method::POST, "checkout/", Some(token))?
            .json(&body);
        self.execute(request).await
    }
}

/// Customer-facing text from an API error body.
///
/// Looks at `message`, `detail` and `error`, then the first field error.
fn rejection_message(body: &str) -> Option<String> {
    fn text(value: &Value) -> Option<String> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Array(items) => items.iter().find_map(text),
            _ => None,
        }
    }

    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| object.get(*key).and_then(text))
        .or_else(|| object.values().find_map(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_message_prefers_named_fields() {
        assert_eq!(
            rejection_message(r#"{"message": "Your cart is empty"}"#).as_deref(),
            Some("Your cart is empty")
        );
        assert_eq!(
            rejection_message(r#"{"detail": "Invalid coupon code"}"#).as_deref(),
            Some("Invalid coupon code")
        );
        assert_eq!(
            rejection_message(r#"{"error": "Coupon expired"}"#).as_deref(),
            Some("Coupon expired")
        );
    }

    #[test]
    fn rejection_message_falls_back_to_field_errors() {
        assert_eq!(
            rejection_message(r#"{"quantity": ["Ensure this value is greater than 0."]}"#)
                .as_deref(),
            Some("Ensure this value is greater than 0.")
        );
    }

    #[test]
    fn rejection_message_ignores_non_json() {
        assert_eq!(rejection_message("<html>Bad Request</html>"), None);
        assert_eq!(rejection_message(r#"{"message": "  "}"#), None);
    }
}
