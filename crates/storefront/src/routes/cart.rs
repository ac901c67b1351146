//! Cart and checkout.
//!
//! `/billing` is the cart page: line items, totals, the saved delivery
//! address and a coupon form. Checkout asks the bakery API to turn the cart
//! into an order; payment happens outside the storefront.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use bakehouse_core::{CartItemId, OrderId, Price, VariantId};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::backend::{Address, BackendError, Cart, CheckoutReceipt};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireToken;
use crate::state::AppState;

/// Largest quantity accepted from the add-to-cart form.
pub const MAX_QUANTITY: u32 = 99;

const CART_UNAVAILABLE: &str = "We couldn't load your cart. Please try again shortly.";

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub id: CartItemId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/billing.html")]
pub struct BillingTemplate {
    pub lines: Vec<CartLine>,
    pub coupon: String,
    pub subtotal: String,
    pub discount: String,
    pub shipping: String,
    pub vat: String,
    pub total: String,
    pub address: String,
    pub notice: String,
    pub signed_in: bool,
    pub error: String,
}

impl BillingTemplate {
    fn new(cart: Option<&Cart>, notice: &str, error: impl Into<String>) -> Self {
        let shown = |price: Option<Price>| price.map(|p| p.to_string()).unwrap_or_default();
        let Some(cart) = cart else {
            return Self {
                lines: Vec::new(),
                coupon: String::new(),
                subtotal: String::new(),
                discount: String::new(),
                shipping: String::new(),
                vat: String::new(),
                total: String::new(),
                address: String::new(),
                notice: notice.to_string(),
                signed_in: true,
                error: error.into(),
            };
        };

        Self {
            lines: cart
                .items
                .iter()
                .map(|item| CartLine {
                    id: item.id,
                    name: item.product_variant.name.clone(),
                    quantity: item.quantity,
                    price: item.item_price.to_string(),
                })
                .collect(),
            coupon: cart.applied_coupon_name.clone().unwrap_or_default(),
            subtotal: cart.total_price.to_string(),
            discount: shown(cart.discounted_amount.filter(|d| !d.amount().is_zero())),
            shipping: shown(cart.shipping_cost),
            vat: shown(cart.vat_amount),
            total: cart.amount_due().to_string(),
            address: cart
                .delivery_address
                .as_ref()
                .map(Address::one_line)
                .unwrap_or_default(),
            notice: notice.to_string(),
            signed_in: true,
            error: error.into(),
        }
    }
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "account/thank_you.html")]
pub struct ThankYouTemplate {
    pub order_id: OrderId,
    pub invoice: String,
    pub signed_in: bool,
    pub error: String,
}

/// `?notice=` set by the redirects after a cart change.
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

impl NoticeQuery {
    /// Banner text for a known notice.
    #[must_use]
    pub fn text(&self) -> &'static str {
        match self.notice.as_deref() {
            Some("added") => "Added to your cart.",
            Some("removed") => "Removed from your cart.",
            Some("coupon") => "Coupon applied.",
            _ => "",
        }
    }
}

/// Add-to-cart form fields.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    #[serde(default)]
    pub variant: String,
    #[serde(default)]
    pub quantity: String,
}

impl AddItemForm {
    /// The variant and a quantity clamped to `1..=MAX_QUANTITY`.
    ///
    /// A blank quantity means one.
    fn parse(&self) -> Option<(VariantId, u32)> {
        let variant = self.variant.parse().ok()?;
        let quantity = match self.quantity.trim() {
            "" => 1,
            q => q.parse::<u32>().ok().filter(|q| *q > 0)?,
        };
        Some((variant, quantity.min(MAX_QUANTITY)))
    }
}

/// Coupon form fields.
#[derive(Debug, Deserialize)]
pub struct CouponForm {
    #[serde(default)]
    pub code: String,
}

/// Load the cart, degrading to an error banner on backend failure.
///
/// A rejected token is not degraded; it ends the session.
async fn load_cart(state: &AppState, token: &SecretString) -> Result<(Option<Cart>, String)> {
    match state.bakery().cart(token).await {
        Ok(cart) => Ok((Some(cart), String::new())),
        Err(BackendError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch cart");
            Ok((None, CART_UNAVAILABLE.to_string()))
        }
    }
}

/// Re-render the cart page with a message from a refused action.
async fn refused(state: &AppState, token: &SecretString, message: String) -> Result<Response> {
    let (cart, _) = load_cart(state, token).await?;
    Ok((
        StatusCode::UNPROCESSABLE_ENTITY,
        BillingTemplate::new(cart.as_ref(), "", message),
    )
        .into_response())
}

/// Display the cart.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip_all)]
pub async fn billing(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
    Query(query): Query<NoticeQuery>,
) -> Result<BillingTemplate> {
    let (cart, error) = load_cart(&state, &token).await?;
    Ok(BillingTemplate::new(cart.as_ref(), query.text(), error))
}

/// Add a product variant to the cart.
///
/// # Errors
///
/// Returns 400 for a malformed form, or redirects to login if the API
/// rejects the token.
#[instrument(skip(state, token))]
pub async fn add_item(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
    Form(form): Form<AddItemForm>,
) -> Result<Response> {
    let (variant, quantity) = form
        .parse()
        .ok_or_else(|| AppError::BadRequest("Choose a product and a quantity.".to_string()))?;

    match state.bakery().add_to_cart(&token, variant, quantity).await {
        Ok(()) => {
            tracing::info!(variant = %variant, quantity, "Added to cart");
            Ok(Redirect::to("/billing?notice=added").into_response())
        }
        Err(BackendError::Rejected(message)) => refused(&state, &token, message).await,
        Err(e) => Err(e.into()),
    }
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns 404 for a malformed id, or redirects to login if the API rejects
/// the token.
#[instrument(skip(state, token))]
pub async fn remove_item(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id: CartItemId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("cart item {id}")))?;

    match state.bakery().remove_cart_item(&token, id).await {
        // Already gone.
        Ok(()) | Err(BackendError::NotFound(_)) => Ok(Redirect::to("/billing?notice=removed")),
        Err(e) => Err(e.into()),
    }
}

/// Apply a coupon code to the cart.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip_all)]
pub async fn apply_coupon(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
    Form(form): Form<CouponForm>,
) -> Result<Response> {
    let code = form.code.trim();
    if code.is_empty() {
        return refused(&state, &token, "Enter a coupon code.".to_string()).await;
    }

    let cart = state.bakery().cart(&token).await?;
    match state.bakery().apply_coupon(&token, cart.id, code).await {
        Ok(()) => Ok(Redirect::to("/billing?notice=coupon").into_response()),
        Err(BackendError::Rejected(message)) => refused(&state, &token, message).await,
        Err(e) => Err(e.into()),
    }
}

/// Place the order.
///
/// The cart's saved delivery address is sent along. A placed order renders
/// the confirmation page; a refusal re-renders the cart with the reason.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
) -> Result<Response> {
    let cart = state.bakery().cart(&token).await?;
    if cart.items.is_empty() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            BillingTemplate::new(Some(&cart), "", "Your cart is empty"),
        )
            .into_response());
    }

    let address = cart.delivery_address.as_ref().map(|a| a.id);
    match state.bakery().checkout(&token, address).await {
        Ok(CheckoutReceipt {
            order_id: Some(order_id),
            invoice_file,
            ..
        }) => {
            tracing::info!(order_id = %order_id, "Order placed");
            Ok(ThankYouTemplate {
                order_id,
                invoice: invoice_file.unwrap_or_default(),
                signed_in: true,
                error: String::new(),
            }
            .into_response())
        }
        // Accepted without an order, e.g. accounts the bakery handles by hand.
        Ok(CheckoutReceipt { message, .. }) | Err(BackendError::Rejected(message)) => {
            tracing::info!(message = %message, "Checkout refused");
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                BillingTemplate::new(Some(&cart), "", message),
            )
                .into_response())
        }
        Err(e) => Err(e.into()),
    }
}
