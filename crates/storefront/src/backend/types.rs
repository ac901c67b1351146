//! Records returned by the bakery API.

use bakehouse_core::{
    AddressId, BlogId, CartId, CartItemId, CustomerId, OrderId, OrderStatus, Price, ProductId,
    ProductStatus, VariantId,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    /// Price of the cheapest variant, when the API includes one.
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub hot_deal: bool,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl Product {
    /// Whether the product can currently be ordered.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self.status, None | Some(ProductStatus::Available))
    }
}

/// A sellable size or flavour of a product.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: Option<Price>,
}

/// The signed-in customer's cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub applied_coupon_name: Option<String>,
    #[serde(default)]
    pub total_price: Price,
    #[serde(default)]
    pub discounted_amount: Option<Price>,
    #[serde(default)]
    pub shipping_cost: Option<Price>,
    #[serde(default)]
    pub vat_amount: Option<Price>,
    /// Amount due, including shipping and VAT.
    #[serde(default)]
    pub total_with_vat: Option<Price>,
    #[serde(default)]
    pub delivery_address: Option<Address>,
}

impl Cart {
    /// Amount the customer will be charged.
    #[must_use]
    pub fn amount_due(&self) -> Price {
        self.total_with_vat.unwrap_or(self.total_price)
    }
}

/// One line of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_variant: CartVariant,
    pub quantity: u32,
    #[serde(default)]
    pub item_price: Price,
}

/// The variant a cart line refers to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartVariant {
    pub id: VariantId,
    #[serde(default)]
    pub name: String,
}

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Address {
    pub id: AddressId,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zipcode: String,
}

impl Address {
    /// Single-line form for display.
    #[must_use]
    pub fn one_line(&self) -> String {
        [&self.address, &self.city, &self.state, &self.zipcode]
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.trim())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Answer to a checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub order_id: Option<OrderId>,
    #[serde(default)]
    pub invoice_file: Option<String>,
}

/// Blog post.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlogPost {
    pub id: BlogId,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub blog_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BlogPost {
    /// Whether `key` is this post's slug or id.
    #[must_use]
    pub fn answers_to(&self, key: &str) -> bool {
        let key = key.trim();
        (!self.slug.is_empty() && self.slug == key) || self.id.to_string() == key
    }

    /// Path of the post's page.
    #[must_use]
    pub fn href(&self) -> String {
        if self.slug.is_empty() {
            format!("/blog/{}", self.id)
        } else {
            format!("/blog/{}", self.slug)
        }
    }
}

/// One of the signed-in customer's orders.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Human-facing order number.
    #[serde(default)]
    pub order_id: Option<String>,
    pub status: OrderStatus,
    pub total_amount: Price,
    #[serde(default)]
    pub final_amount: Option<Price>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Order number to display, falling back to the record id.
    #[must_use]
    pub fn number(&self) -> String {
        self.order_id
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    /// Amount charged after discounts, if known.
    #[must_use]
    pub fn amount_due(&self) -> Price {
        self.final_amount.unwrap_or(self.total_amount)
    }
}

/// Successful login payload.
#[derive(Clone, Deserialize)]
pub struct LoginResponse {
    pub id: CustomerId,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    /// Access token sent back as `Authorization: Bearer`.
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn product_tolerates_sparse_records() {
        let product: Product = serde_json::from_str(r#"{"id": 4, "name": "Sourdough"}"#).unwrap();
        assert_eq!(product.id, ProductId::new(4));
        assert!(product.is_available());
        assert_eq!(product.price, None);
    }

    #[test]
    fn order_number_falls_back_to_id() {
        let order: Order = serde_json::from_str(
            r#"{"id": 12, "status": "in_transit", "total_amount": "18.50"}"#,
        )
        .unwrap();
        assert_eq!(order.number(), "#12");
        assert_eq!(order.amount_due().to_string(), "$18.50");
    }

    #[test]
    fn cart_totals_prefer_the_vat_inclusive_amount() {
        let cart: Cart = serde_json::from_str(
            r#"{
                "id": 3,
                "items": [{"id": 8, "product_variant": {"id": 41, "name": "Rye, large"}, "quantity": 2, "item_price": "9.00"}],
                "total_price": "9.00",
                "total_with_vat": "10.80",
                "delivery_address": {"id": 5, "address": "1 Mill Lane", "city": "York", "state": "", "zipcode": "YO1"}
            }"#,
        )
        .unwrap();
        assert_eq!(cart.items[0].product_variant.id, VariantId::new(41));
        assert_eq!(cart.amount_due().to_string(), "$10.80");
        assert_eq!(
            cart.delivery_address.unwrap().one_line(),
            "1 Mill Lane, York, YO1"
        );
    }

    #[test]
    fn cart_without_vat_charges_the_total() {
        let cart: Cart = serde_json::from_str(r#"{"id": 1, "total_price": "4.00"}"#).unwrap();
        assert!(cart.items.is_empty());
        assert_eq!(cart.amount_due(), Price::from_cents(400));
    }

    #[test]
    fn blog_post_answers_to_slug_or_id() {
        let post: BlogPost =
            serde_json::from_str(r#"{"id": 2, "title": "Meet the bakers", "slug": "bakers"}"#)
                .unwrap();
        assert!(post.answers_to("bakers"));
        assert!(post.answers_to("2"));
        assert!(!post.answers_to("baker"));
        assert_eq!(post.href(), "/blog/bakers");

        let bare: BlogPost = serde_json::from_str(r#"{"id": 9, "title": "Untitled"}"#).unwrap();
        assert!(!bare.answers_to(""));
        assert_eq!(bare.href(), "/blog/9");
    }

    #[test]
    fn login_debug_hides_tokens() {
        let login: LoginResponse = serde_json::from_str(
            r#"{"id": 1, "email": "a@b.co", "role": "customer", "access": "tok-a", "refresh": "tok-r"}"#,
        )
        .unwrap();
        let debug = format!("{login:?}");
        assert!(!debug.contains("tok-a"));
        assert!(!debug.contains("tok-r"));
    }
}
