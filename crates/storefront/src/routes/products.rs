//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use bakehouse_components::{PageLinks, Pagination};
use bakehouse_core::{PaginationState, ProductId, VariantId};
use tracing::instrument;

use crate::backend::Product;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::SignedIn;
use crate::routes::PageQuery;
use crate::state::AppState;

/// Products shown per catalog page.
pub const PRODUCTS_PER_PAGE: u64 = 12;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub status: &'static str,
    pub available: bool,
    pub hot_deal: bool,
    pub options: Vec<VariantOption>,
}

/// A choice in the add-to-cart form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOption {
    pub id: VariantId,
    pub label: String,
}

/// Add-to-cart choices for a product.
///
/// Products listed without variants are ordered under their own id.
fn variant_options(product: &Product) -> Vec<VariantOption> {
    if product.variants.is_empty() {
        return vec![VariantOption {
            id: VariantId::new(product.id.as_i64()),
            label: product.name.clone(),
        }];
    }
    product
        .variants
        .iter()
        .map(|variant| VariantOption {
            id: variant.id,
            label: match variant.price {
                Some(price) if !variant.name.is_empty() => format!("{} ({price})", variant.name),
                _ if !variant.name.is_empty() => variant.name.clone(),
                Some(price) => price.to_string(),
                None => format!("Option {}", variant.id),
            },
        })
        .collect()
}

impl From<Product> for ProductCard {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            options: variant_options(&product),
            available: product.is_available(),
            status: product.status.unwrap_or_default().label(),
            price: product
                .price
                .map_or_else(|| "Price on request".to_string(), |p| p.to_string()),
            image: product.image.unwrap_or_default(),
            name: product.name,
            description: product.description,
            hot_deal: product.hot_deal,
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductCard>,
    pub pagination_html: String,
    pub signed_in: bool,
    pub error: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductCard,
    pub signed_in: bool,
    pub error: String,
}

/// Display the product listing page.
///
/// A failing catalog request renders an empty page with an error banner.
#[instrument(skip(state, signed_in))]
pub async fn index(
    State(state): State<AppState>,
    SignedIn(signed_in): SignedIn,
    Query(query): Query<PageQuery>,
) -> ProductsIndexTemplate {
    let page = query.page();

    let (listing, error) = match state.bakery().products(page, PRODUCTS_PER_PAGE).await {
        Ok(listing) => (listing, String::new()),
        Err(e) => {
            tracing::error!(error = %e, page, "Failed to fetch products");
            (
                bakehouse_core::ListPage::empty(),
                "We couldn't load the catalog. Please try again shortly.".to_string(),
            )
        }
    };

    let pagination = Pagination::new(
        PaginationState::new(page, PRODUCTS_PER_PAGE, listing.total_count),
        &PageLinks::new("/products"),
    );

    ProductsIndexTemplate {
        products: listing.items.into_iter().map(ProductCard::from).collect(),
        pagination_html: pagination.to_html(),
        signed_in,
        error,
    }
}

/// Display a product detail page.
///
/// # Errors
///
/// Returns 404 if the id is malformed or the product doesn't exist.
#[instrument(skip(state, signed_in))]
pub async fn show(
    State(state): State<AppState>,
    SignedIn(signed_in): SignedIn,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {id}")))?;
    let product = state.bakery().product(id).await?;

    Ok(ProductShowTemplate {
        product: product.into(),
        signed_in,
        error: String::new(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn product_without_variants_is_ordered_by_its_id() {
        let product: Product = serde_json::from_str(r#"{"id": 4, "name": "Sourdough"}"#).unwrap();
        assert_eq!(
            variant_options(&product),
            vec![VariantOption {
                id: VariantId::new(4),
                label: "Sourdough".to_string(),
            }]
        );
    }

    #[test]
    fn variant_labels_include_price() {
        let product: Product = serde_json::from_str(
            r#"{"id": 4, "name": "Sourdough", "variants": [
                {"id": 40, "name": "Small", "price": "4.00"},
                {"id": 41, "name": "", "price": "7.50"}
            ]}"#,
        )
        .unwrap();
        let labels: Vec<String> = variant_options(&product).into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Small ($4.00)", "$7.50"]);
    }
}
