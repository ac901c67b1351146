//! Product listing with row selection and bulk actions.
//!
//! The selection lives in the query string (`selected=1,2,3`). Every checkbox
//! is a link to a toggle endpoint that computes the next selection and
//! redirects back to the listing, so the listing itself stays a pure view of
//! `(page, selected)`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use bakehouse_components::{Checkbox, PageLinks, Pagination, TableComponent};
use bakehouse_core::{
    ColumnSpec, HeadingVariant, ListPage, PaginationState, ProductId, RowSelection,
};
use serde::Deserialize;
use tracing::instrument;
use url::form_urlencoded;

use crate::backend::{AdminProduct, BackendError, BulkAction};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::StaffSession;
use crate::routes::{Chrome, parse_page};
use crate::state::AppState;

/// Products per page.
pub const PRODUCTS_PER_PAGE: u64 = 10;

const LISTING_PATH: &str = "/products";

fn columns() -> ColumnSpec {
    ColumnSpec::from_identifiers(["checkbox", "Name", "Status", "Price", "Action"])
}

fn selection_of(raw: Option<&str>) -> RowSelection<ProductId> {
    raw.map(RowSelection::from_param).unwrap_or_default()
}

fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        if !value.is_empty() {
            query.append_pair(key, value);
        }
    }
    format!("{path}?{}", query.finish())
}

/// Listing URL for `page` with `selection` carried along.
#[must_use]
pub fn listing_href(page: u64, selection: &RowSelection<ProductId>) -> String {
    PageLinks::new(LISTING_PATH)
        .with_param("selected", selection.to_param())
        .page(page)
}

fn toggle_row_href(id: ProductId, page: u64, selection: &RowSelection<ProductId>) -> String {
    with_query(
        "/products/select",
        &[
            ("id", id.to_string()),
            ("page", page.to_string()),
            ("selected", selection.to_param()),
        ],
    )
}

fn toggle_all_href(visible: &[ProductId], page: u64, selection: &RowSelection<ProductId>) -> String {
    let visible: RowSelection<ProductId> = visible.iter().copied().collect();
    with_query(
        "/products/select-all",
        &[
            ("visible", visible.to_param()),
            ("page", page.to_string()),
            ("selected", selection.to_param()),
        ],
    )
}

/// Product row display data.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: ProductId,
    pub checkbox_html: String,
    pub name: String,
    pub state: &'static str,
    pub badge: &'static str,
    pub price: String,
    pub hot_deal: bool,
    pub page: u64,
}

#[derive(Template)]
#[template(path = "partials/product_rows.html")]
struct ProductRowsTemplate<'a> {
    rows: &'a [ProductRow],
}

/// Render the products table for one page and selection.
fn product_table(
    products: &[AdminProduct],
    page: u64,
    selection: &RowSelection<ProductId>,
) -> Result<String> {
    let visible: Vec<ProductId> = products.iter().map(|p| p.id).collect();
    let rows: Vec<ProductRow> = products
        .iter()
        .map(|product| ProductRow {
            id: product.id,
            checkbox_html: Checkbox::new(
                selection.contains(product.id),
                toggle_row_href(product.id, page, selection),
            )
            .with_label(format!("Select {}", product.name))
            .to_html(),
            name: product.name.clone(),
            state: product.state_label(),
            badge: product.state_badge(),
            price: product.price.map(|p| p.to_string()).unwrap_or_default(),
            hot_deal: product.hot_deal,
            page,
        })
        .collect();

    let select_all = if visible.is_empty() {
        Checkbox::disabled(false)
    } else {
        Checkbox::new(
            selection.all_selected(&visible),
            toggle_all_href(&visible, page, selection),
        )
    }
    .with_label("Select all");

    let rows_html = ProductRowsTemplate { rows: &rows }.render()?;
    Ok(TableComponent::build(&columns(), &select_all, HeadingVariant::ProductsListing, rows_html)
        .with_empty_message("No products found.")
        .to_html())
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingQuery {
    pub page: Option<String>,
    pub selected: Option<String>,
    /// Bulk action that just succeeded, for the confirmation banner.
    pub done: Option<String>,
}

#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub chrome: Chrome,
    pub table_html: String,
    pub pagination_html: String,
    pub selected: String,
    pub selected_count: usize,
    pub page: u64,
    pub notice: String,
    pub error: String,
}

/// Display the products listing.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip(state, staff))]
pub async fn index(
    State(state): State<AppState>,
    staff: StaffSession,
    Query(query): Query<ListingQuery>,
) -> Result<ProductsTemplate> {
    let page = parse_page(query.page.as_deref());
    let selection = selection_of(query.selected.as_deref());

    let (products, error) = match state
        .bakery()
        .products(&staff.token, page, PRODUCTS_PER_PAGE)
        .await
    {
        Ok(products) => (products, String::new()),
        Err(BackendError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            tracing::error!(error = %e, page, "Failed to fetch products");
            (
                ListPage::empty(),
                "Products could not be loaded. Please try again.".to_string(),
            )
        }
    };

    let pagination = Pagination::new(
        PaginationState::new(page, PRODUCTS_PER_PAGE, products.total_count),
        &PageLinks::new(LISTING_PATH).with_param("selected", selection.to_param()),
    );

    let notice = query
        .done
        .as_deref()
        .and_then(|raw| raw.parse::<BulkAction>().ok())
        .map(|action| format!("Selected products {}.", action.done_label()))
        .unwrap_or_default();

    Ok(ProductsTemplate {
        chrome: Chrome::for_staff(staff.role, LISTING_PATH),
        table_html: product_table(&products.items, page, &selection)?,
        pagination_html: pagination.to_html(),
        selected: selection.to_param(),
        selected_count: selection.len(),
        page,
        notice,
        error,
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct ToggleRowQuery {
    pub id: Option<String>,
    pub page: Option<String>,
    pub selected: Option<String>,
}

/// Flip one row and return to the listing.
pub async fn toggle_row(Query(query): Query<ToggleRowQuery>) -> Redirect {
    let mut selection = selection_of(query.selected.as_deref());
    if let Some(id) = query.id.as_deref().and_then(|id| id.trim().parse().ok()) {
        selection.toggle(id);
    }
    Redirect::to(&listing_href(parse_page(query.page.as_deref()), &selection))
}

#[derive(Debug, Default, Deserialize)]
pub struct ToggleAllQuery {
    /// Ids of the rows on the page the select-all box was clicked on.
    pub visible: Option<String>,
    pub page: Option<String>,
    pub selected: Option<String>,
}

/// Select every visible row, or clear the selection if all already are.
pub async fn toggle_all(Query(query): Query<ToggleAllQuery>) -> Redirect {
    let mut selection = selection_of(query.selected.as_deref());
    let visible: Vec<ProductId> = selection_of(query.visible.as_deref()).iter().collect();
    selection.toggle_all(&visible);
    Redirect::to(&listing_href(parse_page(query.page.as_deref()), &selection))
}

#[derive(Debug, Deserialize)]
pub struct BulkForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub selected: String,
    #[serde(default)]
    pub page: Option<String>,
}

/// Apply a bulk action to the selection.
///
/// On success the selection is cleared and the listing reloads with a
/// confirmation.
///
/// # Errors
///
/// `400` for an unknown action or an empty selection; backend failures map
/// through [`AppError`].
#[instrument(skip_all)]
pub async fn bulk(
    State(state): State<AppState>,
    staff: StaffSession,
    Form(form): Form<BulkForm>,
) -> Result<Redirect> {
    let action: BulkAction = form.action.parse().map_err(AppError::BadRequest)?;
    let selection = selection_of(Some(&form.selected));
    if selection.is_empty() {
        return Err(AppError::BadRequest(
            "Select at least one product first.".to_string(),
        ));
    }

    let ids: Vec<ProductId> = selection.iter().collect();
    state
        .bakery()
        .bulk_products(&staff.token, action, &ids)
        .await?;

    let page = parse_page(form.page.as_deref());
    Ok(Redirect::to(&with_query(
        LISTING_PATH,
        &[("page", page.to_string()), ("done", action.as_str().to_string())],
    )))
}
