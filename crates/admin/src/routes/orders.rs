//! Order management listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use bakehouse_components::{Checkbox, PageLinks, Pagination, TableComponent};
use bakehouse_core::{ColumnSpec, HeadingVariant, ListPage, PaginationState};
use tracing::instrument;

use crate::backend::{AdminOrder, BackendError};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::StaffSession;
use crate::routes::{Chrome, PageQuery};
use crate::state::AppState;

/// Orders per page.
pub const ORDERS_PER_PAGE: u64 = 10;

const LISTING_PATH: &str = "/orders-management";

/// Order row display data.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub number: String,
    pub customer: String,
    pub placed: String,
    pub status: &'static str,
    pub badge: &'static str,
    pub total: String,
}

impl From<&AdminOrder> for OrderRow {
    fn from(order: &AdminOrder) -> Self {
        Self {
            number: order.number(),
            customer: order.email.clone().unwrap_or_default(),
            placed: order
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            status: order.status.label(),
            badge: order.status.badge_class(),
            total: order.amount_due().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "partials/order_rows.html")]
struct OrderRowsTemplate<'a> {
    rows: &'a [OrderRow],
}

fn order_table(orders: &[AdminOrder]) -> Result<String> {
    let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
    let rows_html = OrderRowsTemplate { rows: &rows }.render()?;
    Ok(TableComponent::build(
        &ColumnSpec::from_identifiers(["Order", "Customer", "Placed", "Status", "Total", "Action"]),
        &Checkbox::disabled(false),
        HeadingVariant::OrdersManagement,
        rows_html,
    )
    .with_empty_message("No orders yet.")
    .to_html())
}

#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub chrome: Chrome,
    pub table_html: String,
    pub pagination_html: String,
    pub error: String,
}

/// Display all customer orders, newest first as the API returns them.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip(state, staff))]
pub async fn index(
    State(state): State<AppState>,
    staff: StaffSession,
    Query(query): Query<PageQuery>,
) -> Result<OrdersTemplate> {
    let page = query.page();
    let (orders, error) = match state.bakery().orders(&staff.token, page, ORDERS_PER_PAGE).await {
        Ok(orders) => (orders, String::new()),
        Err(BackendError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            tracing::error!(error = %e, page, "Failed to fetch orders");
            (ListPage::empty(), "Orders could not be loaded. Please try again.".to_string())
        }
    };

    let pagination = Pagination::new(
        PaginationState::new(page, ORDERS_PER_PAGE, orders.total_count),
        &PageLinks::new(LISTING_PATH),
    );

    Ok(OrdersTemplate {
        chrome: Chrome::for_staff(staff.role, LISTING_PATH),
        table_html: order_table(&orders.items)?,
        pagination_html: pagination.to_html(),
        error,
    })
}
