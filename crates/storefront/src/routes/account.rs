//! Customer pages behind the route guard.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use bakehouse_components::{Checkbox, PageLinks, Pagination, TableComponent};
use bakehouse_core::{ColumnSpec, HeadingVariant, ListPage, PaginationState};
use secrecy::SecretString;
use tracing::instrument;

use crate::backend::{BackendError, Order};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireToken;
use crate::routes::PageQuery;
use crate::state::AppState;

/// Orders per page on the profile page.
pub const ORDERS_PER_PAGE: u64 = 10;

/// Orders shown on the dashboard.
const RECENT_ORDERS: u64 = 5;

const ORDERS_UNAVAILABLE: &str = "We couldn't load your orders. Please try again shortly.";

/// Order row display data.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub number: String,
    pub placed: String,
    pub status: &'static str,
    pub badge: &'static str,
    pub total: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            number: order.number(),
            placed: order
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            status: order.status.label(),
            badge: order.status.badge_class(),
            total: order.amount_due().to_string(),
        }
    }
}

/// Table body rows for an order table.
#[derive(Template)]
#[template(path = "partials/order_rows.html")]
struct OrderRowsTemplate<'a> {
    orders: &'a [OrderRow],
}

fn order_columns() -> ColumnSpec {
    ColumnSpec::from_identifiers(["Order", "Date", "Status", "Total"])
}

/// Render an order table.
fn order_table(orders: &[Order], empty_message: &str) -> Result<String> {
    let rows: Vec<OrderRow> = orders.iter().map(OrderRow::from).collect();
    let rows_html = OrderRowsTemplate { orders: &rows }.render()?;
    Ok(TableComponent::build(
        &order_columns(),
        &Checkbox::disabled(false),
        HeadingVariant::Default,
        rows_html,
    )
    .with_empty_message(empty_message)
    .to_html())
}

/// Fetch a page of orders, degrading to an empty page on backend failure.
///
/// A rejected token is not degraded; it ends the session.
async fn load_orders(
    state: &AppState,
    token: &SecretString,
    page: u64,
    page_size: u64,
) -> Result<(ListPage<Order>, String)> {
    match state.bakery().customer_orders(token, page, page_size).await {
        Ok(orders) => Ok((orders, String::new())),
        Err(BackendError::Unauthorized) => Err(AppError::Unauthorized),
        Err(e) => {
            tracing::error!(error = %e, page, "Failed to fetch customer orders");
            Ok((ListPage::empty(), ORDERS_UNAVAILABLE.to_string()))
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "account/dashboard.html")]
pub struct DashboardTemplate {
    pub order_count: u64,
    pub table_html: String,
    pub signed_in: bool,
    pub error: String,
}

/// Profile (order history) template.
#[derive(Template, WebTemplate)]
#[template(path = "account/profile.html")]
pub struct ProfileTemplate {
    pub table_html: String,
    pub pagination_html: String,
    pub signed_in: bool,
    pub error: String,
}

/// Display the customer dashboard.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
) -> Result<DashboardTemplate> {
    let (orders, error) = load_orders(&state, &token, 1, RECENT_ORDERS).await?;

    Ok(DashboardTemplate {
        order_count: orders.total_count,
        table_html: order_table(&orders.items, "No orders yet.")?,
        signed_in: true,
        error,
    })
}

/// Display the customer's order history.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip(state, token))]
pub async fn profile(
    State(state): State<AppState>,
    RequireToken(token): RequireToken,
    Query(query): Query<PageQuery>,
) -> Result<ProfileTemplate> {
    let page = query.page();
    let (orders, error) = load_orders(&state, &token, page, ORDERS_PER_PAGE).await?;

    let pagination = Pagination::new(
        PaginationState::new(page, ORDERS_PER_PAGE, orders.total_count),
        &PageLinks::new("/profile"),
    );

    Ok(ProfileTemplate {
        table_html: order_table(&orders.items, "You haven't placed any orders yet.")?,
        pagination_html: pagination.to_html(),
        signed_in: true,
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bakehouse_core::{OrderId, OrderStatus, Price};

    fn order(id: i64, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(id),
            order_id: Some(format!("BH-{id:04}")),
            status,
            total_amount: Price::from_cents(1250),
            final_amount: None,
            created_at: None,
        }
    }

    #[test]
    fn order_table_renders_one_row_per_order() {
        let html = order_table(
            &[order(1, OrderStatus::Delivered), order(2, OrderStatus::InTransit)],
            "none",
        )
        .unwrap_or_default();
        assert!(html.contains("BH-0001"));
        assert!(html.contains("BH-0002"));
        assert!(html.contains("In transit"));
        assert!(html.contains("$12.50"));
        assert!(!html.contains("none"));
    }

    #[test]
    fn empty_order_table_shows_message() {
        let html = order_table(&[], "No orders yet.").unwrap_or_default();
        assert!(html.contains(r#"<td colspan="4">No orders yet.</td>"#));
    }
}
