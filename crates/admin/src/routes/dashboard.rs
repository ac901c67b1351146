//! Overview page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use bakehouse_core::{ListPage, listing::compact_count};
use tracing::instrument;

use crate::backend::BackendError;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::StaffSession;
use crate::routes::Chrome;
use crate::state::AppState;

/// One overview tile.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub href: &'static str,
}

impl StatCard {
    /// Tile for a list total. A failed fetch shows a dash.
    fn from_total<T>(
        label: &'static str,
        href: &'static str,
        page: &std::result::Result<ListPage<T>, BackendError>,
    ) -> Self {
        Self {
            label,
            value: page
                .as_ref()
                .map_or_else(|_| "-".to_string(), |p| compact_count(p.total_count)),
            href,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub chrome: Chrome,
    pub cards: Vec<StatCard>,
    pub error: String,
}

/// Display product, order and notification totals.
///
/// The three counts are fetched concurrently. A count that fails to load is
/// shown as a dash with a banner; a rejected token ends the session.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip_all)]
pub async fn dashboard(
    State(state): State<AppState>,
    staff: StaffSession,
) -> Result<DashboardTemplate> {
    let api = state.bakery();
    let (products, orders, notifications) = tokio::join!(
        api.products(&staff.token, 1, 1),
        api.orders(&staff.token, 1, 1),
        api.notifications(&staff.token, 1, 1),
    );

    let failures: Vec<&BackendError> = [
        products.as_ref().err(),
        orders.as_ref().err(),
        notifications.as_ref().err(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if failures.iter().any(|e| matches!(e, BackendError::Unauthorized)) {
        return Err(AppError::Unauthorized);
    }
    for e in &failures {
        tracing::error!(error = %e, "Failed to load dashboard count");
    }

    Ok(DashboardTemplate {
        chrome: Chrome::for_staff(staff.role, "/dashboard"),
        cards: vec![
            StatCard::from_total("Products", "/products", &products),
            StatCard::from_total("Orders", "/orders-management", &orders),
            StatCard::from_total("Notifications", "/notifications", &notifications),
        ],
        error: if failures.is_empty() {
            String::new()
        } else {
            "Some totals could not be loaded.".to_string()
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_shows_compact_total_or_dash() {
        let loaded: std::result::Result<ListPage<u8>, BackendError> = Ok(ListPage {
            items: Vec::new(),
            total_count: 1500,
        });
        assert_eq!(StatCard::from_total("Orders", "/o", &loaded).value, "1.5K");

        let failed: std::result::Result<ListPage<u8>, BackendError> =
            Err(BackendError::NotFound(String::new()));
        assert_eq!(StatCard::from_total("Orders", "/o", &failed).value, "-");
    }
}
