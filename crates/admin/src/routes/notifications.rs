//! Staff notifications listing.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use bakehouse_components::{ListHeadings, PageLinks, Pagination, TableComponent};
use bakehouse_core::{ColumnSpec, HeadingVariant, ListPage, PaginationState};
use tracing::instrument;

use crate::backend::{BackendError, Notification};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::StaffSession;
use crate::routes::{Chrome, PageQuery};
use crate::state::AppState;

pub const NOTIFICATIONS_PER_PAGE: u64 = 10;

const LISTING_PATH: &str = "/notifications";

#[derive(Debug, Clone)]
pub struct NotificationRow {
    pub title: String,
    pub message: String,
    pub kind: &'static str,
    pub received: String,
    pub unread: bool,
}

impl From<&Notification> for NotificationRow {
    fn from(note: &Notification) -> Self {
        Self {
            title: note.title.clone(),
            message: note.message.clone(),
            kind: note.notification_type.label(),
            received: note
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            unread: !note.is_read,
        }
    }
}

#[derive(Template)]
#[template(path = "partials/notification_rows.html")]
struct NotificationRowsTemplate<'a> {
    rows: &'a [NotificationRow],
}

fn notification_table(notes: &[Notification]) -> Result<String> {
    let rows: Vec<NotificationRow> = notes.iter().map(NotificationRow::from).collect();
    let rows_html = NotificationRowsTemplate { rows: &rows }.render()?;
    let headings = ListHeadings::plain(
        &ColumnSpec::from_identifiers(["Title", "Message", "Type", "Received"]),
        HeadingVariant::Default,
    );
    Ok(TableComponent::new(&headings, rows_html)
        .with_empty_message("You're all caught up.")
        .to_html())
}

#[derive(Template, WebTemplate)]
#[template(path = "notifications/index.html")]
pub struct NotificationsTemplate {
    pub chrome: Chrome,
    pub unread: usize,
    pub table_html: String,
    pub pagination_html: String,
    pub error: String,
}

/// Display the signed-in staff member's notifications.
///
/// # Errors
///
/// Redirects to login if the API rejects the token.
#[instrument(skip(state, staff))]
pub async fn index(
    State(state): State<AppState>,
    staff: StaffSession,
    Query(query): Query<PageQuery>,
) -> Result<NotificationsTemplate> {
    let page = query.page();
    let (notes, error) = match state
        .bakery()
        .notifications(&staff.token, page, NOTIFICATIONS_PER_PAGE)
        .await
    {
        Ok(notes) => (notes, String::new()),
        Err(BackendError::Unauthorized) => return Err(AppError::Unauthorized),
        Err(e) => {
            tracing::error!(error = %e, page, "Failed to fetch notifications");
            (
                ListPage::empty(),
                "Notifications could not be loaded. Please try again.".to_string(),
            )
        }
    };

    let pagination = Pagination::new(
        PaginationState::new(page, NOTIFICATIONS_PER_PAGE, notes.total_count),
        &PageLinks::new(LISTING_PATH),
    );

    Ok(NotificationsTemplate {
        chrome: Chrome::for_staff(staff.role, LISTING_PATH),
        unread: notes.items.iter().filter(|n| !n.is_read).count(),
        table_html: notification_table(&notes.items)?,
        pagination_html: pagination.to_html(),
        error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NotificationKind;
    use bakehouse_core::NotificationId;

    #[test]
    fn unread_rows_are_highlighted() {
        let notes = [
            Notification {
                id: NotificationId::new(1),
                title: "Flour delivery".to_string(),
                message: "Arrives at 7".to_string(),
                notification_type: NotificationKind::Reminder,
                is_read: false,
                created_at: None,
            },
            Notification {
                id: NotificationId::new(2),
                title: "Oven serviced".to_string(),
                message: String::new(),
                notification_type: NotificationKind::Message,
                is_read: true,
                created_at: None,
            },
        ];
        let html = notification_table(&notes).unwrap_or_default();
        assert_eq!(html.matches("is-unread").count(), 1);
        assert!(html.contains("Reminder"));
        assert!(!html.contains("text-left"));
    }
}
