//! Records the admin panel reads from the bakery API.

use std::fmt;
use std::str::FromStr;

use bakehouse_core::{CustomerId, NotificationId, OrderId, OrderStatus, Price, ProductId};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Product as listed in the admin catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    /// Published products are visible in the storefront; the rest are drafts.
    #[serde(default = "published_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub hot_deal: bool,
}

const fn published_by_default() -> bool {
    true
}

impl AdminProduct {
    #[must_use]
    pub const fn state_label(&self) -> &'static str {
        if self.is_active { "Published" } else { "Draft" }
    }

    #[must_use]
    pub const fn state_badge(&self) -> &'static str {
        if self.is_active {
            "badge-success"
        } else {
            "badge-warning"
        }
    }
}

/// Order as listed in order management.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdminOrder {
    pub id: OrderId,
    #[serde(default)]
    pub order_id: Option<String>,
    /// Customer email captured at checkout.
    #[serde(default)]
    pub email: Option<String>,
    pub status: OrderStatus,
    pub total_amount: Price,
    #[serde(default)]
    pub final_amount: Option<Price>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AdminOrder {
    #[must_use]
    pub fn number(&self) -> String {
        self.order_id
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    #[must_use]
    pub fn amount_due(&self) -> Price {
        self.final_amount.unwrap_or(self.total_amount)
    }
}

/// Kind of staff notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    Message,
    Reminder,
    Alert,
}

impl NotificationKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Message => "Message",
            Self::Reminder => "Reminder",
            Self::Alert => "Alert",
        }
    }
}

/// Staff notification.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub notification_type: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Successful staff login payload.
#[derive(Clone, Deserialize)]
pub struct StaffLogin {
    pub id: CustomerId,
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

impl fmt::Debug for StaffLogin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffLogin")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("access", &"[REDACTED]")
            .field("refresh", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

/// Action applied to a selection of products at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BulkAction {
    Duplicate,
    Delete,
    Draft,
    Publish,
}

impl BulkAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Duplicate => "duplicate",
            Self::Delete => "delete",
            Self::Draft => "draft",
            Self::Publish => "publish",
        }
    }

    /// Past-tense summary shown after the action succeeds.
    #[must_use]
    pub const fn done_label(self) -> &'static str {
        match self {
            Self::Duplicate => "duplicated",
            Self::Delete => "deleted",
            Self::Draft => "moved to draft",
            Self::Publish => "published",
        }
    }

    /// HTTP method of the bulk endpoint that performs this action.
    #[must_use]
    pub const fn method(self) -> Method {
        match self {
            Self::Duplicate => Method::POST,
            Self::Delete => Method::DELETE,
            Self::Draft | Self::Publish => Method::PATCH,
        }
    }

    /// Request body for the bulk endpoint.
    #[must_use]
    pub fn body(self, products: &[ProductId]) -> BulkRequest<'_> {
        BulkRequest {
            products,
            status: match self {
                Self::Draft | Self::Publish => Some(self.as_str()),
                Self::Duplicate | Self::Delete => None,
            },
        }
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "duplicate" => Ok(Self::Duplicate),
            "delete" => Ok(Self::Delete),
            "draft" => Ok(Self::Draft),
            "publish" => Ok(Self::Publish),
            other => Err(format!("unknown bulk action: {other}")),
        }
    }
}

/// Body of a bulk product request.
#[derive(Debug, Serialize)]
pub struct BulkRequest<'a> {
    pub products: &'a [ProductId],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}
