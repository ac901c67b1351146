//! Status and role enums mirrored from the bakery API.

use serde::{Deserialize, Serialize};

/// Product availability status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Available,
    OutOfStock,
    Discontinued,
}

impl ProductStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::OutOfStock => "Out of stock",
            Self::Discontinued => "Discontinued",
        }
    }
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PaymentPending,
    InProgress,
    InTransit,
    Delivered,
    Rejected,
    Canceled,
}

impl OrderStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PaymentPending => "Payment pending",
            Self::InProgress => "In progress",
            Self::InTransit => "In transit",
            Self::Delivered => "Delivered",
            Self::Rejected => "Rejected",
            Self::Canceled => "Canceled",
        }
    }

    /// Badge CSS classes for status pills.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::PaymentPending => "badge-warning",
            Self::InProgress | Self::InTransit => "badge-info",
            Self::Delivered => "badge-success",
            Self::Rejected | Self::Canceled => "badge-danger",
        }
    }
}

/// Staff role attached to an admin panel login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Full access to the panel.
    Admin,
    /// Bakery owner; same navigation as admin.
    Bakery,
    /// Manages products, stock and raw materials.
    StockManager,
    /// Handles orders and payments.
    Accountant,
    /// Shop-floor worker.
    Worker,
}

impl StaffRole {
    /// The wire value used by the API and the `role` cookie.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Bakery => "bakery",
            Self::StockManager => "stock_manager",
            Self::Accountant => "accountant",
            Self::Worker => "worker",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StaffRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "bakery" => Ok(Self::Bakery),
            "stock_manager" => Ok(Self::StockManager),
            "accountant" => Ok(Self::Accountant),
            "worker" => Ok(Self::Worker),
            _ => Err(format!("invalid staff role: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn staff_role_round_trips_through_str() {
        for role in [
            StaffRole::Admin,
            StaffRole::Bakery,
            StaffRole::StockManager,
            StaffRole::Accountant,
            StaffRole::Worker,
        ] {
            assert_eq!(role.as_str().parse::<StaffRole>().unwrap(), role);
        }
        assert!("chef".parse::<StaffRole>().is_err());
    }

    #[test]
    fn order_status_reads_snake_case() {
        let status: OrderStatus = serde_json::from_str("\"in_transit\"").unwrap();
        assert_eq!(status, OrderStatus::InTransit);
        assert_eq!(status.label(), "In transit");
    }
}
