//! Order status machine.

use serde::{Deserialize, Serialize};

/// The status of a placed order as shown on the tracking page.
///
/// State transitions:
/// ```text
/// Pending ──► Confirmed ──► OutForDelivery ──► Delivered
///    │            │
///    └────────────┴──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Placed by the shopper, not yet accepted by the store.
    #[default]
    Pending,

    /// Accepted by the store and being picked.
    Confirmed,

    /// Handed to a driver.
    OutForDelivery,

    /// Received by the shopper (terminal state).
    Delivered,

    /// Cancelled by the shopper or the store (terminal state).
    Cancelled,
}

impl OrderStatus {
    pub fn can_confirm(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    pub fn can_dispatch(&self) -> bool {
        matches!(self, OrderStatus::Confirmed)
    }

    pub fn can_deliver(&self) -> bool {
        matches!(self, OrderStatus::OutForDelivery)
    }

    /// Orders can be cancelled until they leave the store.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }

    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::OutForDelivery => "OutForDelivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
