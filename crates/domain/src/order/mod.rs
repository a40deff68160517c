//! Placed orders and their delivery lifecycle.

mod aggregate;
mod delivery;
mod draft;
mod state;

pub use aggregate::{Order, StatusUpdate};
pub use delivery::DeliveryDetails;
pub use draft::{OrderDraft, OrderLine};
pub use state::OrderStatus;

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// The cart snapshot had no lines.
    #[error("Order has no lines")]
    NoLines,

    /// A required delivery field was blank.
    #[error("Delivery {field} is required")]
    MissingDeliveryField { field: &'static str },

    /// Order is not in the expected status.
    #[error("Invalid status transition: cannot {action} from {current} status")]
    InvalidStatusTransition {
        current: OrderStatus,
        action: &'static str,
    },
}
