//! Checkout error types.

use common::{LineKey, OrderId, ProductId};
use domain::{DomainError, Money, OrderError};
use thiserror::Error;

/// Errors that can occur while checking out or talking to the backend.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The subtotal is below the store's minimum order value.
    #[error("Order subtotal {subtotal} is below the minimum of {minimum}")]
    BelowMinimum { subtotal: Money, minimum: Money },

    /// A line refers to a product that is gone or unpublished.
    #[error("Product no longer available: {key}")]
    ProductUnavailable { key: LineKey },

    /// Stock dropped below the quantity in the cart.
    #[error("Only {available} of {key} available, {requested} requested")]
    InsufficientInventory {
        key: LineKey,
        requested: u32,
        available: u32,
    },

    /// The order backend rejected or failed the submission.
    #[error("Order submission failed: {0}")]
    Submission(String),

    /// Order not found.
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Variation not found on a catalog product.
    #[error("Variation not found: {0}")]
    VariationNotFound(LineKey),

    /// Domain error.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl From<OrderError> for CheckoutError {
    fn from(e: OrderError) -> Self {
        CheckoutError::Domain(DomainError::Order(e))
    }
}

/// Convenience type alias for checkout results.
pub type Result<T> = std::result::Result<T, CheckoutError>;
