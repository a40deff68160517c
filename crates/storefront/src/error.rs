//! Replay error types.

use std::path::PathBuf;

use checkout::CheckoutError;
use common::{LineKey, ProductId};
use thiserror::Error;

/// Errors that stop a session replay.
///
/// A rejected checkout is not one of them: it is recorded in the report
/// and the session carries on with the cart intact.
#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Session refers to unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("Session refers to unknown variation {0}")]
    UnknownVariation(LineKey),

    #[error("Product {0} has no variations")]
    NoVariations(ProductId),

    #[error("Backend error: {0}")]
    Checkout(#[from] CheckoutError),
}
