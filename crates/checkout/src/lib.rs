//! Checkout flow for the grocery storefront.
//!
//! Persistence lives in a hosted backend. This crate defines the seams to
//! it (catalog reads, order submission, order tracking), in-memory
//! implementations of those seams, and the coordinator that turns a cart
//! into a placed order:
//! 1. Snapshot the cart
//! 2. Revalidate every line against the catalog
//! 3. Price delivery and check the minimum order
//! 4. Submit, and clear the cart only once the backend accepts the order

pub mod config;
pub mod coordinator;
pub mod error;
pub mod services;

pub use config::StoreConfig;
pub use coordinator::{CheckoutCoordinator, CheckoutQuote};
pub use error::{CheckoutError, Result};
pub use services::{
    CatalogProvider, InMemoryCatalog, InMemoryOrderBackend, OrderSubmission, OrderTracking,
};
