//! Domain layer for the grocery storefront.
//!
//! This crate provides:
//! - Money and the catalog model (categories, products, variations)
//! - The shopping cart aggregate with its command/event state machine
//! - Orders created from cart snapshots, with their delivery status machine

pub mod aggregate;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod order;

pub use aggregate::{Aggregate, DomainEvent};
pub use cart::{Cart, CartCommand, CartError, CartEvent, CartLine, CartSnapshot};
pub use catalog::{Category, Product, ProductRef, Variation};
pub use error::DomainError;
pub use money::{Money, MoneyParseError};
pub use order::{
    DeliveryDetails, Order, OrderDraft, OrderError, OrderLine, OrderStatus, StatusUpdate,
};
