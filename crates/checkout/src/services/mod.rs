//! Backend collaborator traits and in-memory implementations.

pub mod catalog;
pub mod orders;

pub use catalog::{CatalogProvider, InMemoryCatalog};
pub use orders::{InMemoryOrderBackend, OrderSubmission, OrderTracking};
