//! Storefront session runner.
//!
//! Loads a catalog and a scripted shopping session from JSON files, then
//! replays the session against the in-memory checkout backend.

pub mod config;
pub mod error;
pub mod session;

use checkout::{InMemoryCatalog, InMemoryOrderBackend};

pub use config::Config;
pub use error::StorefrontError;
pub use session::{CartStep, CatalogFile, SessionReport, SessionScript, replay};

/// Builds the in-memory catalog from a catalog file.
pub fn build_catalog(file: CatalogFile) -> InMemoryCatalog {
    InMemoryCatalog::from_parts(file.categories, file.products)
}

/// Loads the configured files and replays the session.
#[tracing::instrument(
    skip_all,
    fields(
        catalog = %config.catalog_path.display(),
        session = %config.session_path.display()
    )
)]
pub async fn run(config: &Config) -> Result<SessionReport, StorefrontError> {
    let catalog_file: CatalogFile = session::load_json(&config.catalog_path)?;
    let script: SessionScript = session::load_json(&config.session_path)?;

    let catalog = build_catalog(catalog_file);
    tracing::info!(products = catalog.product_count().await, "catalog loaded");

    let orders = InMemoryOrderBackend::with_catalog(catalog.clone());
    replay(script, catalog, orders, config.store.clone()).await
}
