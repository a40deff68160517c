//! Catalog provider trait and in-memory implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{LineKey, ProductId, VariationId};
use domain::{Category, OrderLine, Product};
use tokio::sync::RwLock;

use crate::error::{CheckoutError, Result};

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Returns a product by ID, published or not.
    async fn product(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Returns the published products in a category, ordered by ID.
    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>>;

    /// Returns all categories in display order.
    async fn categories(&self) -> Result<Vec<Category>>;
}

#[derive(Debug, Default)]
struct CatalogState {
    categories: Vec<Category>,
    products: BTreeMap<ProductId, Product>,
}

/// In-memory catalog with the back-office write operations.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog pre-loaded with categories and products.
    pub fn from_parts(categories: Vec<Category>, products: Vec<Product>) -> Self {
        let products = products
            .into_iter()
            .map(|product| (product.id.clone(), product))
            .collect();
        Self {
            state: Arc::new(RwLock::new(CatalogState {
                categories,
                products,
            })),
        }
    }

    /// Returns the number of products, published or not.
    pub async fn product_count(&self) -> usize {
        self.state.read().await.products.len()
    }

    /// Inserts or replaces a category, keeping its display position on replace.
    pub async fn upsert_category(&self, category: Category) {
        let mut state = self.state.write().await;
        match state.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => state.categories.push(category),
        }
    }

    /// Inserts or replaces a product.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn upsert_product(&self, product: Product) {
        self.state
            .write()
            .await
            .products
            .insert(product.id.clone(), product);
    }

    /// Deletes a product. Returns false if it did not exist.
    pub async fn remove_product(&self, id: &ProductId) -> bool {
        self.state.write().await.products.remove(id).is_some()
    }

    /// Shows or hides a product on the storefront.
    pub async fn set_published(&self, id: &ProductId, published: bool) -> Result<()> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .get_mut(id)
            .ok_or_else(|| CheckoutError::ProductNotFound(id.clone()))?;
        product.published = published;
        Ok(())
    }

    /// Overwrites the stock level of one variation.
    #[tracing::instrument(skip(self))]
    pub async fn set_inventory(
        &self,
        product_id: &ProductId,
        variation_id: &VariationId,
        inventory: u32,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        let variation = find_variation(&mut state, product_id, variation_id)?;
        variation.inventory = inventory;
        Ok(())
    }

    /// Takes stock for every line, or for none if any line is short.
    pub async fn reserve(&self, lines: &[OrderLine]) -> Result<()> {
        let mut state = self.state.write().await;

        for line in lines {
            let key = LineKey::new(line.product_id.clone(), line.variation_id.clone());
            let available = find_variation(&mut state, &line.product_id, &line.variation_id)?
                .inventory;
            if available < line.quantity {
                return Err(CheckoutError::InsufficientInventory {
                    key,
                    requested: line.quantity,
                    available,
                });
            }
        }

        for line in lines {
            let variation = find_variation(&mut state, &line.product_id, &line.variation_id)?;
            variation.inventory -= line.quantity;
        }

        Ok(())
    }

    /// Returns stock taken by [`InMemoryCatalog::reserve`]. Lines whose
    /// product was since deleted are skipped.
    pub async fn restock(&self, lines: &[OrderLine]) {
        let mut state = self.state.write().await;
        for line in lines {
            if let Ok(variation) = find_variation(&mut state, &line.product_id, &line.variation_id)
            {
                variation.inventory = variation.inventory.saturating_add(line.quantity);
            }
        }
    }
}

fn find_variation<'a>(
    state: &'a mut CatalogState,
    product_id: &ProductId,
    variation_id: &VariationId,
) -> Result<&'a mut domain::Variation> {
    let product = state
        .products
        .get_mut(product_id)
        .ok_or_else(|| CheckoutError::ProductNotFound(product_id.clone()))?;
    product.variation_mut(variation_id).ok_or_else(|| {
        CheckoutError::VariationNotFound(LineKey::new(product_id.clone(), variation_id.clone()))
    })
}

#[async_trait]
impl CatalogProvider for InMemoryCatalog {
    async fn product(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.get(id).cloned())
    }

    async fn products_in_category(&self, category: &str) -> Result<Vec<Product>> {
        Ok(self
            .state
            .read()
            .await
            .products
            .values()
            .filter(|p| p.published && p.category == category)
            .cloned()
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.state.read().await.categories.clone())
    }
}
