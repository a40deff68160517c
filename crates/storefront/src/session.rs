//! Scripted shopping sessions.
//!
//! A session script is the sequence of taps a shopper makes: add, remove,
//! increment and decrement on catalog items, with checkout attempts in
//! between. Replaying it drives a real [`Cart`] and [`CheckoutCoordinator`].

use std::path::Path;

use checkout::{CatalogProvider, CheckoutCoordinator, OrderSubmission, StoreConfig};
use common::{CustomerId, LineKey, ProductId, VariationId};
use domain::{Aggregate, Cart, CartCommand, Category, DeliveryDetails, Order, Product};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::StorefrontError;

/// Catalog file contents.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
}

/// Session script file contents.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionScript {
    /// Generated when absent.
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub delivery: DeliveryDetails,
    pub steps: Vec<CartStep>,
}

/// One shopper action. A missing `variation` means the product's default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum CartStep {
    Add {
        product: ProductId,
        #[serde(default)]
        variation: Option<VariationId>,
    },
    Remove {
        product: ProductId,
        #[serde(default)]
        variation: Option<VariationId>,
    },
    Increment {
        product: ProductId,
        #[serde(default)]
        variation: Option<VariationId>,
    },
    Decrement {
        product: ProductId,
        #[serde(default)]
        variation: Option<VariationId>,
    },
    Checkout,
}

/// Outcome of a replayed session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub customer_id: CustomerId,

    /// Orders placed, in the order they were placed.
    pub orders: Vec<Order>,

    /// Reasons for each rejected checkout attempt.
    pub rejected_checkouts: Vec<String>,

    /// Cart contents when the script ended.
    pub cart: Cart,
}

/// Reads and parses a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorefrontError> {
    let contents = std::fs::read_to_string(path).map_err(|source| StorefrontError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| StorefrontError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Replays a session against a catalog and order backend.
#[tracing::instrument(skip_all, fields(steps = script.steps.len()))]
pub async fn replay<C, O>(
    script: SessionScript,
    catalog: C,
    backend: O,
    config: StoreConfig,
) -> Result<SessionReport, StorefrontError>
where
    C: CatalogProvider + Clone,
    O: OrderSubmission,
{
    let customer_id = script.customer_id.unwrap_or_default();
    let coordinator = CheckoutCoordinator::new(catalog.clone(), backend, config);
    let mut cart = Cart::new();
    let mut orders = Vec::new();
    let mut rejected_checkouts = Vec::new();

    for step in script.steps {
        let command = match step {
            CartStep::Add { product, variation } => {
                let product = lookup(&catalog, &product).await?;
                let variation_id = resolve_variation(&product, variation)?;
                let product_ref = product.cart_ref(&variation_id).ok_or_else(|| {
                    StorefrontError::UnknownVariation(LineKey::new(
                        product.id.clone(),
                        variation_id.clone(),
                    ))
                })?;
                CartCommand::Add(product_ref)
            }
            CartStep::Remove { product, variation } => {
                CartCommand::Remove(line_key(&catalog, product, variation).await?)
            }
            CartStep::Increment { product, variation } => {
                CartCommand::Increment(line_key(&catalog, product, variation).await?)
            }
            CartStep::Decrement { product, variation } => {
                CartCommand::Decrement(line_key(&catalog, product, variation).await?)
            }
            CartStep::Checkout => {
                let quote = coordinator.quote(&cart);
                tracing::debug!(subtotal = %quote.subtotal, total = %quote.total, "checkout quote");

                match coordinator
                    .checkout(&mut cart, customer_id, script.delivery.clone())
                    .await
                {
                    Ok(order) => orders.push(order),
                    Err(e) => rejected_checkouts.push(e.to_string()),
                }
                continue;
            }
        };

        let name = command.as_str();
        if cart.dispatch(command).is_empty() {
            tracing::debug!(command = name, "cart unchanged");
        }
    }

    Ok(SessionReport {
        customer_id,
        orders,
        rejected_checkouts,
        cart,
    })
}

async fn lookup<C: CatalogProvider>(
    catalog: &C,
    id: &ProductId,
) -> Result<Product, StorefrontError> {
    catalog
        .product(id)
        .await?
        .ok_or_else(|| StorefrontError::UnknownProduct(id.clone()))
}

fn resolve_variation(
    product: &Product,
    variation: Option<VariationId>,
) -> Result<VariationId, StorefrontError> {
    match variation {
        Some(id) => Ok(id),
        None => product
            .default_variation()
            .map(|v| v.id.clone())
            .ok_or_else(|| StorefrontError::NoVariations(product.id.clone())),
    }
}

async fn line_key<C: CatalogProvider>(
    catalog: &C,
    product: ProductId,
    variation: Option<VariationId>,
) -> Result<LineKey, StorefrontError> {
    let variation_id = match variation {
        Some(id) => id,
        None => resolve_variation(&lookup(catalog, &product).await?, None)?,
    };
    Ok(LineKey::new(product, variation_id))
}
