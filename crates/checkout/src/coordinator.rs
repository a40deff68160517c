//! Checkout coordinator turning a cart into a placed order.

use common::CustomerId;
use domain::{Cart, CartLine, CartSnapshot, DeliveryDetails, Money, Order, OrderDraft};
use serde::Serialize;

use crate::config::StoreConfig;
use crate::error::{CheckoutError, Result};
use crate::services::catalog::CatalogProvider;
use crate::services::orders::OrderSubmission;

/// Price breakdown shown on the checkout page before placing the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutQuote {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
    pub meets_minimum: bool,
}

/// Orchestrates order placement from a shopper's cart.
///
/// The cart is only cleared after the order backend accepts the order.
/// Any failure along the way leaves the cart exactly as it was, so a
/// retry is just another call to [`CheckoutCoordinator::checkout`].
pub struct CheckoutCoordinator<C, O>
where
    C: CatalogProvider,
    O: OrderSubmission,
{
    catalog: C,
    orders: O,
    config: StoreConfig,
}

impl<C, O> CheckoutCoordinator<C, O>
where
    C: CatalogProvider,
    O: OrderSubmission,
{
    /// Creates a new checkout coordinator.
    pub fn new(catalog: C, orders: O, config: StoreConfig) -> Self {
        Self {
            catalog,
            orders,
            config,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Prices the current cart without submitting anything.
    pub fn quote(&self, cart: &Cart) -> CheckoutQuote {
        let subtotal = cart.subtotal();
        let delivery_fee = self.config.delivery_fee_for(subtotal);
        CheckoutQuote {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            meets_minimum: self.config.meets_minimum(subtotal),
        }
    }

    /// Places an order for everything in the cart.
    ///
    /// On success the cart is cleared and the placed order returned.
    #[tracing::instrument(skip(self, cart, delivery), fields(lines = cart.line_count()))]
    pub async fn checkout(
        &self,
        cart: &mut Cart,
        customer_id: CustomerId,
        delivery: DeliveryDetails,
    ) -> Result<Order> {
        metrics::counter!("checkout_attempts_total").increment(1);
        let checkout_start = std::time::Instant::now();

        let snapshot = cart.snapshot();
        let result = self.submit_snapshot(&snapshot, customer_id, delivery).await;

        match &result {
            Ok(order) => {
                cart.clear();
                tracing::info!(
                    order_id = %order.id(),
                    total = %order.total(),
                    items = order.item_count(),
                    "order placed"
                );
                metrics::counter!("checkout_completed_total").increment(1);
            }
            Err(e) => {
                tracing::warn!(error = %e, "checkout rejected");
                metrics::counter!("checkout_failed_total").increment(1);
            }
        }

        metrics::histogram!("checkout_duration_seconds")
            .record(checkout_start.elapsed().as_secs_f64());
        result
    }

    async fn submit_snapshot(
        &self,
        snapshot: &CartSnapshot,
        customer_id: CustomerId,
        delivery: DeliveryDetails,
    ) -> Result<Order> {
        if snapshot.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        delivery.validate()?;

        for line in snapshot {
            self.verify_line(line).await?;
        }

        let subtotal = snapshot.subtotal();
        if !self.config.meets_minimum(subtotal) {
            return Err(CheckoutError::BelowMinimum {
                subtotal,
                minimum: self.config.minimum_order,
            });
        }

        let delivery_fee = self.config.delivery_fee_for(subtotal);
        let draft = OrderDraft::from_snapshot(customer_id, snapshot, delivery, delivery_fee)?;

        self.orders.submit(draft).await
    }

    /// Checks a line against the live catalog.
    async fn verify_line(&self, line: &CartLine) -> Result<()> {
        let unavailable = || CheckoutError::ProductUnavailable { key: line.key() };

        let product = self
            .catalog
            .product(&line.product_id)
            .await?
            .filter(|product| product.published)
            .ok_or_else(unavailable)?;
        let variation = product
            .variation(&line.variation_id)
            .ok_or_else(unavailable)?;

        if variation.inventory < line.quantity {
            return Err(CheckoutError::InsufficientInventory {
                key: line.key(),
                requested: line.quantity,
                available: variation.inventory,
            });
        }

        Ok(())
    }
}
