//! Order submission and tracking traits, with an in-memory backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{CustomerId, OrderId};
use domain::{Order, OrderDraft, StatusUpdate};
use tokio::sync::RwLock;

use crate::error::{CheckoutError, Result};
use crate::services::catalog::InMemoryCatalog;

/// Trait for handing a finished draft to the order backend.
#[async_trait]
pub trait OrderSubmission: Send + Sync {
    /// Persists the draft as a new order and returns it.
    async fn submit(&self, draft: OrderDraft) -> Result<Order>;
}

/// Trait for reading and advancing placed orders.
#[async_trait]
pub trait OrderTracking: Send + Sync {
    async fn order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Returns a customer's orders, newest first.
    async fn orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;

    /// Applies a back-office status change and returns the updated order.
    async fn update_status(&self, id: OrderId, update: StatusUpdate) -> Result<Order>;
}

#[derive(Debug, Default)]
struct OrderBackendState {
    orders: HashMap<OrderId, Order>,
    fail_on_submit: bool,
}

/// In-memory order backend for tests and local sessions.
///
/// When built with a catalog, submission takes stock for every line and
/// cancellation puts it back.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderBackend {
    state: Arc<RwLock<OrderBackendState>>,
    catalog: Option<InMemoryCatalog>,
}

impl InMemoryOrderBackend {
    /// Creates a backend that does not track stock.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that reserves stock in `catalog`.
    pub fn with_catalog(catalog: InMemoryCatalog) -> Self {
        Self {
            state: Arc::default(),
            catalog: Some(catalog),
        }
    }

    /// Configures the backend to reject submissions.
    pub async fn set_fail_on_submit(&self, fail: bool) {
        self.state.write().await.fail_on_submit = fail;
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.state.read().await.orders.len()
    }
}

#[async_trait]
impl OrderSubmission for InMemoryOrderBackend {
    #[tracing::instrument(skip(self, draft), fields(customer_id = %draft.customer_id))]
    async fn submit(&self, draft: OrderDraft) -> Result<Order> {
        let mut state = self.state.write().await;

        if state.fail_on_submit {
            return Err(CheckoutError::Submission(
                "Order service unavailable".to_string(),
            ));
        }

        if let Some(catalog) = &self.catalog {
            catalog.reserve(&draft.lines).await?;
        }

        let order = Order::place(draft, Utc::now());
        state.orders.insert(order.id(), order.clone());
        Ok(order)
    }
}

#[async_trait]
impl OrderTracking for InMemoryOrderBackend {
    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.state.read().await.orders.get(&id).cloned())
    }

    async fn orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        let mut orders: Vec<Order> = state
            .orders
            .values()
            .filter(|order| order.customer_id() == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.placed_at().cmp(&a.placed_at()));
        Ok(orders)
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(&self, id: OrderId, update: StatusUpdate) -> Result<Order> {
        let mut state = self.state.write().await;
        let order = state
            .orders
            .get_mut(&id)
            .ok_or(CheckoutError::OrderNotFound(id))?;

        let cancelling = matches!(update, StatusUpdate::Cancel { .. });
        order.apply_update(update, Utc::now())?;

        if cancelling && let Some(catalog) = &self.catalog {
            catalog.restock(order.lines()).await;
        }

        Ok(order.clone())
    }
}
