//! Order entity implementation.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

use crate::money::Money;

use super::{DeliveryDetails, OrderDraft, OrderError, OrderLine, OrderStatus};

/// A back-office status change requested for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum StatusUpdate {
    Confirm,
    Dispatch,
    Deliver,
    Cancel { reason: String },
}

/// A placed order: the system of record once checkout succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    lines: Vec<OrderLine>,
    delivery: DeliveryDetails,
    subtotal: Money,
    delivery_fee: Money,
    total: Money,
    status: OrderStatus,
    placed_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    #[serde(default)]
    cancellation_reason: Option<String>,
}

// Query methods
impl Order {
    /// Places a draft under a fresh order ID.
    pub fn place(draft: OrderDraft, placed_at: DateTime<Utc>) -> Self {
        Self::place_with_id(OrderId::new(), draft, placed_at)
    }

    pub fn place_with_id(id: OrderId, draft: OrderDraft, placed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id: draft.customer_id,
            lines: draft.lines,
            delivery: draft.delivery,
            subtotal: draft.subtotal,
            delivery_fee: draft.delivery_fee,
            total: draft.total,
            status: OrderStatus::Pending,
            placed_at,
            updated_at: placed_at,
            cancellation_reason: None,
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn delivery(&self) -> &DeliveryDetails {
        &self.delivery
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn delivery_fee(&self) -> Money {
        self.delivery_fee
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Returns the total quantity of all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

// Status transitions
impl Order {
    /// Applies a back-office status update stamped at `at`.
    pub fn apply_update(
        &mut self,
        update: StatusUpdate,
        at: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        match update {
            StatusUpdate::Confirm => self.confirm(at),
            StatusUpdate::Dispatch => self.dispatch(at),
            StatusUpdate::Deliver => self.deliver(at),
            StatusUpdate::Cancel { reason } => self.cancel(reason, at),
        }
    }

    pub fn confirm(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.transition(self.status.can_confirm(), "confirm", OrderStatus::Confirmed, at)
    }

    pub fn dispatch(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.transition(
            self.status.can_dispatch(),
            "dispatch",
            OrderStatus::OutForDelivery,
            at,
        )
    }

    pub fn deliver(&mut self, at: DateTime<Utc>) -> Result<(), OrderError> {
        self.transition(self.status.can_deliver(), "deliver", OrderStatus::Delivered, at)
    }

    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        self.transition(self.status.can_cancel(), "cancel", OrderStatus::Cancelled, at)?;
        self.cancellation_reason = Some(reason.into());
        Ok(())
    }

    fn transition(
        &mut self,
        allowed: bool,
        action: &'static str,
        next: OrderStatus,
        at: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        if !allowed {
            return Err(OrderError::InvalidStatusTransition {
                current: self.status,
                action,
            });
        }

        tracing::debug!(
            order_id = %self.id,
            from = %self.status,
            to = %next,
            "order status changed"
        );
        self.status = next;
        self.updated_at = at;
        Ok(())
    }
}
