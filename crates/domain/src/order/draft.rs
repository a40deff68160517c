use common::{CustomerId, ProductId, VariationId};
use serde::{Deserialize, Serialize};

use crate::cart::{CartLine, CartSnapshot};
use crate::money::Money;

use super::{DeliveryDetails, OrderError};

/// An item in a placed order, frozen from the cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub variation_id: VariationId,
    pub name: String,
    pub unit_price: Money,
    pub unit_label: String,
    pub quantity: u32,
    pub image: Option<String>,
}

impl OrderLine {
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product_id.clone(),
            variation_id: line.variation_id.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            unit_label: line.unit_label.clone(),
            quantity: line.quantity,
            image: line.image.clone(),
        }
    }
}

/// An order ready to hand to the order submission service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub customer_id: CustomerId,
    pub lines: Vec<OrderLine>,
    pub delivery: DeliveryDetails,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

impl OrderDraft {
    /// Builds a draft from a cart snapshot.
    ///
    /// Fails if the snapshot is empty or the delivery details are incomplete.
    pub fn from_snapshot(
        customer_id: CustomerId,
        snapshot: &CartSnapshot,
        delivery: DeliveryDetails,
        delivery_fee: Money,
    ) -> Result<Self, OrderError> {
        if snapshot.is_empty() {
            return Err(OrderError::NoLines);
        }
        delivery.validate()?;

        let lines: Vec<OrderLine> = snapshot.lines().iter().map(OrderLine::from).collect();
        let subtotal: Money = lines.iter().map(OrderLine::line_total).sum();

        Ok(Self {
            customer_id,
            lines,
            delivery,
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        })
    }

    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }
}
