use common::{LineKey, ProductId, VariationId};
use serde::{Deserialize, Serialize};

use crate::catalog::ProductRef;
use crate::money::Money;

/// One product variation held in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub variation_id: VariationId,
    pub name: String,
    pub unit_price: Money,
    pub unit_label: String,

    /// Always at least 1 and at most `inventory`.
    pub quantity: u32,

    pub image: Option<String>,

    /// Inventory ceiling recorded when the line was created.
    pub inventory: u32,
}

impl CartLine {
    /// Creates a line at quantity 1 from catalog data.
    pub fn from_ref(product: &ProductRef) -> Self {
        Self {
            product_id: product.product_id.clone(),
            variation_id: product.variation_id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            unit_label: product.unit_label.clone(),
            quantity: 1,
            image: product.image.clone(),
            inventory: product.inventory,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey::new(self.product_id.clone(), self.variation_id.clone())
    }

    /// Returns true if this line is stored under `key`.
    pub fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.variation_id == key.variation_id
    }

    /// Returns the total price for this line (quantity * unit_price).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }

    /// Returns true if one more unit fits under the inventory ceiling.
    pub fn can_increment(&self) -> bool {
        self.quantity < self.inventory
    }
}
