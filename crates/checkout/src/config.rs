//! Store pricing rules loaded from environment variables.

use domain::Money;

/// Delivery pricing and order limits, with sensible defaults.
///
/// Reads from environment variables:
/// - `DELIVERY_FEE_CENTS`: flat delivery fee (default: `499`)
/// - `FREE_DELIVERY_THRESHOLD_CENTS`: subtotal at which delivery is free (default: `5000`)
/// - `MINIMUM_ORDER_CENTS`: smallest subtotal accepted at checkout (default: `1000`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub delivery_fee: Money,
    pub free_delivery_threshold: Money,
    pub minimum_order: Money,
}

impl StoreConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Loads configuration through a variable lookup.
    ///
    /// Values that are missing or not integers fall back to the default.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let cents = |key: &str, default: Money| {
            lookup(key)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .map_or(default, Money::from_cents)
        };

        Self {
            delivery_fee: cents("DELIVERY_FEE_CENTS", defaults.delivery_fee),
            free_delivery_threshold: cents(
                "FREE_DELIVERY_THRESHOLD_CENTS",
                defaults.free_delivery_threshold,
            ),
            minimum_order: cents("MINIMUM_ORDER_CENTS", defaults.minimum_order),
        }
    }

    /// Returns the delivery fee for an order with this subtotal.
    pub fn delivery_fee_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_delivery_threshold {
            Money::zero()
        } else {
            self.delivery_fee
        }
    }

    pub fn meets_minimum(&self, subtotal: Money) -> bool {
        subtotal >= self.minimum_order
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            delivery_fee: Money::from_cents(499),
            free_delivery_threshold: Money::from_cents(5000),
            minimum_order: Money::from_cents(1000),
        }
    }
}
