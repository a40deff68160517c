//! Cart aggregate implementation.

use common::LineKey;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::catalog::ProductRef;
use crate::money::Money;

use super::{CartCommand, CartError, CartEvent, CartLine, CartSnapshot};

/// The shopper's cart for one browsing session.
///
/// Holds at most one line per product-variation pair, in the order the
/// lines were first added. Totals are computed from the lines on every read.
///
/// A cart loaded from JSON is checked against the same invariants the
/// commands maintain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredCart")]
pub struct Cart {
    lines: Vec<CartLine>,
}

#[derive(Deserialize)]
struct StoredCart {
    lines: Vec<CartLine>,
}

impl TryFrom<StoredCart> for Cart {
    type Error = CartError;

    fn try_from(stored: StoredCart) -> Result<Self, Self::Error> {
        let mut cart = Cart::new();
        for line in stored.lines {
            let key = line.key();
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity { key });
            }
            if line.quantity > line.inventory {
                return Err(CartError::AboveCeiling {
                    key,
                    quantity: line.quantity,
                    inventory: line.inventory,
                });
            }
            if cart.line(&key).is_some() {
                return Err(CartError::DuplicateLine { key });
            }
            cart.lines.push(line);
        }
        Ok(cart)
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;

    fn aggregate_type() -> &'static str {
        "Cart"
    }

    fn handle(&self, command: &Self::Command) -> Vec<Self::Event> {
        match command {
            CartCommand::Add(product) => self.handle_add(product),
            CartCommand::Remove(key) => match self.line(key) {
                Some(_) => vec![CartEvent::LineRemoved { key: key.clone() }],
                None => vec![],
            },
            CartCommand::Increment(key) => match self.line(key) {
                Some(line) if line.can_increment() => vec![CartEvent::QuantityChanged {
                    key: key.clone(),
                    from: line.quantity,
                    to: line.quantity + 1,
                }],
                _ => vec![],
            },
            CartCommand::Decrement(key) => match self.line(key) {
                Some(line) if line.quantity > 1 => vec![CartEvent::QuantityChanged {
                    key: key.clone(),
                    from: line.quantity,
                    to: line.quantity - 1,
                }],
                Some(_) => vec![CartEvent::LineRemoved { key: key.clone() }],
                None => vec![],
            },
            CartCommand::Clear if self.is_empty() => vec![],
            CartCommand::Clear => vec![CartEvent::Cleared],
        }
    }

    fn apply(&mut self, event: Self::Event) {
        tracing::debug!(event_type = event.event_type(), "applying cart event");

        match event {
            CartEvent::LineAdded(line) => self.apply_line_added(line),
            CartEvent::QuantityChanged { key, to, .. } => self.apply_quantity_changed(&key, to),
            CartEvent::LineRemoved { key } => self.lines.retain(|line| !line.matches(&key)),
            CartEvent::Cleared => self.lines.clear(),
        }
    }
}

// Query methods
impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line stored under `key`.
    pub fn line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.matches(key))
    }

    /// Returns the quantity held for `key`, or 0 if absent.
    pub fn quantity_of(&self, key: &LineKey) -> u32 {
        self.line(key).map_or(0, |line| line.quantity)
    }

    /// Returns true if an increment of `key` would change the cart.
    pub fn can_increment(&self, key: &LineKey) -> bool {
        self.line(key).is_some_and(CartLine::can_increment)
    }

    /// Returns the number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the sum of quantities across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Returns the sum of price × quantity across all lines.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns a read-only copy of the lines for order submission.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::new(self.lines.clone())
    }
}

// Command shortcuts
impl Cart {
    pub fn add(&mut self, product: ProductRef) -> Vec<CartEvent> {
        self.dispatch(CartCommand::Add(product))
    }

    pub fn remove(&mut self, key: &LineKey) -> Vec<CartEvent> {
        self.dispatch(CartCommand::Remove(key.clone()))
    }

    pub fn increment(&mut self, key: &LineKey) -> Vec<CartEvent> {
        self.dispatch(CartCommand::Increment(key.clone()))
    }

    pub fn decrement(&mut self, key: &LineKey) -> Vec<CartEvent> {
        self.dispatch(CartCommand::Decrement(key.clone()))
    }

    pub fn clear(&mut self) -> Vec<CartEvent> {
        self.dispatch(CartCommand::Clear)
    }
}

// Handle and apply helpers
impl Cart {
    fn handle_add(&self, product: &ProductRef) -> Vec<CartEvent> {
        let key = product.key();
        match self.line(&key) {
            // Re-adding keeps the price and ceiling recorded on the first add.
            Some(line) if line.can_increment() => vec![CartEvent::QuantityChanged {
                key,
                from: line.quantity,
                to: line.quantity + 1,
            }],
            Some(_) => vec![],
            None if product.inventory == 0 => vec![],
            None => vec![CartEvent::LineAdded(CartLine::from_ref(product))],
        }
    }

    fn apply_line_added(&mut self, line: CartLine) {
        let key = line.key();
        match self.lines.iter_mut().find(|existing| existing.matches(&key)) {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
    }

    fn apply_quantity_changed(&mut self, key: &LineKey, to: u32) {
        if to == 0 {
            self.lines.retain(|line| !line.matches(key));
        } else if let Some(line) = self.lines.iter_mut().find(|line| line.matches(key)) {
            line.quantity = to;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apples(inventory: u32) -> ProductRef {
        ProductRef::new("apples", "1kg", "Gala Apples", Money::from_cents(599), inventory)
    }

    fn key() -> LineKey {
        LineKey::new("apples", "1kg")
    }

    #[test]
    fn test_add_creates_line_at_one() {
        let mut cart = Cart::new();
        let events = cart.add(apples(100));

        assert!(matches!(events.as_slice(), [CartEvent::LineAdded(_)]));
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of(&key()), 1);
        assert_eq!(cart.subtotal().cents(), 599);
    }

    #[test]
    fn test_add_existing_increments() {
        let mut cart = Cart::new();
        cart.add(apples(100));
        let events = cart.add(apples(100));

        assert_eq!(
            events,
            vec![CartEvent::QuantityChanged {
                key: key(),
                from: 1,
                to: 2
            }]
        );
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.subtotal().cents(), 1198);
    }

    #[test]
    fn test_add_out_of_stock_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.add(apples(0)).is_empty());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_at_ceiling_is_noop() {
        let mut cart = Cart::new();
        cart.add(apples(1));
        assert!(cart.add(apples(1)).is_empty());
        assert_eq!(cart.quantity_of(&key()), 1);
    }

    #[test]
    fn test_readd_keeps_first_price() {
        let mut cart = Cart::new();
        cart.add(apples(5));
        cart.add(ProductRef::new(
            "apples",
            "1kg",
            "Gala Apples",
            Money::from_cents(999),
            5,
        ));

        assert_eq!(cart.line(&key()).unwrap().unit_price.cents(), 599);
        assert_eq!(cart.subtotal().cents(), 1198);
    }

    #[test]
    fn test_increment_respects_ceiling() {
        let mut cart = Cart::new();
        cart.add(apples(2));

        assert!(cart.can_increment(&key()));
        assert_eq!(cart.increment(&key()).len(), 1);
        assert!(!cart.can_increment(&key()));
        assert!(cart.increment(&key()).is_empty());
        assert_eq!(cart.quantity_of(&key()), 2);
    }

    #[test]
    fn test_increment_unknown_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.increment(&key()).is_empty());
        assert!(!cart.can_increment(&key()));
    }

    #[test]
    fn test_decrement_lowers_then_removes() {
        let mut cart = Cart::new();
        cart.add(apples(10));
        cart.increment(&key());

        cart.decrement(&key());
        assert_eq!(cart.quantity_of(&key()), 1);

        let events = cart.decrement(&key());
        assert_eq!(events, vec![CartEvent::LineRemoved { key: key() }]);
        assert!(cart.is_empty());
        assert!(cart.decrement(&key()).is_empty());
    }

    #[test]
    fn test_remove_deletes_whole_line() {
        let mut cart = Cart::new();
        cart.add(apples(10));
        cart.increment(&key());
        cart.increment(&key());

        cart.remove(&key());
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_variations_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(apples(10));
        cart.add(ProductRef::new(
            "apples",
            "3kg",
            "Gala Apples",
            Money::from_cents(1499),
            10,
        ));

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().cents(), 599 + 1499);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add(ProductRef::new("b", "x", "B", Money::from_cents(100), 5));
        cart.add(ProductRef::new("a", "x", "A", Money::from_cents(100), 5));
        cart.add(ProductRef::new("c", "x", "C", Money::from_cents(100), 5));
        cart.increment(&LineKey::new("a", "x"));

        let order: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        assert!(cart.clear().is_empty());

        cart.add(apples(10));
        assert_eq!(cart.clear(), vec![CartEvent::Cleared]);
        assert!(cart.is_empty());
        assert!(cart.subtotal().is_zero());
    }

    #[test]
    fn test_apply_zero_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add(apples(10));
        cart.apply(CartEvent::QuantityChanged {
            key: key(),
            from: 1,
            to: 0,
        });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut cart = Cart::new();
        cart.add(apples(10));
        let snapshot = cart.snapshot();

        cart.increment(&key());
        assert_eq!(snapshot.item_count(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_serialization() {
        let mut cart = Cart::new();
        cart.add(apples(10));
        cart.increment(&key());

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }

    fn stored_cart_json(lines: &[(&str, u32, u32)]) -> String {
        let lines: Vec<String> = lines
            .iter()
            .map(|(variation, quantity, inventory)| {
                format!(
                    r#"{{ "product_id": "apples", "variation_id": "{variation}", "name": "Gala Apples",
                         "unit_price": "5.99", "unit_label": "each", "quantity": {quantity},
                         "image": null, "inventory": {inventory} }}"#
                )
            })
            .collect();
        format!(r#"{{ "lines": [{}] }}"#, lines.join(","))
    }

    #[test]
    fn test_deserialize_valid_cart() {
        let cart: Cart =
            serde_json::from_str(&stored_cart_json(&[("1kg", 2, 5), ("3kg", 1, 1)])).unwrap();
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal().cents(), 599 * 3);
    }

    #[test]
    fn test_deserialize_rejects_zero_quantity() {
        let result = serde_json::from_str::<Cart>(&stored_cart_json(&[("1kg", 0, 5)]));
        assert!(result.unwrap_err().to_string().contains("quantity 0"));
    }

    #[test]
    fn test_deserialize_rejects_quantity_above_ceiling() {
        let result = serde_json::from_str::<Cart>(&stored_cart_json(&[("1kg", 9, 2)]));
        assert!(result.unwrap_err().to_string().contains("only 2 are in stock"));
    }

    #[test]
    fn test_deserialize_rejects_duplicate_key() {
        let result =
            serde_json::from_str::<Cart>(&stored_cart_json(&[("1kg", 1, 5), ("1kg", 2, 5)]));
        assert!(result.unwrap_err().to_string().contains("more than once"));
    }

    #[test]
    fn test_item_count_saturates() {
        let max = u32::MAX;
        let cart: Cart =
            serde_json::from_str(&stored_cart_json(&[("1kg", max, max), ("3kg", max, max)]))
                .unwrap();

        assert_eq!(cart.item_count(), u32::MAX);
        assert_eq!(cart.snapshot().item_count(), u32::MAX);
        assert_eq!(cart.subtotal().cents(), 599 * i64::from(u32::MAX) * 2);
    }
}
