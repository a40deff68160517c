//! Cart events.

use common::LineKey;
use serde::{Deserialize, Serialize};

use crate::aggregate::DomainEvent;

use super::CartLine;

/// State changes of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum CartEvent {
    /// A new line was appended at quantity 1.
    LineAdded(CartLine),

    /// An existing line's quantity changed. `to` is always at least 1.
    QuantityChanged { key: LineKey, from: u32, to: u32 },

    /// A line was deleted.
    LineRemoved { key: LineKey },

    /// Every line was deleted.
    Cleared,
}

impl DomainEvent for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "LineAdded",
            CartEvent::QuantityChanged { .. } => "QuantityChanged",
            CartEvent::LineRemoved { .. } => "LineRemoved",
            CartEvent::Cleared => "Cleared",
        }
    }
}
