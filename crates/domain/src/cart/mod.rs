//! Shopping cart aggregate and related types.

mod aggregate;
mod commands;
mod events;
mod line;
mod snapshot;

pub use aggregate::Cart;
pub use commands::CartCommand;
pub use events::CartEvent;
pub use line::CartLine;
pub use snapshot::CartSnapshot;

use common::LineKey;
use thiserror::Error;

/// Reasons a stored cart is rejected when it is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Line {key} has quantity 0")]
    ZeroQuantity { key: LineKey },

    #[error("Line {key} holds {quantity} but only {inventory} are in stock")]
    AboveCeiling {
        key: LineKey,
        quantity: u32,
        inventory: u32,
    },

    #[error("Line {key} appears more than once")]
    DuplicateLine { key: LineKey },
}
