//! Cart commands.

use common::LineKey;

use crate::catalog::ProductRef;

/// A shopper action against the cart.
///
/// Every command is total: one that does not apply to the current cart
/// is a no-op, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add one unit of a product variation, creating the line if needed.
    Add(ProductRef),

    /// Delete a line regardless of its quantity.
    Remove(LineKey),

    /// Raise a line's quantity by one, up to its inventory ceiling.
    Increment(LineKey),

    /// Lower a line's quantity by one, removing the line at zero.
    Decrement(LineKey),

    /// Empty the cart after a successful order placement.
    Clear,
}

impl CartCommand {
    /// Returns the command name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CartCommand::Add(_) => "add",
            CartCommand::Remove(_) => "remove",
            CartCommand::Increment(_) => "increment",
            CartCommand::Decrement(_) => "decrement",
            CartCommand::Clear => "clear",
        }
    }
}
