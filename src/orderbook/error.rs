//! Order book error types

use std::fmt;

/// Errors that can occur while constructing orders for the book.
///
/// Cancelling or modifying an unknown order is not an error: those
/// operations report `false` instead, and internal inconsistencies are
/// repaired in place rather than surfaced to the caller.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// Order price is not a strictly positive finite number.
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },

    /// Order quantity is zero.
    InvalidQuantity {
        /// The rejected quantity.
        quantity: u64,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidPrice { price } => {
                write!(f, "invalid price: {price} (must be positive and finite)")
            }
            OrderBookError::InvalidQuantity { quantity } => {
                write!(f, "invalid quantity: {quantity} (must be positive)")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
