//! Order primitives: side, kind and the order record itself.

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, opaque order identifier supplied by the caller.
pub type OrderId = String;

/// The direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy orders rest on the bid side and take from the ask side.
    Buy,
    /// Sell orders rest on the ask side and take from the bid side.
    Sell,
}

impl Side {
    /// The side this order matches against.
    #[must_use]
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// How an order executes.
///
/// The kind is a closed sum so dispatch is explicit: a market order has no
/// price at all rather than a sentinel value the matching engine must know
/// to ignore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderKind {
    /// Match up to `price`, rest the remainder.
    Limit {
        /// The limit price in quote units. Strictly positive and finite.
        price: f64,
    },
    /// Match against whatever liquidity exists; never rests.
    Market,
}

/// A single order.
///
/// `qty` is mutable while the order trades; `id`, `side` and the limit
/// price are immutable for the lifetime of the order. `ts` is a strictly
/// increasing sequence number used for time priority within a price level.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Unique identifier.
    pub id: OrderId,
    /// Buy or sell.
    pub side: Side,
    /// Limit or market execution.
    pub kind: OrderKind,
    /// Remaining quantity in base units.
    pub qty: u64,
    /// Time-priority sequence number.
    pub ts: u64,
}

impl Order {
    /// Create a limit order.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidPrice`] when `price` is not a
    /// strictly positive finite number, and
    /// [`OrderBookError::InvalidQuantity`] when `qty` is zero.
    pub fn limit(
        id: impl Into<OrderId>,
        side: Side,
        price: f64,
        qty: u64,
        ts: u64,
    ) -> Result<Self, OrderBookError> {
        if !price.is_finite() || price <= 0.0 {
            return Err(OrderBookError::InvalidPrice { price });
        }
        if qty == 0 {
            return Err(OrderBookError::InvalidQuantity { quantity: qty });
        }
        Ok(Self {
            id: id.into(),
            side,
            kind: OrderKind::Limit { price },
            qty,
            ts,
        })
    }

    /// Create a market order.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidQuantity`] when `qty` is zero.
    pub fn market(
        id: impl Into<OrderId>,
        side: Side,
        qty: u64,
        ts: u64,
    ) -> Result<Self, OrderBookError> {
        if qty == 0 {
            return Err(OrderBookError::InvalidQuantity { quantity: qty });
        }
        Ok(Self {
            id: id.into(),
            side,
            kind: OrderKind::Market,
            qty,
            ts,
        })
    }

    /// The limit price, or `None` for market orders.
    #[must_use]
    #[inline]
    pub fn limit_price(&self) -> Option<f64> {
        match self.kind {
            OrderKind::Limit { price } => Some(price),
            OrderKind::Market => None,
        }
    }

    /// Whether this is a market order.
    #[must_use]
    #[inline]
    pub fn is_market(&self) -> bool {
        matches!(self.kind, OrderKind::Market)
    }
}
