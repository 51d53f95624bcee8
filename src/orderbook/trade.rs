//! Execution records produced by the matching engine.

use super::order::OrderId;
use serde::{Deserialize, Serialize};

/// A single execution between an incoming aggressor and a resting order.
///
/// Fills are emitted in execution order. The price is always the maker's
/// resting price, never the taker's limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// The incoming (aggressor) order.
    pub taker_order_id: OrderId,
    /// The resting order that was consumed.
    pub maker_order_id: OrderId,
    /// Execution price in quote units.
    pub price: f64,
    /// Executed quantity in base units.
    pub qty: u64,
}

impl Fill {
    /// Create a fill record.
    #[must_use]
    pub fn new(
        taker_order_id: impl Into<OrderId>,
        maker_order_id: impl Into<OrderId>,
        price: f64,
        qty: u64,
    ) -> Self {
        Self {
            taker_order_id: taker_order_id.into(),
            maker_order_id: maker_order_id.into(),
            price,
            qty,
        }
    }

    /// Signed notional of this execution (price times quantity).
    #[must_use]
    #[inline]
    pub fn notional(&self) -> f64 {
        self.price * self.qty as f64
    }
}
