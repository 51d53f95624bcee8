//! Serializable read models of book state.

use super::book::LimitOrderBook;
use super::order::{OrderId, Side};
use serde::{Deserialize, Serialize};

/// Best bid, best ask and their midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TopOfBook {
    /// Highest resting bid price, if any.
    pub best_bid: Option<f64>,
    /// Lowest resting ask price, if any.
    pub best_ask: Option<f64>,
    /// Arithmetic mean of best bid and best ask when both exist.
    pub mid: Option<f64>,
}

/// Aggregate quantity per price for the top levels of each side,
/// best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthView {
    /// `(price, total quantity)` pairs, highest bid first.
    pub bids: Vec<(f64, u64)>,
    /// `(price, total quantity)` pairs, lowest ask first.
    pub asks: Vec<(f64, u64)>,
}

/// One resting order inside a [`LevelSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    /// The order's identifier.
    pub order_id: OrderId,
    /// Remaining quantity.
    pub qty: u64,
    /// Time-priority sequence number.
    pub ts: u64,
}

/// One price level with its full FIFO queue, oldest order first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// The level's price.
    pub price: f64,
    /// Cached aggregate quantity for the level.
    pub total_qty: u64,
    /// The queued orders in time priority.
    pub orders: Vec<OrderSnapshot>,
}

/// A full copy of the book's resting state at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// The symbol of the snapshotted book.
    pub symbol: String,
    /// Bid levels, best (highest) first.
    pub bids: Vec<LevelSnapshot>,
    /// Ask levels, best (lowest) first.
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    /// Total resting quantity on one side across all levels.
    #[must_use]
    pub fn total_quantity(&self, side: Side) -> u64 {
        let levels = match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        };
        levels.iter().map(|level| level.total_qty).sum()
    }
}

impl LimitOrderBook {
    /// Capture the full resting state of the book, best levels first.
    #[must_use]
    pub fn snapshot(&self) -> BookSnapshot {
        let level_snapshot = |level: &super::level::PriceLevel| LevelSnapshot {
            price: level.price().to_f64(),
            total_qty: level.total_quantity(),
            orders: level
                .iter()
                .map(|order| OrderSnapshot {
                    order_id: order.id.clone(),
                    qty: order.qty,
                    ts: order.ts,
                })
                .collect(),
        };
        BookSnapshot {
            symbol: self.symbol.clone(),
            bids: self.bids.values().rev().map(level_snapshot).collect(),
            asks: self.asks.values().map(level_snapshot).collect(),
        }
    }
}
