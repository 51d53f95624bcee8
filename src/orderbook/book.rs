//! Core limit order book: price levels, the order index and read queries.

use super::level::PriceLevel;
use super::order::{OrderId, Side};
use super::price::PriceKey;
use super::snapshot::{DepthView, TopOfBook};
use std::collections::{BTreeMap, HashMap};

/// A price-time priority central limit order book.
///
/// Both sides are ordered maps keyed by [`PriceKey`]; the best bid is the
/// highest key on the bid side and the best ask the lowest key on the ask
/// side. Each level is a FIFO queue with a cached aggregate quantity, and
/// `order_locations` maps every resting order id to its `(side, price)`
/// so cancels and modifies never scan the book.
///
/// All mutation goes through [`place_limit`](Self::place_limit),
/// [`place_market`](Self::place_market), [`cancel`](Self::cancel) and
/// [`modify`](Self::modify); after each of those returns, the book is
/// uncrossed and every aggregate matches its queue.
#[derive(Debug, Default)]
pub struct LimitOrderBook {
    /// The symbol or identifier for this order book.
    pub(super) symbol: String,

    /// Bid side levels, keyed by price. Best bid is the last key.
    pub(super) bids: BTreeMap<PriceKey, PriceLevel>,

    /// Ask side levels, keyed by price. Best ask is the first key.
    pub(super) asks: BTreeMap<PriceKey, PriceLevel>,

    /// Resting order id to `(side, price)` for O(1) cancel lookup.
    pub(super) order_locations: HashMap<OrderId, (Side, PriceKey)>,

    /// The price of the most recent execution, if any.
    pub(super) last_trade_price: Option<f64>,
}

impl LimitOrderBook {
    /// Create an empty book for the given symbol.
    #[must_use]
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            ..Self::default()
        }
    }

    /// The symbol of this order book.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The best (highest) bid price, if any.
    ///
    /// ```
    /// use matchbook_rs::prelude::*;
    ///
    /// let mut book = LimitOrderBook::new("DEMO");
    /// assert_eq!(book.best_bid(), None);
    /// book.place_limit(Order::limit("b1", Side::Buy, 99.0, 5, 1).unwrap());
    /// assert_eq!(book.best_bid(), Some(99.0));
    /// ```
    #[must_use]
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.last_key_value().map(|(key, _)| key.to_f64())
    }

    /// The best (lowest) ask price, if any.
    #[must_use]
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first_key_value().map(|(key, _)| key.to_f64())
    }

    /// The arithmetic mean of best bid and best ask; `None` when either
    /// side is empty.
    #[must_use]
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Best ask minus best bid; `None` when either side is empty.
    #[must_use]
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Best bid, best ask and their midpoint in one read.
    #[must_use]
    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            mid: self.mid_price(),
        }
    }

    /// The price of the most recent execution, if any trade has occurred.
    #[must_use]
    pub fn last_trade_price(&self) -> Option<f64> {
        self.last_trade_price
    }

    /// Aggregate quantity per price for the first `levels` levels on each
    /// side, best first. Sides with fewer levels return what they have.
    ///
    /// Reads only the cached per-level aggregates.
    #[must_use]
    pub fn depth(&self, levels: usize) -> DepthView {
        DepthView {
            bids: self
                .bids
                .iter()
                .rev()
                .take(levels)
                .map(|(key, level)| (key.to_f64(), level.total_quantity()))
                .collect(),
            asks: self
                .asks
                .iter()
                .take(levels)
                .map(|(key, level)| (key.to_f64(), level.total_quantity()))
                .collect(),
        }
    }

    /// Total resting quantity across the first `levels` levels of one side.
    #[must_use]
    pub fn total_depth_at_levels(&self, levels: usize, side: Side) -> u64 {
        let iter: Box<dyn Iterator<Item = &PriceLevel>> = match side {
            Side::Buy => Box::new(self.bids.values().rev()),
            Side::Sell => Box::new(self.asks.values()),
        };
        iter.take(levels).map(PriceLevel::total_quantity).sum()
    }

    /// Top-`levels` order book imbalance:
    /// `(bid_qty - ask_qty) / (bid_qty + ask_qty)`.
    ///
    /// Positive values mean bid pressure, negative values ask pressure.
    /// `None` when the top-`levels` total quantity is zero.
    ///
    /// ```
    /// use matchbook_rs::prelude::*;
    ///
    /// let mut book = LimitOrderBook::new("DEMO");
    /// book.place_limit(Order::limit("b1", Side::Buy, 99.0, 60, 1).unwrap());
    /// book.place_limit(Order::limit("a1", Side::Sell, 101.0, 40, 2).unwrap());
    /// assert_eq!(book.imbalance(3), Some(0.2));
    /// ```
    #[must_use]
    pub fn imbalance(&self, levels: usize) -> Option<f64> {
        let bid_qty = self.total_depth_at_levels(levels, Side::Buy);
        let ask_qty = self.total_depth_at_levels(levels, Side::Sell);
        let total = bid_qty + ask_qty;
        if total == 0 {
            return None;
        }
        Some((bid_qty as f64 - ask_qty as f64) / total as f64)
    }

    /// Number of currently resting orders.
    #[must_use]
    pub fn order_count(&self) -> usize {
        self.order_locations.len()
    }

    /// Whether the given order currently rests in the book.
    #[must_use]
    pub fn contains(&self, order_id: &str) -> bool {
        self.order_locations.contains_key(order_id)
    }
}
