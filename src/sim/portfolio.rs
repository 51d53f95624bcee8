//! Single-asset portfolio accounting.

use crate::orderbook::{Fill, LimitOrderBook, Side};
use serde::Serialize;

/// Cash, position and PnL for one strategy.
///
/// Realized PnL is tracked with the average-cost method: buys into a long
/// (or sells into a short) blend the average cost, while trades that
/// reduce the position realize the difference against it. A fill that
/// flips the position through zero resets the average cost to the fill
/// price for the surviving remainder.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Portfolio {
    /// Quote-currency cash balance.
    pub cash: f64,
    /// Signed position in base units (positive long, negative short).
    pub position: i64,
    /// Average cost of the current position.
    pub avg_cost: f64,
    /// PnL realized by position-reducing fills, net of nothing (fees are
    /// taken out of cash, not out of realized PnL).
    pub realized_pnl: f64,
    /// Flat fee charged per share on every fill.
    pub fee_per_share: f64,
}

impl Portfolio {
    /// A flat portfolio with no fees.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A flat portfolio charging `fee_per_share` on every executed share.
    #[must_use]
    pub fn with_fee(fee_per_share: f64) -> Self {
        Self {
            fee_per_share,
            ..Self::default()
        }
    }

    /// Apply a fill in which this portfolio's order took part.
    ///
    /// `side` is the side of this portfolio's own order, whether it was
    /// maker or taker in the execution.
    pub fn on_fill(&mut self, fill: &Fill, side: Side) {
        let qty = fill.qty as i64;
        let qty_f = fill.qty as f64;
        let px = fill.price;
        let fee = self.fee_per_share * qty_f;

        match side {
            Side::Buy => {
                self.cash -= px * qty_f + fee;

                let new_pos = self.position + qty;
                if self.position == 0 {
                    self.avg_cost = px;
                } else if self.position > 0 {
                    self.avg_cost =
                        (self.avg_cost * self.position as f64 + px * qty_f) / new_pos as f64;
                } else {
                    let covered = qty.min(-self.position);
                    self.realized_pnl += (self.avg_cost - px) * covered as f64;
                    if new_pos > 0 {
                        self.avg_cost = px;
                    }
                }
                self.position = new_pos;
            }
            Side::Sell => {
                self.cash += px * qty_f - fee;

                let new_pos = self.position - qty;
                if self.position == 0 {
                    self.avg_cost = px;
                } else if self.position < 0 {
                    self.avg_cost =
                        (self.avg_cost * (-self.position) as f64 + px * qty_f) / (-new_pos) as f64;
                } else {
                    let sold = qty.min(self.position);
                    self.realized_pnl += (px - self.avg_cost) * sold as f64;
                    if new_pos < 0 {
                        self.avg_cost = px;
                    }
                }
                self.position = new_pos;
            }
        }
    }

    /// Realized plus unrealized PnL at the current mid price.
    ///
    /// `None` when the book has no mid (either side empty).
    #[must_use]
    pub fn mark_to_market(&self, book: &LimitOrderBook) -> Option<f64> {
        let mid = book.mid_price()?;
        let unrealized = if self.position > 0 {
            (mid - self.avg_cost) * self.position as f64
        } else if self.position < 0 {
            (self.avg_cost - mid) * (-self.position) as f64
        } else {
            0.0
        };
        Some(self.realized_pnl + unrealized)
    }
}
