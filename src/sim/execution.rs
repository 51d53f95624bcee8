//! Per-strategy execution volume counters.

use crate::orderbook::{Fill, Side};
use serde::Serialize;

/// Volume counters for one strategy.
///
/// `market_volume` is the total executed volume of the whole run (every
/// fill the engine produced), which makes it the denominator for
/// share-of-flow analysis. The other counters only accumulate fills in
/// which the strategy owned one side.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ExecutionMetrics {
    /// Total executed volume in the market, from all fills.
    pub market_volume: u64,
    /// Quantity executed by this strategy, maker or taker.
    pub filled_qty: u64,
    /// Buy-side portion of `filled_qty`.
    pub buy_qty: u64,
    /// Sell-side portion of `filled_qty`.
    pub sell_qty: u64,
}

impl ExecutionMetrics {
    /// Accumulate market-wide volume from a batch of fills.
    pub fn record_market_volume(&mut self, fills: &[Fill]) {
        for fill in fills {
            self.market_volume += fill.qty;
        }
    }

    /// Accumulate a fill this strategy took part in, on the given side.
    pub fn on_fill(&mut self, fill: &Fill, side: Side) {
        self.filled_qty += fill.qty;
        match side {
            Side::Buy => self.buy_qty += fill.qty,
            Side::Sell => self.sell_qty += fill.qty,
        }
    }

    /// This strategy's share of total executed volume, or `None` before
    /// any volume has printed.
    #[must_use]
    pub fn share_of_flow(&self) -> Option<f64> {
        if self.market_volume == 0 {
            return None;
        }
        Some(self.filled_qty as f64 / self.market_volume as f64)
    }
}
