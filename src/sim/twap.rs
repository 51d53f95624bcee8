//! A time-sliced market-order executor.

use super::event::EventPayload;
use super::portfolio::Portfolio;
use super::strategy::{Action, Strategy, TsCounter};
use crate::orderbook::{LimitOrderBook, Order, Side};
use std::collections::HashSet;
use tracing::warn;

/// Executes a parent order as evenly sized market-order slices across a
/// time window.
///
/// Every `tick_interval` ticks inside `[start, end]` it sends one slice of
/// `max(1, remaining / slices_left)` shares, where `slices_left` counts
/// the refresh opportunities left in the window (inclusive). Each slice
/// carries a fresh `"{name}_{now}"` id so fills attribute cleanly.
pub struct TwapExecutor {
    name: String,
    side: Side,
    total_qty: u64,
    start: u64,
    end: u64,
    tick_interval: u64,
    portfolio: Portfolio,
    ts: TsCounter,
    sent: u64,
    last_slice_t: Option<u64>,
    slice_ids: HashSet<String>,
}

impl TwapExecutor {
    /// Create an executor working `total_qty` on `side` over
    /// `[start, end]`, slicing every `tick_interval` ticks.
    #[must_use]
    pub fn new(
        name: &str,
        side: Side,
        total_qty: u64,
        start: u64,
        end: u64,
        tick_interval: u64,
    ) -> Self {
        Self {
            name: name.to_string(),
            side,
            total_qty,
            start,
            end,
            tick_interval: tick_interval.max(1),
            portfolio: Portfolio::new(),
            ts: TsCounter::new(),
            sent: 0,
            last_slice_t: None,
            slice_ids: HashSet::new(),
        }
    }

    /// Quantity already sent to the market.
    #[must_use]
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// Quantity of the parent order not yet sent.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.total_qty - self.sent
    }
}

impl Strategy for TwapExecutor {
    fn name(&self) -> &str {
        &self.name
    }

    fn owns(&self, order_id: &str) -> bool {
        self.slice_ids.contains(order_id)
    }

    fn on_tick(&mut self, now: u64, _book: &LimitOrderBook) -> Vec<Action> {
        if now < self.start || now > self.end {
            return Vec::new();
        }
        if let Some(last) = self.last_slice_t {
            if now - last < self.tick_interval {
                return Vec::new();
            }
        }
        let remaining = self.remaining();
        if remaining == 0 {
            return Vec::new();
        }

        let slices_left = ((self.end - now) / self.tick_interval + 1).max(1);
        let qty = (remaining / slices_left).max(1);

        let id = format!("{}_{}", self.name, now);
        let ts = self.ts.next(now);
        let order = match Order::market(id.clone(), self.side, qty, ts) {
            Ok(order) => order,
            Err(err) => {
                warn!("{}: dropping slice at t={}: {}", self.name, now, err);
                return Vec::new();
            }
        };

        self.slice_ids.insert(id);
        self.sent += qty;
        self.last_slice_t = Some(now);
        vec![Action::new(now, EventPayload::Submit(order))]
    }

    fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    fn portfolio_mut(&mut self) -> &mut Portfolio {
        &mut self.portfolio
    }
}
