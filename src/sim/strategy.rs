//! The strategy contract and its scheduling vocabulary.

use super::event::EventPayload;
use super::portfolio::Portfolio;
use crate::orderbook::LimitOrderBook;

/// Base of the strategy timestamp counters, chosen well above any market
/// flow timestamp so freshly quoted strategy orders never shadow market
/// orders that arrived earlier at the same price.
const STRATEGY_TS_BASE: u64 = 10_000_000;

/// An action a strategy wants scheduled, re-queued verbatim by the
/// simulator.
#[derive(Debug, Clone)]
pub struct Action {
    /// When the action should fire.
    pub time: u64,
    /// What the action does.
    pub payload: EventPayload,
}

impl Action {
    /// Create an action.
    #[must_use]
    pub fn new(time: u64, payload: EventPayload) -> Self {
        Self { time, payload }
    }
}

/// A trading strategy driven by the simulator.
///
/// Strategies are invoked synchronously on snapshot ticks, return the
/// actions they want scheduled, and own exactly one portfolio which the
/// simulator updates with the fills their orders take part in.
pub trait Strategy {
    /// Unique display name; also keys the result PnL series.
    fn name(&self) -> &str;

    /// Whether the given order id belongs to this strategy.
    fn owns(&self, order_id: &str) -> bool;

    /// Called on every snapshot tick with read access to the book.
    fn on_tick(&mut self, now: u64, book: &LimitOrderBook) -> Vec<Action>;

    /// This strategy's portfolio.
    fn portfolio(&self) -> &Portfolio;

    /// Mutable access for fill attribution.
    fn portfolio_mut(&mut self) -> &mut Portfolio;
}

/// Issues strictly increasing order timestamps for one strategy.
///
/// Timestamps start above [`STRATEGY_TS_BASE`] and never fall below the
/// current simulation time.
#[derive(Debug, Clone)]
pub struct TsCounter {
    counter: u64,
}

impl Default for TsCounter {
    fn default() -> Self {
        Self {
            counter: STRATEGY_TS_BASE,
        }
    }
}

impl TsCounter {
    /// A fresh counter at the strategy base.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The next timestamp: `max(now, counter)` with the counter bumped.
    pub fn next(&mut self, now: u64) -> u64 {
        self.counter += 1;
        now.max(self.counter)
    }
}
