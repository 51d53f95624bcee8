//! The discrete-event simulation loop.

use super::analytics::TimeSeries;
use super::event::{Event, EventPayload};
use super::execution::ExecutionMetrics;
use super::strategy::Strategy;
use crate::orderbook::{Fill, LimitOrderBook, OrderId, Side, TopOfBook};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use tracing::trace;

/// Levels captured in each snapshot's depth view.
const SNAPSHOT_DEPTH_LEVELS: usize = 5;

/// Book state captured by one SNAPSHOT event.
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotRecord {
    /// Snapshot time.
    pub t: u64,
    /// Top of book at that time.
    pub top: TopOfBook,
    /// Aggregate depth for the top levels of each side.
    pub depth: crate::orderbook::DepthView,
}

/// Everything a simulation run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimResult {
    /// Every fill the engine emitted, in execution order.
    pub fills: Vec<Fill>,
    /// One record per SNAPSHOT event.
    pub snapshots: Vec<SnapshotRecord>,
    /// Snapshot times; indexes `pnl_series`.
    pub pnl_t: Vec<u64>,
    /// Per-strategy mark-to-market PnL sampled at each snapshot, `NaN`
    /// while the book had no mid.
    pub pnl_series: HashMap<String, Vec<f64>>,
}

/// Which strategy an order belongs to, and on which side.
#[derive(Debug, Clone, Copy)]
struct OwnerRecord {
    strategy: usize,
    side: Side,
}

/// Discrete-event simulator that owns the book and drives the strategies.
///
/// Events dispatch in `(time, seq)` order, so the run is deterministic for
/// a given initial schedule and strategy set. The simulator is the only
/// mutation path to the book; strategies observe it read-only from
/// `on_tick` and act by returning [`Action`](super::strategy::Action)s
/// which are scheduled behind any events already queued at the same time.
pub struct MarketSimulator {
    book: LimitOrderBook,
    queue: BinaryHeap<Reverse<Event>>,
    seq: u64,
    now: u64,
    strategies: Vec<Box<dyn Strategy>>,
    exec_metrics: Vec<ExecutionMetrics>,
    owners: HashMap<OrderId, OwnerRecord>,
    analytics: TimeSeries,
}

impl Default for MarketSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketSimulator {
    /// A simulator with an empty book and no strategies.
    #[must_use]
    pub fn new() -> Self {
        Self::with_book(LimitOrderBook::new("SIM"))
    }

    /// A simulator around an existing book.
    #[must_use]
    pub fn with_book(book: LimitOrderBook) -> Self {
        Self {
            book,
            queue: BinaryHeap::new(),
            seq: 0,
            now: 0,
            strategies: Vec::new(),
            exec_metrics: Vec::new(),
            owners: HashMap::new(),
            analytics: TimeSeries::new(),
        }
    }

    /// A simulator with an empty book and the given strategies.
    ///
    /// Strategy names key the result PnL series and must be unique.
    #[must_use]
    pub fn with_strategies(strategies: Vec<Box<dyn Strategy>>) -> Self {
        let mut sim = Self::new();
        for strategy in strategies {
            sim.add_strategy(strategy);
        }
        sim
    }

    /// Attach a strategy to the simulation.
    pub fn add_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
        self.exec_metrics.push(ExecutionMetrics::default());
    }

    /// The simulated book.
    #[must_use]
    pub fn book(&self) -> &LimitOrderBook {
        &self.book
    }

    /// The attached strategies.
    #[must_use]
    pub fn strategies(&self) -> &[Box<dyn Strategy>] {
        &self.strategies
    }

    /// The analytics series recorded so far.
    #[must_use]
    pub fn analytics(&self) -> &TimeSeries {
        &self.analytics
    }

    /// Execution metrics per strategy, in attachment order.
    pub fn execution_metrics(&self) -> impl Iterator<Item = (&str, &ExecutionMetrics)> {
        self.strategies
            .iter()
            .map(|s| s.name())
            .zip(self.exec_metrics.iter())
    }

    /// The current simulation time.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule an event. Events sharing a time dispatch in schedule
    /// order.
    pub fn schedule(&mut self, time: u64, payload: EventPayload) {
        self.seq += 1;
        self.queue.push(Reverse(Event {
            time,
            seq: self.seq,
            payload,
        }));
    }

    /// Schedule a SNAPSHOT every `every` ticks across `start..=end`.
    ///
    /// Snapshots double as the strategy tick hook, so this also fixes the
    /// cadence at which strategies run.
    pub fn schedule_snapshots(&mut self, start: u64, end: u64, every: u64) {
        let every = every.max(1);
        let mut t = start;
        while t <= end {
            self.schedule(t, EventPayload::Snapshot);
            t += every;
        }
    }

    /// Run until the queue drains or its head passes `until`.
    ///
    /// Returns the fills, snapshots and per-strategy PnL series the run
    /// produced. Events left beyond `until` stay queued for a later call.
    pub fn run(&mut self, until: u64) -> SimResult {
        let mut result = SimResult::default();
        for strategy in &self.strategies {
            result
                .pnl_series
                .insert(strategy.name().to_string(), Vec::new());
        }

        loop {
            let head_time = match self.queue.peek() {
                Some(Reverse(event)) => event.time,
                None => break,
            };
            if head_time > until {
                break;
            }
            let Some(Reverse(event)) = self.queue.pop() else {
                break;
            };
            self.now = event.time;
            self.dispatch(event, &mut result);
        }

        result
    }

    fn dispatch(&mut self, event: Event, result: &mut SimResult) {
        match event.payload {
            EventPayload::Submit(order) => {
                trace!("t={} submit {}", self.now, order.id);
                self.register_owner(&order.id, order.side);
                let fills = if order.is_market() {
                    self.book.place_market(order)
                } else {
                    self.book.place_limit(order)
                };
                for metrics in &mut self.exec_metrics {
                    metrics.record_market_volume(&fills);
                }
                for fill in &fills {
                    self.attribute_fill(fill);
                }
                result.fills.extend(fills);
            }

            EventPayload::Cancel { order_id } => {
                trace!("t={} cancel {}", self.now, order_id);
                let _ = self.book.cancel(&order_id);
                self.owners.remove(&order_id);
            }

            EventPayload::Modify {
                order_id,
                new_price,
                new_qty,
            } => {
                trace!("t={} modify {}", self.now, order_id);
                let _ = self.book.modify(&order_id, new_price, new_qty, self.now);
            }

            EventPayload::Snapshot => {
                self.analytics.record(self.now, &self.book);
                result.snapshots.push(SnapshotRecord {
                    t: self.now,
                    top: self.book.top_of_book(),
                    depth: self.book.depth(SNAPSHOT_DEPTH_LEVELS),
                });

                for i in 0..self.strategies.len() {
                    let actions = self.strategies[i].on_tick(self.now, &self.book);
                    for action in actions {
                        self.schedule(action.time, action.payload);
                    }
                }

                result.pnl_t.push(self.now);
                for strategy in &self.strategies {
                    let mtm = strategy
                        .portfolio()
                        .mark_to_market(&self.book)
                        .unwrap_or(f64::NAN);
                    if let Some(series) = result.pnl_series.get_mut(strategy.name()) {
                        series.push(mtm);
                    }
                }
            }
        }
    }

    /// Record which strategy claims the order, if any. First claim wins.
    fn register_owner(&mut self, order_id: &str, side: Side) {
        for (i, strategy) in self.strategies.iter().enumerate() {
            if strategy.owns(order_id) {
                self.owners
                    .insert(order_id.to_string(), OwnerRecord { strategy: i, side });
                return;
            }
        }
    }

    /// Route a fill to the portfolios and metrics of whoever owns either
    /// side of it.
    fn attribute_fill(&mut self, fill: &Fill) {
        if let Some(owner) = self.owners.get(&fill.maker_order_id).copied() {
            self.strategies[owner.strategy]
                .portfolio_mut()
                .on_fill(fill, owner.side);
            self.exec_metrics[owner.strategy].on_fill(fill, owner.side);
        }
        if let Some(owner) = self.owners.get(&fill.taker_order_id).copied() {
            self.strategies[owner.strategy]
                .portfolio_mut()
                .on_fill(fill, owner.side);
            self.exec_metrics[owner.strategy].on_fill(fill, owner.side);
        }
    }
}
