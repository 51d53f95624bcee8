//! # Limit Order Book Matching Engine with a Deterministic Market Simulator
//!
//! A price-time priority central limit order book coupled with a
//! discrete-event simulator that drives it with synthetic order flow and
//! lets pluggable trading strategies quote into, and take from, the book.
//!
//! ## Key Features
//!
//! - **Price-time priority matching**: limit and market orders, FIFO
//!   levels, cancels, and modifies with exchange-style priority semantics
//!   (in-place quantity reductions keep priority, everything else goes to
//!   the back of the queue).
//!
//! - **Canonical integer price keys**: levels are keyed by a fixed-point
//!   micro-price, so matching and lookups never rely on floating-point
//!   equality; floats appear only at the API boundary.
//!
//! - **Aggregate depth cache**: every level maintains its total resting
//!   quantity, so depth and imbalance queries are reads, not scans.
//!
//! - **Deterministic event loop**: a `(time, seq)`-ordered queue gives the
//!   same fills and the same top-of-book for the same schedule and seeds,
//!   run after run.
//!
//! - **Fill attribution and accounting**: fills route back to the
//!   strategies that own either side, updating average-cost portfolios
//!   (realized PnL, mark-to-market) and per-strategy execution metrics.
//!
//! - **Strategies included**: an adaptive market maker (volatility-widened
//!   spread, inventory skew, imbalance lean) and a TWAP executor, behind a
//!   small `Strategy` trait.
//!
//! - **Seeded synthetic flow**: a pseudo-Poisson order generator with a
//!   platform-stable RNG; same seed, same stream.
//!
//! ## Design Goals
//!
//! 1. **Correctness**: every operation leaves the book uncrossed, the
//!    order index exact and the cached aggregates equal to their queues.
//! 2. **Determinism**: simulation output is a pure function of the initial
//!    schedule and the configured seeds.
//! 3. **Observability**: operations trace their decisions; results,
//!    snapshots and series serialize cleanly for downstream analysis.
//!
//! ## Use Cases
//!
//! - Back-testing quoting and execution strategies against a controlled
//!   microstructure.
//! - Studying order flow, spreads and book imbalance under synthetic
//!   regimes.
//! - A reference implementation of exchange-style matching semantics.
//!
//! ## Example
//!
//! ```
//! use matchbook_rs::prelude::*;
//!
//! let mut book = LimitOrderBook::new("DEMO");
//! book.place_limit(Order::limit("s1", Side::Sell, 101.0, 3, 1).unwrap());
//! book.place_limit(Order::limit("s2", Side::Sell, 102.0, 3, 2).unwrap());
//!
//! let fills = book.place_limit(Order::limit("b1", Side::Buy, 102.0, 10, 3).unwrap());
//! assert_eq!(fills.len(), 2);
//! assert_eq!(fills[0].price, 101.0);
//!
//! // the remainder rests at the aggressor's limit
//! assert_eq!(book.best_bid(), Some(102.0));
//! assert_eq!(book.best_ask(), None);
//! ```
//!
//! Driving the book through the simulator:
//!
//! ```
//! use matchbook_rs::prelude::*;
//!
//! let mut sim = MarketSimulator::with_strategies(vec![Box::new(
//!     AdaptiveMarketMaker::new("mm", AdaptiveMMConfig::default()),
//! )]);
//!
//! // seed liquidity so a mid exists
//! sim.schedule(
//!     0,
//!     EventPayload::Submit(Order::limit("seed_b", Side::Buy, 99.0, 20, 0).unwrap()),
//! );
//! sim.schedule(
//!     0,
//!     EventPayload::Submit(Order::limit("seed_s", Side::Sell, 101.0, 20, 0).unwrap()),
//! );
//!
//! // market flow plus a snapshot/tick cadence
//! let mut flow = PoissonOrderFlow::new(FlowConfig::default()).unwrap();
//! for (t, order) in flow.generate(1, 200, 100.0) {
//!     sim.schedule(t, EventPayload::Submit(order));
//! }
//! sim.schedule_snapshots(0, 200, 10);
//!
//! let result = sim.run(200);
//! assert_eq!(result.pnl_t.len(), 21);
//! assert!(result.pnl_series.contains_key("mm"));
//! ```

pub mod orderbook;
pub mod sim;

pub mod prelude;

pub use orderbook::{
    BookSnapshot, DepthView, Fill, LevelSnapshot, LimitOrderBook, Order, OrderBookError, OrderId,
    OrderKind, OrderSnapshot, PriceKey, Side, TopOfBook,
};
pub use sim::{
    Action, AdaptiveMMConfig, AdaptiveMarketMaker, Event, EventPayload, ExecutionMetrics,
    FlowConfig, FlowConfigError, MarketSimulator, PoissonOrderFlow, Portfolio, SimResult,
    SnapshotRecord, Strategy, TimeSeries, TsCounter, TwapExecutor,
};
