//! Prelude module that re-exports commonly used types and traits.
//!
//! Instead of importing each type individually, you can use:
//!
//! ```rust
//! use matchbook_rs::prelude::*;
//! ```

// Core order book types
pub use crate::orderbook::{
    Fill, LimitOrderBook, Order, OrderBookError, OrderId, OrderKind, Side,
};

// Book read models
pub use crate::orderbook::{BookSnapshot, DepthView, LevelSnapshot, OrderSnapshot, TopOfBook};

// Simulation types
pub use crate::sim::{Action, Event, EventPayload, MarketSimulator, SimResult, SnapshotRecord};

// Strategies and accounting
pub use crate::sim::{
    AdaptiveMMConfig, AdaptiveMarketMaker, ExecutionMetrics, Portfolio, Strategy, TimeSeries,
    TsCounter, TwapExecutor,
};

// Synthetic order flow
pub use crate::sim::{FlowConfig, FlowConfigError, PoissonOrderFlow};
