//! Discrete-event market simulation: events, strategies, accounting and
//! synthetic order flow.

mod analytics;
mod event;
mod execution;
mod market_maker;
mod orderflow;
mod portfolio;
mod simulator;
mod strategy;
mod twap;

pub use analytics::TimeSeries;
pub use event::{Event, EventPayload};
pub use execution::ExecutionMetrics;
pub use market_maker::{AdaptiveMMConfig, AdaptiveMarketMaker};
pub use orderflow::{FlowConfig, FlowConfigError, PoissonOrderFlow};
pub use portfolio::Portfolio;
pub use simulator::{MarketSimulator, SimResult, SnapshotRecord};
pub use strategy::{Action, Strategy, TsCounter};
pub use twap::TwapExecutor;
