//! Seeded synthetic order flow.

use crate::orderbook::{Order, Side};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration for [`PoissonOrderFlow`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowConfig {
    /// RNG seed; identical seeds produce identical order streams.
    pub seed: u64,
    /// Average number of orders per 100 time units.
    pub intensity_per_100: f64,
    /// Smallest order quantity.
    pub min_qty: u64,
    /// Largest order quantity.
    pub max_qty: u64,
    /// Price increment for limit placement around the reference mid.
    pub tick: f64,
    /// Furthest limit placement from the reference mid, in ticks.
    pub max_ticks_away: u32,
    /// Probability an emitted order is a market order.
    pub p_market: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            seed: 7,
            intensity_per_100: 20.0,
            min_qty: 1,
            max_qty: 10,
            tick: 1.0,
            max_ticks_away: 5,
            p_market: 0.05,
        }
    }
}

/// Rejected [`FlowConfig`] values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum FlowConfigError {
    /// `intensity_per_100` must be non-negative and finite.
    #[error("intensity_per_100 must be non-negative and finite, got {0}")]
    InvalidIntensity(f64),
    /// Quantity bounds must satisfy `1 <= min_qty <= max_qty`.
    #[error("quantity bounds must satisfy 1 <= min_qty <= max_qty, got {min}..={max}")]
    InvalidQtyBounds {
        /// Configured minimum.
        min: u64,
        /// Configured maximum.
        max: u64,
    },
    /// `tick` must be strictly positive and finite.
    #[error("tick must be strictly positive and finite, got {0}")]
    InvalidTick(f64),
    /// `max_ticks_away` must be at least 1.
    #[error("max_ticks_away must be at least 1")]
    InvalidTicksAway,
    /// `p_market` must lie in `[0, 1]`.
    #[error("p_market must lie in [0, 1], got {0}")]
    InvalidMarketProbability(f64),
}

impl FlowConfig {
    /// Check the configuration for internal consistency.
    ///
    /// # Errors
    /// Returns the first [`FlowConfigError`] found.
    pub fn validate(&self) -> Result<(), FlowConfigError> {
        if !self.intensity_per_100.is_finite() || self.intensity_per_100 < 0.0 {
            return Err(FlowConfigError::InvalidIntensity(self.intensity_per_100));
        }
        if self.min_qty == 0 || self.min_qty > self.max_qty {
            return Err(FlowConfigError::InvalidQtyBounds {
                min: self.min_qty,
                max: self.max_qty,
            });
        }
        if !self.tick.is_finite() || self.tick <= 0.0 {
            return Err(FlowConfigError::InvalidTick(self.tick));
        }
        if self.max_ticks_away == 0 {
            return Err(FlowConfigError::InvalidTicksAway);
        }
        if !(0.0..=1.0).contains(&self.p_market) {
            return Err(FlowConfigError::InvalidMarketProbability(self.p_market));
        }
        Ok(())
    }
}

/// Discrete-time pseudo-Poisson order emitter.
///
/// For each integer time step, with probability
/// `min(1, intensity_per_100 / 100)` it emits one order: fair-coin side,
/// uniform quantity, and either a market order (probability `p_market`)
/// or a limit order placed `1..=max_ticks_away` ticks away from the
/// reference mid on the passive side, so generated limits never cross the
/// reference by construction.
///
/// The stream is a pure function of the seed: two generators built from
/// the same config emit identical orders.
pub struct PoissonOrderFlow {
    cfg: FlowConfig,
    rng: ChaCha8Rng,
    next_id: u64,
}

impl PoissonOrderFlow {
    /// Build a generator from a validated config.
    ///
    /// # Errors
    /// Returns [`FlowConfigError`] when the config is inconsistent.
    pub fn new(cfg: FlowConfig) -> Result<Self, FlowConfigError> {
        cfg.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        Ok(Self {
            cfg,
            rng,
            next_id: 0,
        })
    }

    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("o{:06}", self.next_id)
    }

    /// Generate the timestamped orders for `start..=end` around `ref_mid`.
    ///
    /// Limit prices that would come out non-positive (a reference mid too
    /// close to zero for the configured tick) are skipped with a warning.
    pub fn generate(&mut self, start: u64, end: u64, ref_mid: f64) -> Vec<(u64, Order)> {
        let p = (self.cfg.intensity_per_100 / 100.0).min(1.0);
        let mut out = Vec::new();

        for t in start..=end {
            if self.rng.random::<f64>() > p {
                continue;
            }

            let side = if self.rng.random::<f64>() < 0.5 {
                Side::Buy
            } else {
                Side::Sell
            };
            let qty = self.rng.random_range(self.cfg.min_qty..=self.cfg.max_qty);
            let is_market = self.rng.random::<f64>() < self.cfg.p_market;

            let id = self.next_id();
            if is_market {
                match Order::market(id, side, qty, t) {
                    Ok(order) => out.push((t, order)),
                    Err(err) => warn!("flow: dropping market order at t={}: {}", t, err),
                }
                continue;
            }

            let ticks = self.rng.random_range(1..=self.cfg.max_ticks_away);
            let offset = f64::from(ticks) * self.cfg.tick;
            let price = match side {
                Side::Buy => ref_mid - offset,
                Side::Sell => ref_mid + offset,
            };
            match Order::limit(id, side, price, qty, t) {
                Ok(order) => out.push((t, order)),
                Err(err) => warn!("flow: dropping limit order at t={}: {}", t, err),
            }
        }

        out
    }
}
