//! An adaptive two-sided market maker.

use super::event::EventPayload;
use super::portfolio::Portfolio;
use super::strategy::{Action, Strategy, TsCounter};
use crate::orderbook::{LimitOrderBook, Order, Side};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::warn;

/// Tuning knobs for [`AdaptiveMarketMaker`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveMMConfig {
    /// Price increment used to convert tick counts into prices.
    pub tick_size: f64,
    /// Half spread quoted in a flat market, in ticks.
    pub base_half_spread_ticks: i64,
    /// Quote size per side.
    pub size: u64,
    /// Minimum ticks between quote refreshes.
    pub tick_interval: u64,
    /// Inventory the maker steers toward.
    pub inv_target: i64,
    /// Hard inventory bound; quoting stops on the loaded side beyond it.
    pub inv_limit: i64,
    /// Ticks of skew per unit of inventory error.
    pub inv_k: f64,
    /// Number of mids kept for the volatility proxy.
    pub vol_window: usize,
    /// Ticks of extra half spread per unit of mid volatility.
    pub vol_k: f64,
    /// Ticks of skew per unit of top-3 imbalance.
    pub imb_k: f64,
}

impl Default for AdaptiveMMConfig {
    fn default() -> Self {
        Self {
            tick_size: 1.0,
            base_half_spread_ticks: 1,
            size: 5,
            tick_interval: 10,
            inv_target: 0,
            inv_limit: 25,
            inv_k: 0.08,
            vol_window: 30,
            vol_k: 3.0,
            imb_k: 2.0,
        }
    }
}

/// A market maker that re-quotes both sides around mid every
/// `tick_interval` ticks, widening with realized mid volatility, skewing
/// against inventory and leaning with book imbalance.
///
/// Both quotes reuse the same two order ids (`{name}_bid`, `{name}_ask`),
/// cancelled unconditionally before each refresh, so every refresh resets
/// the quotes' time priority.
pub struct AdaptiveMarketMaker {
    name: String,
    cfg: AdaptiveMMConfig,
    portfolio: Portfolio,
    ts: TsCounter,
    bid_id: String,
    ask_id: String,
    last_quote_t: Option<u64>,
    mid_history: VecDeque<f64>,
}

impl AdaptiveMarketMaker {
    /// Create a maker with the given name and configuration.
    #[must_use]
    pub fn new(name: &str, cfg: AdaptiveMMConfig) -> Self {
        Self {
            bid_id: format!("{name}_bid"),
            ask_id: format!("{name}_ask"),
            name: name.to_string(),
            cfg,
            portfolio: Portfolio::new(),
            ts: TsCounter::new(),
            last_quote_t: None,
            mid_history: VecDeque::new(),
        }
    }

    /// Mean absolute change of the recorded mids; zero until two mids
    /// have been seen.
    fn vol_proxy(&self) -> f64 {
        if self.mid_history.len() < 2 {
            return 0.0;
        }
        let diffs: f64 = self
            .mid_history
            .iter()
            .zip(self.mid_history.iter().skip(1))
            .map(|(a, b)| (b - a).abs())
            .sum();
        diffs / (self.mid_history.len() - 1) as f64
    }

    fn record_mid(&mut self, mid: f64) {
        self.mid_history.push_back(mid);
        while self.mid_history.len() > self.cfg.vol_window {
            self.mid_history.pop_front();
        }
    }

    fn quote(&mut self, now: u64, side: Side, price: f64) -> Option<Action> {
        let id = match side {
            Side::Buy => self.bid_id.clone(),
            Side::Sell => self.ask_id.clone(),
        };
        let ts = self.ts.next(now);
        match Order::limit(id, side, price, self.cfg.size, ts) {
            Ok(order) => Some(Action::new(now, EventPayload::Submit(order))),
            Err(err) => {
                warn!("{}: skipping {} quote at {}: {}", self.name, side, price, err);
                None
            }
        }
    }
}

impl Strategy for AdaptiveMarketMaker {
    fn name(&self) -> &str {
        &self.name
    }

    fn owns(&self, order_id: &str) -> bool {
        order_id == self.bid_id || order_id == self.ask_id
    }

    fn on_tick(&mut self, now: u64, book: &LimitOrderBook) -> Vec<Action> {
        if let Some(last) = self.last_quote_t {
            if now - last < self.cfg.tick_interval {
                return Vec::new();
            }
        }
        let Some(mid) = book.mid_price() else {
            return Vec::new();
        };
        self.record_mid(mid);

        let half_spread = self.cfg.base_half_spread_ticks
            + (self.cfg.vol_k * self.vol_proxy() / self.cfg.tick_size).floor() as i64;

        let inv = self.portfolio.position;
        let inv_err = inv - self.cfg.inv_target;
        let clamp = self.cfg.base_half_spread_ticks + 5;
        let inv_skew = ((self.cfg.inv_k * inv_err as f64).floor() as i64).clamp(-clamp, clamp);

        let imb_skew = book
            .imbalance(3)
            .map_or(0, |imb| (self.cfg.imb_k * imb).floor() as i64);

        let total_skew = inv_skew + imb_skew;
        let bid_px = mid - (half_spread + total_skew) as f64 * self.cfg.tick_size;
        let ask_px = mid + (half_spread + total_skew) as f64 * self.cfg.tick_size;

        let mut actions = vec![
            Action::new(
                now,
                EventPayload::Cancel {
                    order_id: self.bid_id.clone(),
                },
            ),
            Action::new(
                now,
                EventPayload::Cancel {
                    order_id: self.ask_id.clone(),
                },
            ),
        ];

        if inv < self.cfg.inv_limit {
            actions.extend(self.quote(now, Side::Buy, bid_px));
        }
        if inv > -self.cfg.inv_limit {
            actions.extend(self.quote(now, Side::Sell, ask_px));
        }

        self.last_quote_t = Some(now);
        actions
    }

    fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    fn portfolio_mut(&mut self) -> &mut Portfolio {
        &mut self.portfolio
    }
}
