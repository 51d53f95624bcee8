//! Per-snapshot market quality time series.

use crate::orderbook::LimitOrderBook;
use serde::Serialize;

/// Levels of depth considered by the recorded imbalance.
const IMBALANCE_LEVELS: usize = 3;

/// Append-only series of top-of-book statistics, one entry per snapshot.
///
/// All four vectors are co-indexed by snapshot sequence. Undefined values
/// (one-sided or empty books) are recorded as `NaN` so the series stay
/// aligned.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TimeSeries {
    /// Snapshot times.
    pub t: Vec<u64>,
    /// Mid price, or `NaN` when either side was empty.
    pub mid: Vec<f64>,
    /// Best ask minus best bid, or `NaN` when either side was empty.
    pub spread: Vec<f64>,
    /// Top-3-level imbalance, or `NaN` when the top-3 total was zero.
    pub imbalance: Vec<f64>,
}

impl TimeSeries {
    /// An empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current book state at time `now`.
    pub fn record(&mut self, now: u64, book: &LimitOrderBook) {
        self.t.push(now);
        self.mid.push(book.mid_price().unwrap_or(f64::NAN));
        self.spread.push(book.spread().unwrap_or(f64::NAN));
        self.imbalance
            .push(book.imbalance(IMBALANCE_LEVELS).unwrap_or(f64::NAN));
    }

    /// Number of recorded snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}
