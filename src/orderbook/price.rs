//! Canonical fixed-point price keys.
//!
//! Price levels are keyed by an integer micro-price rather than the raw
//! `f64`, so level lookup and crossing comparisons never depend on exact
//! floating-point equality. Floats appear only at the API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of integer units per quote unit (six decimal places).
const PRICE_SCALE: f64 = 1_000_000.0;

/// A price expressed in micro-units of the quote currency.
///
/// Construction rounds to the nearest micro-unit, which also defines the
/// crate-wide numeric compatibility contract: two prices that agree to six
/// decimals are the same level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PriceKey(u64);

impl PriceKey {
    /// Encode a price. Callers validate positivity and finiteness first;
    /// see [`crate::Order::limit`].
    #[must_use]
    #[inline]
    pub fn from_f64(price: f64) -> Self {
        Self((price * PRICE_SCALE).round() as u64)
    }

    /// Decode back to a float price.
    #[must_use]
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / PRICE_SCALE
    }

    /// The raw micro-unit count.
    #[must_use]
    #[inline]
    pub fn micro_units(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PriceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}
