//! Simulation events and their total ordering.

use crate::orderbook::{Order, OrderId};
use std::cmp::Ordering;

/// What an event does when it is dispatched.
///
/// The payload is a closed sum so scheduling is typed end to end: a cancel
/// carries exactly an order id, a modify exactly its options, and the
/// simulator dispatch is an exhaustive match.
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// Place an order (limit or market, per its kind).
    Submit(Order),
    /// Cancel a resting order.
    Cancel {
        /// The order to cancel.
        order_id: OrderId,
    },
    /// Modify a resting order. Absent options keep the current value.
    Modify {
        /// The order to modify.
        order_id: OrderId,
        /// Replacement price, if changing.
        new_price: Option<f64>,
        /// Replacement quantity, if changing.
        new_qty: Option<u64>,
    },
    /// Record analytics and tick every strategy.
    Snapshot,
}

/// A scheduled event.
///
/// Events are totally ordered by `(time, seq)`; the payload never
/// participates in comparisons. `seq` is assigned at schedule time and is
/// strictly increasing, so events sharing a logical time dispatch in the
/// order they were scheduled.
#[derive(Debug, Clone)]
pub struct Event {
    /// Logical tick at which the event fires.
    pub time: u64,
    /// Schedule-order tiebreaker within a tick.
    pub seq: u64,
    /// The action to dispatch.
    pub payload: EventPayload,
}

impl PartialEq for Event {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for Event {}

impl PartialOrd for Event {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Event {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.time, self.seq).cmp(&(other.time, other.seq))
    }
}
