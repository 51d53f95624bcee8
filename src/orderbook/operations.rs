//! Book operations: placing, cancelling and modifying orders.

use super::book::LimitOrderBook;
use super::order::{Order, Side};
use super::price::PriceKey;
use super::trade::Fill;
use tracing::{debug, trace, warn};

impl LimitOrderBook {
    /// Place a limit order: match whatever crosses, rest the remainder.
    ///
    /// Returns the fills in execution order. A market-kind order handed to
    /// this method is routed to [`Self::place_market`].
    pub fn place_limit(&mut self, mut order: Order) -> Vec<Fill> {
        let Some(price) = order.limit_price() else {
            trace!("order {} is market-kind, routing to place_market", order.id);
            return self.place_market(order);
        };
        trace!(
            "placing limit {} {} {} x {} ts={}",
            order.id, order.side, price, order.qty, order.ts
        );

        let limit = PriceKey::from_f64(price);
        let fills = self.match_incoming(&mut order, Some(limit));
        if order.qty > 0 {
            self.rest(order, limit);
        }
        fills
    }

    /// Place a market order: match only, never rest.
    ///
    /// Any quantity left after crossable liquidity is exhausted is
    /// discarded; the caller observes it as a shorter fill list.
    pub fn place_market(&mut self, mut order: Order) -> Vec<Fill> {
        trace!(
            "placing market {} {} x {} ts={}",
            order.id, order.side, order.qty, order.ts
        );
        let fills = self.match_incoming(&mut order, None);
        if order.qty > 0 {
            debug!(
                "market order {} left {} unfilled; remainder discarded",
                order.id, order.qty
            );
        }
        fills
    }

    /// Cancel a resting order by id. Returns whether removal occurred.
    ///
    /// Unknown ids return `false`. A stale index entry (the index points
    /// at a price with no matching resting order) is cleaned up and also
    /// reported as `false`.
    pub fn cancel(&mut self, order_id: &str) -> bool {
        let Some((side, price)) = self.order_locations.get(order_id).copied() else {
            return false;
        };
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };

        let Some(level) = book.get_mut(&price) else {
            warn!(
                "index pointed {} at missing {} level {}; dropping stale entry",
                order_id, side, price
            );
            self.order_locations.remove(order_id);
            return false;
        };

        let removed = level.remove(order_id);
        if removed.is_some() && level.is_empty() {
            book.remove(&price);
        }
        if removed.is_none() {
            warn!(
                "index pointed {} at {} level {} but the level does not hold it; dropping stale entry",
                order_id, side, price
            );
        }
        self.order_locations.remove(order_id);
        let cancelled = removed.is_some();
        trace!("cancel {} -> {}", order_id, cancelled);
        cancelled
    }

    /// Modify a resting order's price and/or quantity.
    ///
    /// A pure quantity reduction (`new_price` absent, `0 < new_qty <
    /// current`) is applied in place and keeps time priority. Any other
    /// change cancels the order and re-inserts it with the supplied `ts`,
    /// sending it to the tail of its (possibly new) level; if the new
    /// price now crosses, the re-inserted order trades like a fresh limit
    /// placement.
    ///
    /// The effective price and quantity are validated before anything is
    /// touched, so a rejected modify returns `false` with no side effects.
    /// Unknown ids also return `false`.
    pub fn modify(
        &mut self,
        order_id: &str,
        new_price: Option<f64>,
        new_qty: Option<u64>,
        ts: u64,
    ) -> bool {
        let Some((side, price)) = self.order_locations.get(order_id).copied() else {
            return false;
        };
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let Some(level) = book.get_mut(&price) else {
            warn!(
                "index pointed {} at missing {} level {}; dropping stale entry",
                order_id, side, price
            );
            self.order_locations.remove(order_id);
            return false;
        };
        let Some(current) = level.get(order_id) else {
            warn!(
                "index pointed {} at {} level {} but the level does not hold it; dropping stale entry",
                order_id, side, price
            );
            self.order_locations.remove(order_id);
            return false;
        };
        let current_qty = current.qty;

        // Pure reduction keeps the order's place in the queue.
        if new_price.is_none() {
            if let Some(qty) = new_qty {
                if qty > 0 && qty < current_qty {
                    trace!("modify {}: reduce {} -> {} in place", order_id, current_qty, qty);
                    return level.reduce_order(order_id, qty);
                }
            }
        }

        // Everything else re-queues: validate first so a rejected modify
        // leaves the book untouched.
        let target_price = new_price.unwrap_or_else(|| price.to_f64());
        let target_qty = new_qty.unwrap_or(current_qty);
        let Ok(replacement) = Order::limit(order_id.to_owned(), side, target_price, target_qty, ts)
        else {
            trace!(
                "modify {}: rejected replacement px={} qty={}",
                order_id, target_price, target_qty
            );
            return false;
        };

        let _ = level.remove(order_id);
        if level.is_empty() {
            book.remove(&price);
        }
        self.order_locations.remove(order_id);

        trace!(
            "modify {}: re-queued at px={} qty={} ts={}",
            order_id, target_price, target_qty, ts
        );
        let _ = self.place_limit(replacement);
        true
    }
}
