//! The matching loop at the heart of the book.

use super::book::LimitOrderBook;
use super::order::{Order, Side};
use super::price::PriceKey;
use super::trade::Fill;
use tracing::trace;

impl LimitOrderBook {
    /// Match an incoming aggressor against the opposite side.
    ///
    /// Walks the opposite side best price first, trading
    /// `min(taker.qty, maker.qty)` at the maker's resting price until the
    /// taker is exhausted, the side empties, or the next price no longer
    /// crosses `limit`. `limit` of `None` matches unconditionally (market
    /// orders). Fully consumed makers are removed from their level and the
    /// order index; emptied levels are dropped.
    ///
    /// The taker's `qty` is decremented in place; the caller decides what
    /// to do with any remainder.
    pub(super) fn match_incoming(
        &mut self,
        taker: &mut Order,
        limit: Option<PriceKey>,
    ) -> Vec<Fill> {
        let mut fills = Vec::new();

        while taker.qty > 0 {
            let best = match taker.side {
                Side::Buy => self.asks.first_key_value(),
                Side::Sell => self.bids.last_key_value(),
            };
            let Some((&price, _)) = best else {
                break;
            };

            if let Some(limit) = limit {
                let crosses = match taker.side {
                    Side::Buy => price <= limit,
                    Side::Sell => price >= limit,
                };
                if !crosses {
                    break;
                }
            }

            let opposite = match taker.side {
                Side::Buy => &mut self.asks,
                Side::Sell => &mut self.bids,
            };
            let Some(level) = opposite.get_mut(&price) else {
                break;
            };
            let Some(trade) = level.trade_front(taker.qty) else {
                // An empty level should never be keyed; drop it and move on.
                opposite.remove(&price);
                continue;
            };

            taker.qty -= trade.traded;
            fills.push(Fill::new(
                taker.id.clone(),
                trade.maker_order_id.clone(),
                price.to_f64(),
                trade.traded,
            ));
            self.last_trade_price = Some(price.to_f64());
            trace!(
                "matched {} x {} at {} against {}",
                taker.id, trade.traded, price, trade.maker_order_id
            );

            if trade.exhausted {
                let _ = level.pop_front();
                let empty = level.is_empty();
                if empty {
                    opposite.remove(&price);
                }
                self.order_locations.remove(&trade.maker_order_id);
            }
        }

        fills
    }

    /// Rest a limit order at the tail of its level, creating the level if
    /// this is the first order at that price.
    pub(super) fn rest(&mut self, order: Order, price: PriceKey) {
        let side = order.side;
        let book = match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        };
        let id = order.id.clone();
        book.entry(price)
            .or_insert_with(|| super::level::PriceLevel::new(price))
            .push_back(order);
        self.order_locations.insert(id, (side, price));
    }
}
