//! Property-based tests for order book invariants.
//!
//! Random order sequences are generated and the structural invariants are
//! checked after every batch: the index matches the levels, aggregates
//! match their queues, price sequences stay sorted, and the book never
//! stays crossed.

use matchbook_rs::{LimitOrderBook, Order, Side};
use proptest::prelude::*;
use std::collections::HashSet;

/// Generate a price on a coarse grid around 100.
fn price_strategy() -> impl Strategy<Value = f64> {
    (90i64..=110i64).prop_map(|p| p as f64)
}

/// Generate a valid quantity.
fn qty_strategy() -> impl Strategy<Value = u64> {
    1u64..=50u64
}

/// Generate a side.
fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

/// Generate a batch of limit orders.
fn orders_strategy() -> impl Strategy<Value = Vec<(Side, f64, u64)>> {
    prop::collection::vec((side_strategy(), price_strategy(), qty_strategy()), 1..60)
}

/// Assert every structural invariant of the book in one sweep.
fn assert_book_invariants(book: &LimitOrderBook) {
    let snap = book.snapshot();

    // price sequences: bids strictly descending, asks strictly ascending
    for pair in snap.bids.windows(2) {
        assert!(pair[0].price > pair[1].price, "bids not strictly descending");
    }
    for pair in snap.asks.windows(2) {
        assert!(pair[0].price < pair[1].price, "asks not strictly ascending");
    }

    // no empty levels, aggregates equal their queues, FIFO is by ts
    let mut seen = HashSet::new();
    let mut resting = 0usize;
    for level in snap.bids.iter().chain(snap.asks.iter()) {
        assert!(!level.orders.is_empty(), "empty level left in the book");
        let queue_sum: u64 = level.orders.iter().map(|o| o.qty).sum();
        assert_eq!(level.total_qty, queue_sum, "aggregate does not match queue");
        for pair in level.orders.windows(2) {
            assert!(pair[0].ts < pair[1].ts, "level queue not in ts order");
        }
        for order in &level.orders {
            assert!(order.qty > 0, "zero-qty order resting");
            assert!(seen.insert(order.order_id.clone()), "duplicate resting order");
            assert!(book.contains(&order.order_id), "order missing from index");
            resting += 1;
        }
    }
    assert_eq!(resting, book.order_count(), "index size mismatch");

    // depth reads the same aggregates
    let depth = book.depth(usize::MAX);
    let depth_bids: Vec<(f64, u64)> = snap.bids.iter().map(|l| (l.price, l.total_qty)).collect();
    let depth_asks: Vec<(f64, u64)> = snap.asks.iter().map(|l| (l.price, l.total_qty)).collect();
    assert_eq!(depth.bids, depth_bids);
    assert_eq!(depth.asks, depth_asks);

    // steady state is never crossed
    if let (Some(bid), Some(ask)) = (book.best_bid(), book.best_ask()) {
        assert!(bid < ask, "book left crossed: bid {bid} >= ask {ask}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Fill quantity plus the resting remainder equals the original
    /// quantity for every submission.
    #[test]
    fn fill_conservation(
        resting in orders_strategy(),
        side in side_strategy(),
        price in price_strategy(),
        qty in qty_strategy(),
    ) {
        let mut book = LimitOrderBook::new("PROP");
        let mut ts = 0u64;
        for (side, price, qty) in resting {
            ts += 1;
            book.place_limit(Order::limit(format!("r{ts}"), side, price, qty, ts).unwrap());
        }

        ts += 1;
        let fills = book.place_limit(Order::limit("probe", side, price, qty, ts).unwrap());

        let filled: u64 = fills.iter().map(|f| f.qty).sum();
        let snap = book.snapshot();
        let rested: u64 = snap
            .bids
            .iter()
            .chain(snap.asks.iter())
            .flat_map(|l| l.orders.iter())
            .filter(|o| o.order_id == "probe")
            .map(|o| o.qty)
            .sum();
        prop_assert_eq!(filled + rested, qty);
        assert_book_invariants(&book);
    }

    /// Structural invariants hold after any batch of limit placements.
    #[test]
    fn invariants_after_placements(orders in orders_strategy()) {
        let mut book = LimitOrderBook::new("PROP");
        for (ts, (side, price, qty)) in orders.into_iter().enumerate() {
            let ts = ts as u64 + 1;
            book.place_limit(Order::limit(format!("o{ts}"), side, price, qty, ts).unwrap());
            assert_book_invariants(&book);
        }
    }

    /// Invariants survive interleaved cancels of random ids.
    #[test]
    fn invariants_after_cancels(
        orders in orders_strategy(),
        cancel_every in 2usize..5,
    ) {
        let mut book = LimitOrderBook::new("PROP");
        let mut ids = Vec::new();
        for (ts, (side, price, qty)) in orders.into_iter().enumerate() {
            let ts = ts as u64 + 1;
            let id = format!("o{ts}");
            book.place_limit(Order::limit(id.clone(), side, price, qty, ts).unwrap());
            ids.push(id);
            if ids.len() % cancel_every == 0 {
                let victim = ids[ids.len() / 2].clone();
                let _ = book.cancel(&victim);
                assert_book_invariants(&book);
            }
        }
        assert_book_invariants(&book);
    }

    /// Invariants survive random modifies (reductions, increases and
    /// re-pricings alike).
    #[test]
    fn invariants_after_modifies(
        orders in orders_strategy(),
        new_price in proptest::option::of(price_strategy()),
        new_qty in proptest::option::of(qty_strategy()),
    ) {
        let mut book = LimitOrderBook::new("PROP");
        let mut last_id = String::new();
        let mut ts = 0;
        for (side, price, qty) in orders {
            ts += 1;
            last_id = format!("o{ts}");
            book.place_limit(Order::limit(last_id.clone(), side, price, qty, ts).unwrap());
        }
        let _ = book.modify(&last_id, new_price, new_qty, ts + 1);
        assert_book_invariants(&book);
    }

    /// A market order never leaves anything resting under its id.
    #[test]
    fn market_orders_never_rest(
        resting in orders_strategy(),
        side in side_strategy(),
        qty in 1u64..500,
    ) {
        let mut book = LimitOrderBook::new("PROP");
        for (ts, (side, price, qty)) in resting.into_iter().enumerate() {
            let ts = ts as u64 + 1;
            book.place_limit(Order::limit(format!("r{ts}"), side, price, qty, ts).unwrap());
        }

        let fills = book.place_market(Order::market("mkt", side, qty, 10_000).unwrap());

        prop_assert!(!book.contains("mkt"));
        let filled: u64 = fills.iter().map(|f| f.qty).sum();
        prop_assert!(filled <= qty);
        assert_book_invariants(&book);
    }

    /// Fills execute at maker prices inside the taker's limit.
    #[test]
    fn fills_respect_the_takers_limit(
        resting in orders_strategy(),
        price in price_strategy(),
        qty in qty_strategy(),
    ) {
        let mut book = LimitOrderBook::new("PROP");
        for (ts, (side, level_price, level_qty)) in resting.into_iter().enumerate() {
            let ts = ts as u64 + 1;
            book.place_limit(
                Order::limit(format!("r{ts}"), side, level_price, level_qty, ts).unwrap(),
            );
        }

        let fills = book.place_limit(Order::limit("probe", Side::Buy, price, qty, 10_000).unwrap());
        for fill in &fills {
            prop_assert!(fill.price <= price, "buy filled above its limit");
        }
    }
}
