//! Determinism of the simulation loop under seeded flow.

use matchbook_rs::prelude::*;

type FillSig = Vec<(String, String, String, u64)>;

fn fill_signature(fills: &[Fill]) -> FillSig {
    fills
        .iter()
        .map(|f| {
            (
                f.maker_order_id.clone(),
                f.taker_order_id.clone(),
                format!("{:.6}", f.price),
                f.qty,
            )
        })
        .collect()
}

fn seeded_run(seed: u64) -> (FillSig, TopOfBook) {
    let mut sim = MarketSimulator::new();
    sim.schedule(
        0,
        EventPayload::Submit(Order::limit("seed_s", Side::Sell, 101.0, 20, 0).unwrap()),
    );
    sim.schedule(
        0,
        EventPayload::Submit(Order::limit("seed_b", Side::Buy, 99.0, 20, 0).unwrap()),
    );

    let cfg = FlowConfig {
        seed,
        intensity_per_100: 30.0,
        p_market: 0.10,
        ..FlowConfig::default()
    };
    let mut flow = PoissonOrderFlow::new(cfg).unwrap();
    for (t, order) in flow.generate(1, 200, 100.0) {
        sim.schedule(t, EventPayload::Submit(order));
    }

    let result = sim.run(200);
    (fill_signature(&result.fills), sim.book().top_of_book())
}

#[test]
fn identical_seeds_give_identical_runs() {
    let (fills_a, top_a) = seeded_run(123);
    let (fills_b, top_b) = seeded_run(123);
    assert!(!fills_a.is_empty());
    assert_eq!(fills_a, fills_b);
    assert_eq!(top_a, top_b);
}

#[test]
fn different_seeds_give_different_runs() {
    let (fills_a, _) = seeded_run(123);
    let (fills_b, _) = seeded_run(321);
    assert_ne!(fills_a, fills_b);
}

#[test]
fn strategies_do_not_break_determinism() {
    let run = || {
        let mut sim = MarketSimulator::with_strategies(vec![
            Box::new(AdaptiveMarketMaker::new("mm", AdaptiveMMConfig::default()))
                as Box<dyn Strategy>,
            Box::new(TwapExecutor::new("twap", Side::Buy, 40, 50, 250, 20)),
        ]);
        sim.schedule(
            0,
            EventPayload::Submit(Order::limit("seed_s", Side::Sell, 101.0, 50, 0).unwrap()),
        );
        sim.schedule(
            0,
            EventPayload::Submit(Order::limit("seed_b", Side::Buy, 99.0, 50, 0).unwrap()),
        );

        let cfg = FlowConfig {
            seed: 7,
            intensity_per_100: 40.0,
            p_market: 0.10,
            ..FlowConfig::default()
        };
        let mut flow = PoissonOrderFlow::new(cfg).unwrap();
        for (t, order) in flow.generate(1, 500, 100.0) {
            sim.schedule(t, EventPayload::Submit(order));
        }
        sim.schedule_snapshots(0, 500, 5);

        let result = sim.run(500);
        (
            fill_signature(&result.fills),
            sim.book().top_of_book(),
            result.pnl_series,
        )
    };

    let (fills_a, top_a, pnl_a) = run();
    let (fills_b, top_b, pnl_b) = run();
    assert_eq!(fills_a, fills_b);
    assert_eq!(top_a, top_b);

    // PnL series agree point for point (NaN-aware comparison)
    for (name, series_a) in &pnl_a {
        let series_b = &pnl_b[name];
        assert_eq!(series_a.len(), series_b.len());
        for (a, b) in series_a.iter().zip(series_b.iter()) {
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }
}
