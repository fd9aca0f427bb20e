use proptest::prelude::*;
use tidemark_core::engine::simulator::PositionSimulator;
use tidemark_core::metrics::PerformanceReport;
use tidemark_core::types::{PricePoint, Signal, TradeKind};

fn series(steps: &[(f64, i8)]) -> (Vec<PricePoint>, Vec<Signal>) {
    let prices = steps
        .iter()
        .enumerate()
        .map(|(idx, (price, _))| PricePoint {
            timestamp: idx as i64,
            price: *price,
        })
        .collect();
    let signals = steps
        .iter()
        .map(|(_, signal)| Signal::from_value(*signal).expect("signal in range"))
        .collect();
    (prices, signals)
}

fn step_strategy() -> impl Strategy<Value = Vec<(f64, i8)>> {
    prop::collection::vec((0.01f64..10_000.0, -1i8..=1), 1..200)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn flat_or_fully_invested_after_every_step(steps in step_strategy()) {
        let (prices, signals) = series(&steps);
        let output = PositionSimulator::new(10_000.0, 0.001)
            .expect("simulator")
            .run(&prices, &signals)
            .expect("run");

        prop_assert_eq!(output.equity.len(), prices.len());
        for point in &output.equity {
            prop_assert!(point.cash >= 0.0);
            prop_assert!(point.units >= 0.0);
            prop_assert!(point.units == 0.0 || point.cash == 0.0);
        }
    }

    #[test]
    fn ledger_alternates_starting_with_entry(steps in step_strategy()) {
        let (prices, signals) = series(&steps);
        let output = PositionSimulator::new(10_000.0, 0.0)
            .expect("simulator")
            .run(&prices, &signals)
            .expect("run");

        for (idx, trade) in output.trades.iter().enumerate() {
            let expected = if idx % 2 == 0 { TradeKind::Entry } else { TradeKind::Exit };
            prop_assert_eq!(trade.kind, expected);
        }
        // Either fully paired or exactly one trailing unmatched entry.
        let unmatched = output.trades.len() % 2;
        prop_assert!(unmatched <= 1);
        if unmatched == 1 {
            prop_assert!(output.equity.last().expect("point").units > 0.0);
        }
    }

    #[test]
    fn drawdown_is_non_positive_and_return_identity_holds(steps in step_strategy()) {
        let (prices, signals) = series(&steps);
        let output = PositionSimulator::new(10_000.0, 0.002)
            .expect("simulator")
            .run(&prices, &signals)
            .expect("run");
        let report = PerformanceReport::from_simulation(&output);

        prop_assert!(report.max_drawdown <= 0.0);
        prop_assert_eq!(report.total_return, report.final_value / 10_000.0 - 1.0);
        prop_assert_eq!(report.equity_curve.len(), prices.len());
        if let Some(win_rate) = report.win_rate {
            prop_assert!((0.0..=1.0).contains(&win_rate));
        }
    }

    #[test]
    fn simulation_is_deterministic(steps in step_strategy()) {
        let (prices, signals) = series(&steps);
        let simulator = PositionSimulator::new(10_000.0, 0.001).expect("simulator");

        let first = simulator.run(&prices, &signals).expect("run");
        let second = simulator.run(&prices, &signals).expect("run");
        prop_assert_eq!(&first, &second);

        let first_report = PerformanceReport::from_simulation(&first);
        let second_report = PerformanceReport::from_simulation(&second);
        prop_assert_eq!(first_report, second_report);
    }

    #[test]
    fn hold_only_series_is_flat_at_initial_capital(prices in prop::collection::vec(0.01f64..10_000.0, 1..100)) {
        let points: Vec<PricePoint> = prices
            .iter()
            .copied()
            .enumerate()
            .map(|(idx, price)| PricePoint { timestamp: idx as i64, price })
            .collect();
        let signals = vec![Signal::Hold; points.len()];

        let output = PositionSimulator::new(25_000.0, 0.01)
            .expect("simulator")
            .run(&points, &signals)
            .expect("run");

        prop_assert!(output.trades.is_empty());
        prop_assert!(output.equity.iter().all(|point| point.equity == 25_000.0));
    }
}
