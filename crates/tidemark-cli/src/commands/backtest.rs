use crate::artifacts;
use crate::config::{load_config, StrategyConfig};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tidemark_core::data::prices;
use tidemark_core::engine::simulator::PositionSimulator;
use tidemark_core::metrics::PerformanceReport;
use tidemark_core::signal::EmaCrossover;
use tidemark_core::types::PricePoint;
use tracing::{info_span, warn};

pub(super) fn run(config_path: PathBuf, out: Option<PathBuf>) -> Result<(), String> {
    let config = load_config(&config_path)?;
    super::common::print_config_summary("backtest", &config, out.as_ref());

    let load_start = Instant::now();
    let (points, data_report) =
        prices::load_csv(PathBuf::from(&config.paths.prices_csv).as_path())?;
    metrics::histogram!("tidemark.backtest.load_prices_ms")
        .record(load_start.elapsed().as_millis() as f64);

    if data_report.duplicates > 0 || data_report.out_of_order > 0 || data_report.invalid_close > 0
    {
        println!(
            "price report: duplicates={}, out_of_order={}, invalid_close={}",
            data_report.duplicates, data_report.out_of_order, data_report.invalid_close
        );
    }
    if points.is_empty() {
        return Err(format!("no usable prices in {}", config.paths.prices_csv));
    }

    let simulator = PositionSimulator::new(config.run.initial_capital, config.costs.fee)?;

    let base_dir = out.unwrap_or_else(|| PathBuf::from(&config.paths.out_dir));
    let run_dir = base_dir.join(&config.run.run_id);
    std::fs::create_dir_all(&run_dir)
        .map_err(|err| format!("failed to create run dir {}: {}", run_dir.display(), err))?;

    // Strategies are independent runs: one failure is reported and must
    // not prevent the others from completing.
    let mut results: BTreeMap<String, PerformanceReport> = BTreeMap::new();
    let mut failures: Vec<(String, String)> = Vec::new();

    for strategy in &config.strategies {
        match run_strategy(&simulator, strategy, &points, &run_dir) {
            Ok(report) => {
                results.insert(strategy.name.clone(), report);
            }
            Err(err) => {
                warn!(strategy = %strategy.name, error = %err, "strategy run failed");
                failures.push((strategy.name.clone(), err));
            }
        }
    }

    artifacts::write_results_json(run_dir.join("results.json").as_path(), &results)?;

    println!("run output: {}", run_dir.display());
    for (name, err) in &failures {
        println!("failed strategy {}: {}", name, err);
    }
    if results.is_empty() {
        return Err("all strategies failed".to_string());
    }
    Ok(())
}

fn run_strategy(
    simulator: &PositionSimulator,
    strategy: &StrategyConfig,
    points: &[PricePoint],
    run_dir: &Path,
) -> Result<PerformanceReport, String> {
    let _span = info_span!("run_strategy", strategy = %strategy.name).entered();

    let generator = EmaCrossover::new(strategy.fast_span, strategy.slow_span)?;
    let signals = generator.signals(points);

    let engine_start = Instant::now();
    let output = simulator.run(points, &signals)?;
    metrics::histogram!("tidemark.backtest.engine_ms")
        .record(engine_start.elapsed().as_millis() as f64);
    metrics::gauge!("tidemark.backtest.steps_processed").set(output.equity.len() as f64);
    metrics::gauge!("tidemark.backtest.trades").set(output.trades.len() as f64);

    let report = PerformanceReport::from_simulation(&output);

    let strategy_dir = run_dir.join(&strategy.name);
    std::fs::create_dir_all(&strategy_dir).map_err(|err| {
        format!(
            "failed to create strategy dir {}: {}",
            strategy_dir.display(),
            err
        )
    })?;
    artifacts::write_trades_csv(strategy_dir.join("trades.csv").as_path(), &output.trades)?;
    artifacts::write_equity_csv(strategy_dir.join("equity.csv").as_path(), &output.equity)?;
    artifacts::write_report_json(strategy_dir.join("report.json").as_path(), &report)?;

    Ok(report)
}
