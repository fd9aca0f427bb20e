use crate::config::load_config;
use std::path::PathBuf;
use tidemark_core::data::prices;
use tidemark_core::engine::simulator::PositionSimulator;
use tidemark_core::signal::EmaCrossover;

pub(super) fn run(config_path: PathBuf) -> Result<(), String> {
    let config = load_config(&config_path)?;
    super::common::print_config_summary("validate", &config, None);

    PositionSimulator::new(config.run.initial_capital, config.costs.fee)?;
    for strategy in &config.strategies {
        EmaCrossover::new(strategy.fast_span, strategy.slow_span)
            .map_err(|err| format!("strategy {}: {}", strategy.name, err))?;
    }

    let (points, report) = prices::load_csv(PathBuf::from(&config.paths.prices_csv).as_path())?;
    println!(
        "price report: rows={}, duplicates={}, out_of_order={}, invalid_close={}",
        points.len(),
        report.duplicates,
        report.out_of_order,
        report.invalid_close
    );
    if points.is_empty() {
        return Err(format!("no usable prices in {}", config.paths.prices_csv));
    }

    Ok(())
}
