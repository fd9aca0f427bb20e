use crate::config::Config;
use std::path::PathBuf;

pub(super) fn print_config_summary(command: &str, config: &Config, out: Option<&PathBuf>) {
    println!(
        "{} cli: {} (run_id={}, symbol={}, initial_capital={})",
        tidemark_core::engine_name(),
        command,
        config.run.run_id,
        config.run.symbol,
        config.run.initial_capital
    );
    println!(
        "data: prices={}, out_dir={}",
        config.paths.prices_csv, config.paths.out_dir
    );
    println!("costs: fee={}", config.costs.fee);
    for strategy in &config.strategies {
        println!(
            "strategy: name={}, fast_span={}, slow_span={}",
            strategy.name, strategy.fast_span, strategy.slow_span
        );
    }
    if let Some(out_dir) = out {
        println!("output dir: {}", out_dir.display());
    }
}
