mod artifacts;
mod commands;
mod config;
mod obs;
mod output;

use clap::{Parser, Subcommand};
use commands::Command;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tidemark")]
#[command(about = "tidemark signal backtesting CLI", version, arg_required_else_help = true)]
#[command(
    after_help = "Examples:\n  tidemark backtest --config configs/sample.toml --out runs/\n  tidemark validate --config configs/sample.toml\n  tidemark report --input runs/<run_id>/\n"
)]
struct Cli {
    /// Log filter used when TIDEMARK_LOG is unset (e.g. info, debug).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
    /// Log output format: text or json.
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
    /// Expose prometheus metrics on this address (host:port).
    #[arg(long, global = true)]
    metrics_addr: Option<String>,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    Backtest {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    Validate {
        #[arg(long)]
        config: PathBuf,
    },
    Report {
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() {
    output::print_banner();
    let cli = Cli::parse();

    if let Err(err) = obs::init_tracing(&cli.log_level, &cli.log_format) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
    if let Err(err) = obs::init_metrics(cli.metrics_addr.as_deref()) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }

    let command = match cli.command {
        CliCommand::Backtest { config, out } => Command::Backtest { config, out },
        CliCommand::Validate { config } => Command::Validate { config },
        CliCommand::Report { input } => Command::Report { input },
    };

    if let Err(err) = commands::run(command) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
