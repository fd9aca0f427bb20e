mod backtest;
mod common;
mod report;
mod validate;

use std::path::PathBuf;

pub enum Command {
    Backtest {
        config: PathBuf,
        out: Option<PathBuf>,
    },
    Validate {
        config: PathBuf,
    },
    Report {
        input: PathBuf,
    },
}

pub fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Backtest { config, out } => backtest::run(config, out),
        Command::Validate { config } => validate::run(config),
        Command::Report { input } => report::run(input),
    }
}
