use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tidemark_core::metrics::PerformanceReport;
use tidemark_core::types::{EquityPoint, Trade, TradeKind};

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<(), String> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create trades csv {}: {}", path.display(), err))?;
    wtr.write_record(["timestamp_utc", "kind", "price"])
        .map_err(|err| format!("failed to write trades csv header: {}", err))?;

    for trade in trades {
        let kind = match trade.kind {
            TradeKind::Entry => "ENTRY",
            TradeKind::Exit => "EXIT",
        };
        wtr.write_record([
            trade.timestamp.to_string(),
            kind.to_string(),
            trade.price.to_string(),
        ])
        .map_err(|err| format!("failed to write trades row: {}", err))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush trades csv: {}", err))
}

pub fn write_equity_csv(path: &Path, points: &[EquityPoint]) -> Result<(), String> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|err| format!("failed to create equity csv {}: {}", path.display(), err))?;
    wtr.write_record(["timestamp_utc", "equity", "cash", "units"])
        .map_err(|err| format!("failed to write equity csv header: {}", err))?;

    for point in points {
        wtr.write_record([
            point.timestamp.to_string(),
            point.equity.to_string(),
            point.cash.to_string(),
            point.units.to_string(),
        ])
        .map_err(|err| format!("failed to write equity row: {}", err))?;
    }

    wtr.flush()
        .map_err(|err| format!("failed to flush equity csv: {}", err))
}

pub fn write_report_json(path: &Path, report: &PerformanceReport) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|err| format!("failed to serialize report: {}", err))?;
    write_string(path, &json)
}

/// Combined results for the whole run, one entry per strategy name.
/// The map key is the merge/dedup policy: re-running a strategy replaces
/// its previous entry.
pub fn write_results_json(
    path: &Path,
    results: &BTreeMap<String, PerformanceReport>,
) -> Result<(), String> {
    let json = serde_json::to_string_pretty(results)
        .map_err(|err| format!("failed to serialize results: {}", err))?;
    write_string(path, &json)
}

fn write_string(path: &Path, contents: &str) -> Result<(), String> {
    let mut file = fs::File::create(path)
        .map_err(|err| format!("failed to create {}: {}", path.display(), err))?;
    file.write_all(contents.as_bytes())
        .map_err(|err| format!("failed to write {}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::{write_results_json, write_trades_csv};
    use std::collections::BTreeMap;
    use std::path::Path;
    use tidemark_core::engine::simulator::PositionSimulator;
    use tidemark_core::metrics::PerformanceReport;
    use tidemark_core::types::{PricePoint, Signal};

    #[test]
    fn trades_csv_has_header_and_rows() {
        let simulator = PositionSimulator::new(100.0, 0.0).expect("simulator");
        let prices = [
            PricePoint {
                timestamp: 0,
                price: 10.0,
            },
            PricePoint {
                timestamp: 1,
                price: 11.0,
            },
        ];
        let output = simulator
            .run(&prices, &[Signal::Enter, Signal::Exit])
            .expect("run");

        let path = Path::new("/tmp/tidemark_trades_artifact.csv");
        write_trades_csv(path, &output.trades).expect("write");
        let contents = std::fs::read_to_string(path).expect("read back");
        assert!(contents.starts_with("timestamp_utc,kind,price"));
        assert!(contents.contains("ENTRY"));
        assert!(contents.contains("EXIT"));
    }

    #[test]
    fn results_json_maps_strategy_names_to_reports() {
        let simulator = PositionSimulator::new(100.0, 0.0).expect("simulator");
        let prices = [
            PricePoint {
                timestamp: 0,
                price: 10.0,
            },
            PricePoint {
                timestamp: 1,
                price: 12.0,
            },
        ];
        let output = simulator
            .run(&prices, &[Signal::Hold, Signal::Hold])
            .expect("run");
        let report = PerformanceReport::from_simulation(&output);

        let mut results = BTreeMap::new();
        results.insert("ema_crossover".to_string(), report);

        let path = Path::new("/tmp/tidemark_results_artifact.json");
        write_results_json(path, &results).expect("write");
        let contents = std::fs::read_to_string(path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&contents).expect("valid json");
        assert!(value["ema_crossover"]["final_value"].is_number());
        assert!(value["ema_crossover"]["sharpe"].is_null());
    }
}
