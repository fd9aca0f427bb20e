use crate::engine::simulator::SimulationOutput;
use crate::types::{Trade, TradeKind};
use serde::Serialize;

/// Fixed annualization constant: period returns are assumed daily.
const ANNUALIZATION_PERIODS: f64 = 252.0;

/// Aggregated statistics for one simulation run.
///
/// Undefined metrics (sharpe on a zero-variance curve, win rate with no
/// completed trades, profit factor with no losses) are `None` rather than
/// an error or a silent infinity, so callers can tell "not available" from
/// a real zero. Serialized as JSON null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub equity_curve: Vec<f64>,
    pub final_value: f64,
    pub total_return: f64,
    pub max_drawdown: f64,
    pub sharpe: Option<f64>,
    pub trade_count: usize,
    pub win_rate: Option<f64>,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub profit_factor: Option<f64>,
}

impl PerformanceReport {
    pub fn from_simulation(output: &SimulationOutput) -> Self {
        let equity_curve: Vec<f64> = output.equity.iter().map(|point| point.equity).collect();
        let final_value = equity_curve.last().copied().unwrap_or(output.initial_capital);
        let total_return = final_value / output.initial_capital - 1.0;

        let returns = period_returns(&equity_curve);
        let pnl = paired_pnl(&output.trades);

        let wins: Vec<f64> = pnl.iter().copied().filter(|p| *p > 0.0).collect();
        let losses: Vec<f64> = pnl.iter().copied().filter(|p| *p < 0.0).collect();

        let trade_count = pnl.len();
        let win_rate = if trade_count == 0 {
            None
        } else {
            Some(wins.len() as f64 / trade_count as f64)
        };
        let avg_win = mean(&wins).unwrap_or(0.0);
        let avg_loss = mean(&losses).unwrap_or(0.0);
        let profit_factor = if losses.is_empty() {
            None
        } else {
            Some(-wins.iter().sum::<f64>() / losses.iter().sum::<f64>())
        };

        Self {
            max_drawdown: max_drawdown(&equity_curve),
            sharpe: sharpe(&returns),
            equity_curve,
            final_value,
            total_return,
            trade_count,
            win_rate,
            avg_win,
            avg_loss,
            profit_factor,
        }
    }
}

/// Simple percentage change between consecutive equity values; the first
/// point has no prior value and is dropped.
pub fn period_returns(curve: &[f64]) -> Vec<f64> {
    curve
        .windows(2)
        .map(|pair| pair[1] / pair[0] - 1.0)
        .collect()
}

/// Minimum over time of `(equity - running_peak) / running_peak`.
/// Non-positive; 0.0 when the curve never declines from a peak.
pub fn max_drawdown(curve: &[f64]) -> f64 {
    let mut peak: Option<f64> = None;
    let mut worst = 0.0_f64;

    for &value in curve {
        let current_peak = match peak {
            Some(p) => p.max(value),
            None => value,
        };
        peak = Some(current_peak);

        if current_peak > 0.0 {
            let drawdown = (value - current_peak) / current_peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }

    worst
}

fn sharpe(returns: &[f64]) -> Option<f64> {
    if returns.len() < 2 {
        return None;
    }

    let mean = returns.iter().sum::<f64>() / returns.len() as f64;
    let var = returns
        .iter()
        .map(|ret| {
            let diff = ret - mean;
            diff * diff
        })
        .sum::<f64>()
        / (returns.len() as f64 - 1.0);
    let std = var.sqrt();

    if std == 0.0 || !std.is_finite() {
        return None;
    }
    Some(mean / std * ANNUALIZATION_PERIODS.sqrt())
}

/// PnL per completed (entry, exit) pair, in ledger order. A trailing
/// unmatched entry is excluded: it contributes to mark-to-market equity
/// but not to trade statistics.
fn paired_pnl(trades: &[Trade]) -> Vec<f64> {
    trades
        .chunks_exact(2)
        .map(|pair| {
            debug_assert_eq!(pair[0].kind, TradeKind::Entry);
            debug_assert_eq!(pair[1].kind, TradeKind::Exit);
            pair[1].price - pair[0].price
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
