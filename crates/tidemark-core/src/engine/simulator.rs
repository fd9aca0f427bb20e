use crate::types::{EquityPoint, PricePoint, Signal, Trade, TradeKind};

pub const DEFAULT_INITIAL_CAPITAL: f64 = 100_000.0;

/// Single-asset, long-only position simulator.
///
/// Walks an aligned (price, signal) series once, toggling between a flat
/// state (`units == 0`) and a fully invested state (`cash == 0`). Every
/// entry spends all cash and every exit liquidates all units; there is no
/// partial sizing, so exactly one of the two state variables is zero after
/// each step.
#[derive(Debug, Clone, Copy)]
pub struct PositionSimulator {
    initial_capital: f64,
    fee: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationOutput {
    pub equity: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    pub initial_capital: f64,
}

impl Default for PositionSimulator {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            fee: 0.0,
        }
    }
}

impl PositionSimulator {
    pub fn new(initial_capital: f64, fee: f64) -> Result<Self, String> {
        if !initial_capital.is_finite() || initial_capital <= 0.0 {
            return Err(format!(
                "initial_capital must be positive and finite, got {}",
                initial_capital
            ));
        }
        if !fee.is_finite() || !(0.0..1.0).contains(&fee) {
            return Err(format!("fee must be in [0, 1), got {}", fee));
        }
        Ok(Self {
            initial_capital,
            fee,
        })
    }

    pub fn initial_capital(&self) -> f64 {
        self.initial_capital
    }

    pub fn fee(&self) -> f64 {
        self.fee
    }

    /// Run the simulation over an aligned price/signal series.
    ///
    /// Fails fast on misaligned lengths or an empty series; degenerate
    /// outcomes (no trades, a trailing unmatched entry) are not errors.
    pub fn run(
        &self,
        prices: &[PricePoint],
        signals: &[Signal],
    ) -> Result<SimulationOutput, String> {
        if prices.len() != signals.len() {
            return Err(format!(
                "price/signal length mismatch: {} prices, {} signals",
                prices.len(),
                signals.len()
            ));
        }
        if prices.is_empty() {
            return Err("empty price series".to_string());
        }

        let mut cash = self.initial_capital;
        let mut units = 0.0_f64;
        let mut equity = Vec::with_capacity(prices.len());
        let mut trades = Vec::new();

        for (point, signal) in prices.iter().zip(signals) {
            match signal {
                Signal::Enter if units == 0.0 => {
                    // The fee marks up the recorded entry price only; the
                    // quantity bought uses the raw price. Kept as-is for
                    // compatibility with existing reports.
                    units = cash / point.price;
                    cash = 0.0;
                    trades.push(Trade {
                        timestamp: point.timestamp,
                        kind: TradeKind::Entry,
                        price: point.price * (1.0 + self.fee),
                    });
                }
                Signal::Exit if units > 0.0 => {
                    let exit_price = point.price * (1.0 - self.fee);
                    cash = units * exit_price;
                    units = 0.0;
                    trades.push(Trade {
                        timestamp: point.timestamp,
                        kind: TradeKind::Exit,
                        price: exit_price,
                    });
                }
                _ => {}
            }

            equity.push(EquityPoint {
                timestamp: point.timestamp,
                equity: cash + units * point.price,
                cash,
                units,
            });
        }

        Ok(SimulationOutput {
            equity,
            trades,
            initial_capital: self.initial_capital,
        })
    }
}
