use serde::{Deserialize, Serialize};

/// One observation of the asset: unix timestamp and close price.
/// The series must be ordered by timestamp with no duplicates, and
/// prices must be positive; both are caller preconditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: i64,
    pub price: f64,
}

/// Edge-triggered trading instruction, aligned 1:1 with the price series.
///
/// `Enter` is acted on only while flat, `Exit` only while holding;
/// redundant signals of either kind are no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Enter,
    Exit,
    Hold,
}

impl Signal {
    /// Decode the wire representation (+1 enter, -1 exit, 0 hold).
    pub fn from_value(value: i8) -> Result<Self, String> {
        match value {
            1 => Ok(Signal::Enter),
            -1 => Ok(Signal::Exit),
            0 => Ok(Signal::Hold),
            other => Err(format!("signal value out of range: {}", other)),
        }
    }

    pub fn as_value(&self) -> i8 {
        match self {
            Signal::Enter => 1,
            Signal::Exit => -1,
            Signal::Hold => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    Entry,
    Exit,
}

/// An executed transition, priced with the flat proportional fee applied:
/// entries pay `price * (1 + fee)`, exits receive `price * (1 - fee)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub timestamp: i64,
    pub kind: TradeKind,
    pub price: f64,
}

/// Mark-to-market snapshot recorded once per time step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityPoint {
    pub timestamp: i64,
    pub equity: f64,
    pub cash: f64,
    pub units: f64,
}
