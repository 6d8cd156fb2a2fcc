use serde::{Deserialize, Serialize};

use crate::position::Direction;

/// Which strategy engine produced a `Signal` (§4.10 compatibility matrix).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineType {
    Trend,
    Range,
}

/// A proposed trade from a strategy engine, before sizing or MLE scoring
/// (§3 Signal).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub engine: EngineType,
    pub symbol: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub tp_price: f64,
    pub sl_price: f64,
    pub raw_rr: f64,
    pub atr: f64,
    pub depth_hint_usd: f64,
    pub min_rr: f64,
    pub min_sl_atr_mult: f64,
    pub max_sl_atr_mult: f64,
}

/// Reasons `Signal::validate` can reject a signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignalError {
    /// Direction is inconsistent with entry/TP/SL ordering.
    LevelOrdering,
    /// One of entry/TP/SL/atr is non-finite or non-positive.
    NonPositivePrice,
}

impl std::fmt::Display for SignalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalError::LevelOrdering => {
                write!(f, "signal_invariant: direction inconsistent with level ordering")
            }
            SignalError::NonPositivePrice => {
                write!(f, "signal_invariant: entry/tp/sl/atr must be finite and positive")
            }
        }
    }
}

impl std::error::Error for SignalError {}

impl Signal {
    /// Check the §3 Signal invariant: direction consistent with level
    /// ordering, and all prices finite and strictly positive.
    pub fn validate(&self) -> Result<(), SignalError> {
        let prices = [self.entry_price, self.tp_price, self.sl_price, self.atr];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(SignalError::NonPositivePrice);
        }
        let ordering_ok = match self.direction {
            Direction::Long => self.sl_price < self.entry_price && self.entry_price < self.tp_price,
            Direction::Short => self.tp_price < self.entry_price && self.entry_price < self.sl_price,
        };
        if !ordering_ok {
            return Err(SignalError::LevelOrdering);
        }
        Ok(())
    }
}
