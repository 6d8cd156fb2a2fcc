use serde::{Deserialize, Serialize};

use crate::drp_types::{DrpState, TradingMode};
use crate::position::Position;

/// Floor below which equity is treated as too small to compute percentages
/// against (§3 PortfolioState invariant, matches `equity_effective`'s floor
/// in §4.2).
pub const EQUITY_MIN_FOR_PCT_CALC: f64 = 1e-6;

/// Durable, cross-bar portfolio state (§3 PortfolioState). The gate
/// pipeline consumes one of these per bar and returns an updated copy; the
/// host is responsible for persisting it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PortfolioState {
    pub equity_usd: f64,
    pub positions: Vec<Position>,
    pub drp_state: DrpState,
    pub trading_mode: TradingMode,
    pub manual_halt_all_trading: bool,
    pub manual_halt_new_entries: bool,
    pub warmup_bars_remaining: u32,
    pub drp_flap_count: u32,
    pub hibernate_until_ts_ms: i64,
}

/// Reasons `PortfolioState::validate` can reject a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortfolioStateError {
    /// `equity_usd <= EQUITY_MIN_FOR_PCT_CALC`.
    EquityBelowFloor,
}

impl std::fmt::Display for PortfolioStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioStateError::EquityBelowFloor => {
                write!(f, "portfolio_state_invariant: equity_usd must be > equity_min_for_pct_calc")
            }
        }
    }
}

impl std::error::Error for PortfolioStateError {}

impl PortfolioState {
    /// Check the §3 PortfolioState invariant: `equity > equity_min_for_pct_calc`.
    pub fn validate(&self) -> Result<(), PortfolioStateError> {
        if !(self.equity_usd > EQUITY_MIN_FOR_PCT_CALC) {
            return Err(PortfolioStateError::EquityBelowFloor);
        }
        Ok(())
    }

    /// Sum of `exposure_r` across open positions matching `pred`.
    pub fn exposure_r_where(&self, pred: impl Fn(&Position) -> bool) -> f64 {
        self.positions.iter().filter(|p| pred(p)).map(|p| p.exposure_r).sum()
    }

    pub fn total_exposure_r(&self) -> f64 {
        self.positions.iter().map(|p| p.exposure_r).sum()
    }

    pub fn open_position_count(&self) -> usize {
        self.positions.len()
    }
}
