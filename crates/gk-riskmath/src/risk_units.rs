//! Centralized risk-unit conversions (§4.2): USD ↔ %-of-equity ↔ R-value.
//! This is the only sanctioned way to cross between these three units;
//! nothing downstream should convert by hand.

use gk_numerics::{denom_safe_unsigned, safe_divide};

/// Equity below which percentage-of-equity math is treated as degenerate.
pub const EQUITY_EFFECTIVE_FLOOR: f64 = 1e-6;

/// Equity below this is rejected by `validate_equity`.
pub const EQUITY_MIN_USD: f64 = 1.0;

/// A converted risk amount below this is rejected
/// (`risk_amount_below_minimum_block`).
pub const RISK_AMOUNT_MIN_ABSOLUTE_USD: f64 = 0.10;

/// Errors raised by the risk-unit conversion functions (§7 "invariant
/// violation" channel).
#[derive(Clone, Debug, PartialEq)]
pub enum RiskUnitsError {
    /// Equity is negative.
    EquityNegative,
    /// Equity is positive but below `EQUITY_MIN_USD`.
    EquityBelowMinimum,
    /// A risk amount is negative.
    RiskAmountNegative,
    /// A risk amount is positive but below `RISK_AMOUNT_MIN_ABSOLUTE_USD`.
    RiskAmountBelowMinimum,
}

impl std::fmt::Display for RiskUnitsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskUnitsError::EquityNegative => write!(f, "equity cannot be negative"),
            RiskUnitsError::EquityBelowMinimum => {
                write!(f, "equity is below minimum ({EQUITY_MIN_USD} USD)")
            }
            RiskUnitsError::RiskAmountNegative => write!(f, "risk_amount cannot be negative"),
            RiskUnitsError::RiskAmountBelowMinimum => write!(
                f,
                "risk_amount_below_minimum_block: risk amount is below minimum ({RISK_AMOUNT_MIN_ABSOLUTE_USD} USD)"
            ),
        }
    }
}

impl std::error::Error for RiskUnitsError {}

/// `max(equity, EQUITY_EFFECTIVE_FLOOR)` — protects every downstream
/// division by equity from a zero or negative value.
pub fn equity_effective(equity_before_usd: f64) -> f64 {
    equity_before_usd.max(EQUITY_EFFECTIVE_FLOOR)
}

/// Reject negative or too-small equity.
pub fn validate_equity(equity_usd: f64) -> Result<(), RiskUnitsError> {
    if equity_usd < 0.0 {
        return Err(RiskUnitsError::EquityNegative);
    }
    if equity_usd < EQUITY_MIN_USD {
        return Err(RiskUnitsError::EquityBelowMinimum);
    }
    Ok(())
}

/// Reject negative or too-small risk amounts.
pub fn validate_risk_amount(risk_amount_usd: f64) -> Result<(), RiskUnitsError> {
    if risk_amount_usd < 0.0 {
        return Err(RiskUnitsError::RiskAmountNegative);
    }
    if risk_amount_usd < RISK_AMOUNT_MIN_ABSOLUTE_USD {
        return Err(RiskUnitsError::RiskAmountBelowMinimum);
    }
    Ok(())
}

/// `risk_pct * equity_effective(equity)`, validated against the absolute
/// minimum.
pub fn risk_pct_to_usd(risk_pct: f64, equity_before_usd: f64) -> Result<f64, RiskUnitsError> {
    let usd = risk_pct * equity_effective(equity_before_usd);
    validate_risk_amount(usd)?;
    Ok(usd)
}

/// Exact inverse of `risk_pct_to_usd` on the validated domain.
pub fn risk_usd_to_pct(risk_amount_usd: f64, equity_before_usd: f64) -> Result<f64, RiskUnitsError> {
    validate_risk_amount(risk_amount_usd)?;
    Ok(risk_amount_usd / equity_effective(equity_before_usd))
}

/// `pnl / max(risk_amount, eps)`; a full stop-out yields exactly `-1.0`.
pub fn pnl_to_r_value(pnl_usd: f64, risk_amount_usd: f64) -> f64 {
    safe_divide(pnl_usd, denom_safe_unsigned(risk_amount_usd), 0.0)
}

/// Exact inverse of `pnl_to_r_value`.
pub fn r_value_to_pnl(r_value: f64, risk_amount_usd: f64) -> f64 {
    r_value * risk_amount_usd
}
