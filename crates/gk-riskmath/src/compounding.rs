//! Safe geometric compounding and variance-drag diagnostics (§4.4).
//!
//! `Equity(t_K) = Equity(t_0) * Π(1 + r_k)`, computed in log-space so a
//! long sequence of per-trade returns doesn't lose precision to repeated
//! multiplication, and so a single catastrophic return (`r <= -1`) is
//! rejected rather than silently producing a negative or NaN equity.

use gk_numerics::sanitize_float;

/// `safe_log_return` rejects `r` once it's within this distance of `-1`.
pub const COMPOUNDING_R_FLOOR_EPS: f64 = 1e-9;

/// Below this magnitude, `ln(1+r)` is computed via `ln_1p` directly
/// (numerically preferred near zero); above it, `(1.0 + r).ln()`.
pub const LOG1P_SWITCH_THRESHOLD: f64 = 1e-4;

/// `variance_drag_per_trade / |mean(r)|` at or above this ratio is
/// flagged critical.
pub const VARIANCE_DRAG_CRITICAL_FRAC: f64 = 0.3;

/// Default trade cadence used by `estimate_trades_per_year` when the
/// caller doesn't supply an observed cadence.
pub const TRADES_PER_YEAR_DEFAULT: f64 = 250.0;

/// Reference annual return used only for diagnostic framing in
/// `compute_variance_drag_metrics` (not a pipeline threshold).
pub const TARGET_RETURN_ANNUAL_DEFAULT: f64 = 0.20;

/// Raised when a per-trade return falls at or below the domain floor for
/// `ln(1+r)` (§7 "invariant violation" channel).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CompoundingDomainViolation {
    pub r: f64,
}

impl std::fmt::Display for CompoundingDomainViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "compounding_domain_violation: return {} is at or below the -1 + eps domain floor",
            self.r
        )
    }
}

impl std::error::Error for CompoundingDomainViolation {}

/// `ln(1 + r)`, numerically stable near `r = 0`, rejecting `r` at or
/// below `-1 + COMPOUNDING_R_FLOOR_EPS`.
pub fn safe_log_return(r: f64) -> Result<f64, CompoundingDomainViolation> {
    if r <= -1.0 + COMPOUNDING_R_FLOOR_EPS {
        return Err(CompoundingDomainViolation { r });
    }
    let log_r = if r.abs() < LOG1P_SWITCH_THRESHOLD {
        r.ln_1p()
    } else {
        (1.0 + r).ln()
    };
    Ok(sanitize_float(log_r, 0.0))
}

/// Clamp a would-be-rejected return to the domain floor instead of
/// failing, for callers that need a degraded-but-finite result (e.g. a
/// DEFENSIVE-mode equity projection) rather than a hard error.
pub fn clamp_compound_rate_emergency(r: f64) -> f64 {
    r.max(-1.0 + COMPOUNDING_R_FLOOR_EPS)
}

/// `safe_log_return`, falling back to the clamped floor return instead of
/// erroring.
pub fn safe_compound_rate(r: f64) -> f64 {
    safe_log_return(r).unwrap_or_else(|_| {
        safe_log_return(clamp_compound_rate_emergency(r)).unwrap_or(0.0)
    })
}

/// `E0 * exp(sum(ln(1+r_k)))`.
pub fn compound_equity(equity0: f64, returns: &[f64]) -> Result<f64, CompoundingDomainViolation> {
    let mut log_sum = 0.0;
    for &r in returns {
        log_sum += safe_log_return(r)?;
    }
    Ok(equity0 * log_sum.exp())
}

/// Equity after each return in `returns`, in order (one entry per
/// return, not including `equity0` itself).
pub fn compound_equity_trajectory(
    equity0: f64,
    returns: &[f64],
) -> Result<Vec<f64>, CompoundingDomainViolation> {
    let mut equity = equity0;
    let mut trajectory = Vec::with_capacity(returns.len());
    for &r in returns {
        let log_r = safe_log_return(r)?;
        equity *= log_r.exp();
        trajectory.push(equity);
    }
    Ok(trajectory)
}

/// Arithmetic-vs-geometric return diagnostics for a sequence of per-trade
/// returns (§4.4).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VarianceDragMetrics {
    pub mean_arith_return: f64,
    pub mean_log_return: f64,
    pub geometric_mean_return: f64,
    pub variance_drag_per_trade: f64,
    pub variance_drag_annual: f64,
    pub geo_return_annual: f64,
    pub arith_return_annual_approx: f64,
    pub is_critical: bool,
}

/// `variance_drag = mean(r) - (exp(mean(ln(1+r))) - 1)`, flagged critical
/// once `variance_drag / |mean(r)| >= VARIANCE_DRAG_CRITICAL_FRAC`.
pub fn compute_variance_drag_metrics(
    returns: &[f64],
    trades_per_year: f64,
) -> Result<VarianceDragMetrics, CompoundingDomainViolation> {
    let n = returns.len().max(1) as f64;
    let mean_arith_return = returns.iter().sum::<f64>() / n;

    let mut log_sum = 0.0;
    for &r in returns {
        log_sum += safe_log_return(r)?;
    }
    let mean_log_return = log_sum / n;
    let geometric_mean_return = mean_log_return.exp() - 1.0;

    let variance_drag_per_trade = mean_arith_return - geometric_mean_return;
    let variance_drag_annual = variance_drag_per_trade * trades_per_year;
    let geo_return_annual = (mean_log_return * trades_per_year).exp() - 1.0;
    let arith_return_annual_approx = mean_arith_return * trades_per_year;

    let is_critical = mean_arith_return.abs() > COMPOUNDING_R_FLOOR_EPS
        && (variance_drag_per_trade / mean_arith_return.abs()) >= VARIANCE_DRAG_CRITICAL_FRAC;

    Ok(VarianceDragMetrics {
        mean_arith_return,
        mean_log_return,
        geometric_mean_return,
        variance_drag_per_trade,
        variance_drag_annual,
        geo_return_annual,
        arith_return_annual_approx,
        is_critical,
    })
}

pub fn check_variance_drag_critical(metrics: &VarianceDragMetrics) -> bool {
    metrics.is_critical
}

/// `bars_per_year / bars_per_trade`, protected against a zero or negative
/// `bars_per_trade`.
pub fn estimate_trades_per_year(bars_per_trade: f64, bars_per_year: f64) -> f64 {
    if bars_per_trade <= 0.0 {
        return TRADES_PER_YEAR_DEFAULT;
    }
    bars_per_year / bars_per_trade
}
