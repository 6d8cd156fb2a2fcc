//! gk-riskmath
//!
//! Pure risk arithmetic (§4.2-§4.4): the only place `USD <-> %-of-equity
//! <-> R-value` conversions, all-in effective prices, and safe geometric
//! compounding happen. No IO, no config, no wall clock.

mod compounding;
mod effective_prices;
mod risk_units;

pub use compounding::{
    check_variance_drag_critical, clamp_compound_rate_emergency, compound_equity,
    compound_equity_trajectory, compute_variance_drag_metrics, estimate_trades_per_year,
    safe_compound_rate, safe_log_return, CompoundingDomainViolation, VarianceDragMetrics,
    COMPOUNDING_R_FLOOR_EPS, LOG1P_SWITCH_THRESHOLD, TARGET_RETURN_ANNUAL_DEFAULT,
    TRADES_PER_YEAR_DEFAULT, VARIANCE_DRAG_CRITICAL_FRAC,
};
pub use effective_prices::{
    bps_to_fraction, calculate_effective_prices, calculate_unit_risk_allin_net,
    compute_effective_prices_with_validation, validate_unit_risk, CostInputsBps,
    EffectivePricesError, ABS_MIN_UNIT_RISK_USD, ATR_EPS, DEFAULT_STOP_SLIPPAGE_MULT,
    DEFAULT_UNIT_RISK_MIN_ATR_MULT, EPS_FLOAT_COMPARE,
};
pub use risk_units::{
    equity_effective, pnl_to_r_value, r_value_to_pnl, risk_pct_to_usd, risk_usd_to_pct,
    validate_equity, validate_risk_amount, RiskUnitsError, EQUITY_EFFECTIVE_FLOOR,
    EQUITY_MIN_USD, RISK_AMOUNT_MIN_ABSOLUTE_USD,
};
