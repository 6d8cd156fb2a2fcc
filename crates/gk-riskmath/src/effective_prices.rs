//! All-in effective price calculation (§4.3): bakes spread, fees,
//! slippage, and market impact into entry/TP/SL before any R-unit
//! arithmetic happens downstream.

use gk_domain::Direction;

/// Floor below which `unit_risk_allin_net` is rejected regardless of ATR.
pub const ABS_MIN_UNIT_RISK_USD: f64 = 1.0;

/// Default `stop_slippage_mult` when the caller doesn't override it.
pub const DEFAULT_STOP_SLIPPAGE_MULT: f64 = 1.0;

/// Default ATR multiple used as the ATR-based unit-risk floor.
pub const DEFAULT_UNIT_RISK_MIN_ATR_MULT: f64 = 0.0;

/// Below this ATR magnitude, an ATR-based unit-risk check is rejected as
/// numerically meaningless rather than silently skipped.
pub const ATR_EPS: f64 = 1e-9;

/// Epsilon used for float-compare-style sanity checks in this module.
pub const EPS_FLOAT_COMPARE: f64 = 1e-9;

/// All cost components, expressed in basis points, feeding into
/// `calculate_effective_prices`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CostInputsBps {
    pub spread_bps: f64,
    pub fee_entry_bps: f64,
    pub fee_exit_bps: f64,
    pub slippage_entry_bps: f64,
    pub slippage_tp_bps: f64,
    pub slippage_stop_bps: f64,
    pub impact_entry_bps: f64,
    pub impact_exit_bps: f64,
    pub impact_stop_bps: f64,
    pub stop_slippage_mult: f64,
}

impl CostInputsBps {
    pub fn zero() -> Self {
        CostInputsBps {
            spread_bps: 0.0,
            fee_entry_bps: 0.0,
            fee_exit_bps: 0.0,
            slippage_entry_bps: 0.0,
            slippage_tp_bps: 0.0,
            slippage_stop_bps: 0.0,
            impact_entry_bps: 0.0,
            impact_exit_bps: 0.0,
            impact_stop_bps: 0.0,
            stop_slippage_mult: DEFAULT_STOP_SLIPPAGE_MULT,
        }
    }
}

/// Errors from effective-price calculation and unit-risk validation (§7
/// "invariant violation" channel; `Display` carries the §6 stable prefix
/// where one exists).
#[derive(Clone, Debug, PartialEq)]
pub enum EffectivePricesError {
    NonPositivePrice,
    TpWrongSideOfEntry,
    NegativeCosts,
    StopSlippageMultBelowOne,
    SlWrongSideOfEntry,
    AtrTooSmall,
    UnitRiskTooSmall,
}

impl std::fmt::Display for EffectivePricesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EffectivePricesError::NonPositivePrice => write!(f, "Prices must be positive"),
            EffectivePricesError::TpWrongSideOfEntry => {
                write!(f, "tp_price must be on the profit side of entry_price for this direction")
            }
            EffectivePricesError::NegativeCosts => {
                write!(f, "Fees, slippage, and impact must be non-negative")
            }
            EffectivePricesError::StopSlippageMultBelowOne => {
                write!(f, "stop_slippage_mult must be >= 1.0")
            }
            EffectivePricesError::SlWrongSideOfEntry => {
                write!(f, "sl_eff_allin must be on the loss side of entry_eff_allin for this direction")
            }
            EffectivePricesError::AtrTooSmall => write!(f, "ATR is too small to use as a unit-risk floor"),
            EffectivePricesError::UnitRiskTooSmall => {
                write!(f, "unit_risk_too_small_block: unit_risk_allin_net is below absolute minimum")
            }
        }
    }
}

impl std::error::Error for EffectivePricesError {}

pub fn bps_to_fraction(bps: f64) -> f64 {
    bps * 1e-4
}

fn validate_cost_inputs(costs: &CostInputsBps) -> Result<(), EffectivePricesError> {
    let all = [
        costs.spread_bps,
        costs.fee_entry_bps,
        costs.fee_exit_bps,
        costs.slippage_entry_bps,
        costs.slippage_tp_bps,
        costs.slippage_stop_bps,
        costs.impact_entry_bps,
        costs.impact_exit_bps,
        costs.impact_stop_bps,
    ];
    if all.iter().any(|c| *c < 0.0) {
        return Err(EffectivePricesError::NegativeCosts);
    }
    if costs.stop_slippage_mult < 1.0 {
        return Err(EffectivePricesError::StopSlippageMultBelowOne);
    }
    Ok(())
}

/// Compute `(entry_eff, tp_eff, sl_eff)` per §4.3's LONG/SHORT formulas.
pub fn calculate_effective_prices(
    side: Direction,
    entry_price: f64,
    tp_price: f64,
    sl_price: f64,
    costs: &CostInputsBps,
) -> Result<(f64, f64, f64), EffectivePricesError> {
    if entry_price <= 0.0 || tp_price <= 0.0 || sl_price <= 0.0 {
        return Err(EffectivePricesError::NonPositivePrice);
    }
    match side {
        Direction::Long => {
            if tp_price <= entry_price {
                return Err(EffectivePricesError::TpWrongSideOfEntry);
            }
        }
        Direction::Short => {
            if tp_price >= entry_price {
                return Err(EffectivePricesError::TpWrongSideOfEntry);
            }
        }
    }
    validate_cost_inputs(costs)?;

    let half_spread = bps_to_fraction(0.5 * costs.spread_bps);
    let c_entry = half_spread
        + bps_to_fraction(costs.fee_entry_bps)
        + bps_to_fraction(costs.slippage_entry_bps)
        + bps_to_fraction(costs.impact_entry_bps);
    let c_exit = half_spread
        + bps_to_fraction(costs.fee_exit_bps)
        + bps_to_fraction(costs.slippage_tp_bps)
        + bps_to_fraction(costs.impact_exit_bps);
    let c_sl = half_spread
        + costs.stop_slippage_mult * bps_to_fraction(costs.fee_exit_bps)
        + bps_to_fraction(costs.slippage_stop_bps)
        + bps_to_fraction(costs.impact_stop_bps);

    let (entry_eff, tp_eff, sl_eff) = match side {
        Direction::Long => (
            entry_price * (1.0 + c_entry),
            tp_price * (1.0 - c_exit),
            sl_price * (1.0 - c_sl),
        ),
        Direction::Short => (
            entry_price * (1.0 - c_entry),
            tp_price * (1.0 + c_exit),
            sl_price * (1.0 + c_sl),
        ),
    };
    Ok((entry_eff, tp_eff, sl_eff))
}

/// `|entry_eff_allin - sl_eff_allin|`, validated for direction
/// consistency.
pub fn calculate_unit_risk_allin_net(
    side: Direction,
    entry_eff_allin: f64,
    sl_eff_allin: f64,
) -> Result<f64, EffectivePricesError> {
    match side {
        Direction::Long => {
            if sl_eff_allin >= entry_eff_allin {
                return Err(EffectivePricesError::SlWrongSideOfEntry);
            }
        }
        Direction::Short => {
            if sl_eff_allin <= entry_eff_allin {
                return Err(EffectivePricesError::SlWrongSideOfEntry);
            }
        }
    }
    Ok((entry_eff_allin - sl_eff_allin).abs())
}

/// Validate `unit_risk` against the absolute minimum and, if `atr` is
/// supplied, against `atr * unit_risk_min_atr_mult` too.
pub fn validate_unit_risk(
    unit_risk: f64,
    atr: Option<f64>,
    unit_risk_min_atr_mult: f64,
) -> Result<(), EffectivePricesError> {
    if unit_risk < ABS_MIN_UNIT_RISK_USD {
        return Err(EffectivePricesError::UnitRiskTooSmall);
    }
    if let Some(atr) = atr {
        if atr < ATR_EPS {
            return Err(EffectivePricesError::AtrTooSmall);
        }
        let atr_floor = atr * unit_risk_min_atr_mult;
        if unit_risk < atr_floor {
            return Err(EffectivePricesError::UnitRiskTooSmall);
        }
    }
    Ok(())
}

/// Compute effective prices and unit risk, then validate the unit risk in
/// one call — the shape Gate 4/5 actually want.
#[allow(clippy::too_many_arguments)]
pub fn compute_effective_prices_with_validation(
    side: Direction,
    entry_price: f64,
    tp_price: f64,
    sl_price: f64,
    costs: &CostInputsBps,
    atr: Option<f64>,
    unit_risk_min_atr_mult: f64,
) -> Result<(f64, f64, f64, f64), EffectivePricesError> {
    let (entry_eff, tp_eff, sl_eff) =
        calculate_effective_prices(side, entry_price, tp_price, sl_price, costs)?;
    let unit_risk = calculate_unit_risk_allin_net(side, entry_eff, sl_eff)?;
    validate_unit_risk(unit_risk, atr, unit_risk_min_atr_mult)?;
    Ok((entry_eff, tp_eff, sl_eff, unit_risk))
}
