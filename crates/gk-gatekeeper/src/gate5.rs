//! GATE 5 — Pre-sizing (§4.12). Size-invariant: computes `unit_risk_bps`
//! and `expected_cost_R_preMLE` from all-in effective prices, with no
//! dependence on order quantity.

use gk_domain::Direction;
use gk_riskmath::{bps_to_fraction, compute_effective_prices_with_validation, CostInputsBps};

use crate::gate4::Gate04Result;

/// Result of GATE 5 (§4.12).
#[derive(Clone, Debug)]
pub struct Gate05Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate04: Gate04Result,
    pub entry_eff: f64,
    pub tp_eff: f64,
    pub sl_eff: f64,
    pub unit_risk_allin_net: f64,
    pub unit_risk_bps: f64,
    pub expected_cost_r_pre_mle: f64,
    pub details: String,
}

/// Evaluate GATE 5. `costs`/`atr`/`unit_risk_min_atr_mult` feed
/// `compute_effective_prices_with_validation` (§4.3); `entry_price` /
/// `tp_price` / `sl_price` / `direction` come from the GATE 4 signal.
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    gate04: Gate04Result,
    direction: Direction,
    entry_price: f64,
    tp_price: f64,
    sl_price: f64,
    costs: &CostInputsBps,
    atr: Option<f64>,
    unit_risk_min_atr_mult: f64,
) -> Gate05Result {
    if !gate04.entry_allowed {
        let block_reason = format!("gate04_blocked:{}", gate04.block_reason);
        let details = format!("GATE 4 blocked: {}", gate04.block_reason);
        return Gate05Result {
            entry_allowed: false,
            block_reason,
            entry_eff: 0.0,
            tp_eff: 0.0,
            sl_eff: 0.0,
            unit_risk_allin_net: 0.0,
            unit_risk_bps: 0.0,
            expected_cost_r_pre_mle: 0.0,
            details,
            gate04,
        };
    }

    let computed = compute_effective_prices_with_validation(
        direction,
        entry_price,
        tp_price,
        sl_price,
        costs,
        atr,
        unit_risk_min_atr_mult,
    );

    let (entry_eff, tp_eff, sl_eff, unit_risk_allin_net) = match computed {
        Ok(v) => v,
        Err(err) => {
            return Gate05Result {
                entry_allowed: false,
                block_reason: err.to_string(),
                entry_eff: 0.0,
                tp_eff: 0.0,
                sl_eff: 0.0,
                unit_risk_allin_net: 0.0,
                unit_risk_bps: 0.0,
                expected_cost_r_pre_mle: 0.0,
                details: format!("Effective-price computation failed: {err}"),
                gate04,
            };
        }
    };

    let unit_risk_bps = 1e4 * unit_risk_allin_net / entry_eff;

    let half_spread = bps_to_fraction(0.5 * costs.spread_bps);
    let c_entry_frac = half_spread
        + bps_to_fraction(costs.fee_entry_bps)
        + bps_to_fraction(costs.slippage_entry_bps)
        + bps_to_fraction(costs.impact_entry_bps);
    let c_sl_frac = half_spread
        + costs.stop_slippage_mult * bps_to_fraction(costs.fee_exit_bps)
        + bps_to_fraction(costs.slippage_stop_bps)
        + bps_to_fraction(costs.impact_stop_bps);
    let expected_cost_r_pre_mle = (c_entry_frac + c_sl_frac) * entry_price / unit_risk_allin_net;

    Gate05Result {
        entry_allowed: true,
        block_reason: String::new(),
        details: format!(
            "PASS: unit_risk_bps={unit_risk_bps:.2}, expected_cost_R_preMLE={expected_cost_r_pre_mle:.4}"
        ),
        entry_eff,
        tp_eff,
        sl_eff,
        unit_risk_allin_net,
        unit_risk_bps,
        expected_cost_r_pre_mle,
        gate04,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_domain::{EngineType, RegimeClass};

    fn passing_gate04() -> Gate04Result {
        use crate::gate0::Gate00Result;
        use crate::gate1::Gate01Result;
        use crate::gate2::Gate02Result;
        use crate::gate3::Gate03Result;
        use gk_domain::{DrpState, TradingMode};

        Gate04Result {
            entry_allowed: true,
            block_reason: String::new(),
            gate03: Gate03Result {
                entry_allowed: true,
                block_reason: String::new(),
                gate02: Gate02Result {
                    entry_allowed: true,
                    block_reason: String::new(),
                    gate01: Gate01Result {
                        entry_allowed: true,
                        block_reason: String::new(),
                        gate00: Gate00Result {
                            entry_allowed: true,
                            block_reason: String::new(),
                            dqs_result: None,
                            drp_transition: None,
                            new_drp_state: DrpState::Normal,
                            new_warmup_bars_remaining: 0,
                            new_drp_flap_count: 0,
                            new_hibernate_until_ts_ms: None,
                            details: String::new(),
                        },
                        drp_state: DrpState::Normal,
                        trading_mode: TradingMode::Live,
                        manual_halt_new_entries: false,
                        manual_halt_all_trading: false,
                        is_shadow_mode: false,
                        details: String::new(),
                    },
                    final_class: RegimeClass::TrendUp,
                    final_confidence: 0.9,
                    probe_conditions_met: false,
                    consecutive_conflict_bars: 0,
                    details: String::new(),
                },
                engine: EngineType::Trend,
                regime_class: RegimeClass::TrendUp,
                details: String::new(),
            },
            sl_distance: 2.0,
            sl_distance_atr_mult: 1.0,
            details: String::new(),
        }
    }

    #[test]
    fn computes_unit_risk_bps_and_cost_preMLE() {
        let costs = CostInputsBps {
            spread_bps: 10.0,
            fee_entry_bps: 10.0,
            fee_exit_bps: 10.0,
            slippage_entry_bps: 5.0,
            slippage_tp_bps: 5.0,
            slippage_stop_bps: 10.0,
            impact_entry_bps: 2.0,
            impact_exit_bps: 2.0,
            impact_stop_bps: 3.0,
            stop_slippage_mult: 1.0,
        };
        let result = evaluate(
            passing_gate04(),
            Direction::Long,
            50000.0,
            51000.0,
            49500.0,
            &costs,
            Some(500.0),
            0.0,
        );
        assert!(result.entry_allowed);
        assert!(result.unit_risk_bps > 0.0);
        assert!(result.expected_cost_r_pre_mle > 0.0);
    }

    #[test]
    fn unit_risk_below_minimum_blocks() {
        let costs = CostInputsBps::zero();
        let result = evaluate(
            passing_gate04(),
            Direction::Long,
            100.0,
            106.0,
            99.9999,
            &costs,
            None,
            0.0,
        );
        assert!(!result.entry_allowed);
    }

    #[test]
    fn gate4_block_propagates() {
        let mut gate04 = passing_gate04();
        gate04.entry_allowed = false;
        gate04.block_reason = "signal_invalid".to_string();
        let result = evaluate(
            gate04,
            Direction::Long,
            50000.0,
            51000.0,
            49500.0,
            &CostInputsBps::zero(),
            None,
            0.0,
        );
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "gate04_blocked:signal_invalid");
    }
}
