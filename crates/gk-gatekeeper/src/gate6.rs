//! GATE 6 — MLE Decision (§4.13). Computes `EV_R_price`, `net_edge`, and a
//! risk multiplier; this is also where the SHADOW-mode short-circuit
//! happens (§4.8, §12).

use gk_config::Gate6Config;
use gk_domain::MLEOutput;

use crate::gate5::Gate05Result;

/// §4.13 decision category.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MleDecisionCategory {
    Reject,
    Weak,
    Normal,
    Strong,
}

/// Result of GATE 6 (§4.13).
#[derive(Clone, Debug)]
pub struct Gate06Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate05: Gate05Result,
    pub ev_r_price: f64,
    pub expected_cost_r_post_mle: f64,
    pub net_edge: f64,
    pub category: MleDecisionCategory,
    pub risk_mult: f64,
    pub details: String,
}

/// Evaluate GATE 6 (§4.13 category table; SHADOW short-circuit applies
/// after the category/risk_mult are computed for diagnostics).
pub fn evaluate(cfg: &Gate6Config, gate05: Gate05Result, mle: &MLEOutput) -> Gate06Result {
    if !gate05.entry_allowed {
        let block_reason = format!("gate05_blocked:{}", gate05.block_reason);
        let details = format!("GATE 5 blocked: {}", gate05.block_reason);
        return Gate06Result {
            entry_allowed: false,
            block_reason,
            ev_r_price: 0.0,
            expected_cost_r_post_mle: 0.0,
            net_edge: 0.0,
            category: MleDecisionCategory::Reject,
            risk_mult: 0.0,
            details,
            gate05,
        };
    }

    let ev_r_price = mle.p_success * mle.mu_success_r - (1.0 - mle.p_success) * mle.mu_fail_r;
    let expected_cost_r_post_mle = mle.expected_cost_bps_post / gate05.unit_risk_bps;
    let net_edge = ev_r_price - expected_cost_r_post_mle;

    let (category, risk_mult) = if net_edge < cfg.theta_reject || mle.confidence < cfg.confidence_min {
        (MleDecisionCategory::Reject, 0.0)
    } else if net_edge < cfg.theta_normal {
        (MleDecisionCategory::Weak, cfg.risk_mult_weak)
    } else if net_edge < cfg.theta_strong {
        (MleDecisionCategory::Normal, cfg.risk_mult_normal)
    } else {
        (MleDecisionCategory::Strong, cfg.risk_mult_strong)
    };

    if category == MleDecisionCategory::Reject {
        return Gate06Result {
            entry_allowed: false,
            block_reason: "net_edge_below_reject".to_string(),
            details: format!(
                "MLE REJECT: net_edge={net_edge:.4} < theta_reject={:.4} or confidence={:.3} < c_min={:.3}",
                cfg.theta_reject, mle.confidence, cfg.confidence_min
            ),
            ev_r_price,
            expected_cost_r_post_mle,
            net_edge,
            category,
            risk_mult,
            gate05,
        };
    }

    let is_shadow_mode = gate05.gate04.gate03.gate02.gate01.is_shadow_mode;
    if is_shadow_mode {
        return Gate06Result {
            entry_allowed: false,
            block_reason: "shadow_mode_early_exit".to_string(),
            details: format!("SHADOW mode: category={category:?}, net_edge={net_edge:.4} (telemetry only)"),
            ev_r_price,
            expected_cost_r_post_mle,
            net_edge,
            category,
            risk_mult,
            gate05,
        };
    }

    Gate06Result {
        entry_allowed: true,
        block_reason: String::new(),
        details: format!("PASS: category={category:?}, net_edge={net_edge:.4}, risk_mult={risk_mult:.2}"),
        ev_r_price,
        expected_cost_r_post_mle,
        net_edge,
        category,
        risk_mult,
        gate05,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_domain::{EngineType, RegimeClass};

    fn passing_gate05(is_shadow_mode: bool) -> Gate05Result {
        use crate::gate0::Gate00Result;
        use crate::gate1::Gate01Result;
        use crate::gate2::Gate02Result;
        use crate::gate3::Gate03Result;
        use crate::gate4::Gate04Result;
        use gk_domain::{DrpState, TradingMode};

        let trading_mode = if is_shadow_mode { TradingMode::Shadow } else { TradingMode::Live };

        Gate05Result {
            entry_allowed: true,
            block_reason: String::new(),
            gate04: Gate04Result {
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
                            trading_mode,
                            manual_halt_new_entries: false,
                            manual_halt_all_trading: false,
                            is_shadow_mode,
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
            },
            entry_eff: 50025.0,
            tp_eff: 50975.0,
            sl_eff: 49475.0,
            unit_risk_allin_net: 550.0,
            unit_risk_bps: 110.0,
            expected_cost_r_pre_mle: 0.05,
            details: String::new(),
        }
    }

    fn mle(p_success: f64, mu_success_r: f64, mu_fail_r: f64, confidence: f64, cost_bps: f64) -> MLEOutput {
        MLEOutput {
            p_success,
            mu_success_r,
            mu_fail_r,
            confidence,
            expected_cost_bps_post: cost_bps,
        }
    }

    #[test]
    fn strong_edge_passes_with_strong_risk_mult() {
        let cfg = Gate6Config::sane_defaults();
        let result = evaluate(&cfg, passing_gate05(false), &mle(0.7, 1.5, 1.0, 0.9, 1.0));
        assert!(result.entry_allowed);
        assert_eq!(result.category, MleDecisionCategory::Strong);
        assert_eq!(result.risk_mult, cfg.risk_mult_strong);
    }

    #[test]
    fn negative_edge_is_rejected() {
        let cfg = Gate6Config::sane_defaults();
        // p=0.40, mu_success=0.8R, mu_fail=1.0R -> EV_R = 0.4*0.8 - 0.6*1.0 = -0.28
        let result = evaluate(&cfg, passing_gate05(false), &mle(0.40, 0.8, 1.0, 0.9, 1.0));
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "net_edge_below_reject");
        assert_eq!(result.category, MleDecisionCategory::Reject);
        assert_eq!(result.risk_mult, 0.0);
    }

    #[test]
    fn low_confidence_is_rejected_even_with_good_edge() {
        let cfg = Gate6Config::sane_defaults();
        let result = evaluate(&cfg, passing_gate05(false), &mle(0.8, 2.0, 1.0, 0.1, 1.0));
        assert!(!result.entry_allowed);
        assert_eq!(result.category, MleDecisionCategory::Reject);
    }

    #[test]
    fn shadow_mode_short_circuits_after_decision() {
        let cfg = Gate6Config::sane_defaults();
        let result = evaluate(&cfg, passing_gate05(true), &mle(0.7, 1.5, 1.0, 0.9, 1.0));
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "shadow_mode_early_exit");
        // Category/risk_mult still computed for telemetry.
        assert_eq!(result.category, MleDecisionCategory::Strong);
    }

    #[test]
    fn gate5_block_propagates() {
        let cfg = Gate6Config::sane_defaults();
        let mut gate05 = passing_gate05(false);
        gate05.entry_allowed = false;
        gate05.block_reason = "unit_risk_too_small_block".to_string();
        let result = evaluate(&cfg, gate05, &mle(0.7, 1.5, 1.0, 0.9, 1.0));
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "gate05_blocked:unit_risk_too_small_block");
    }
}
