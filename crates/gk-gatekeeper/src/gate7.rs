//! GATE 7 — Liquidity (§4.14). Hard-threshold fails plus smooth
//! soft-to-hard degradation multipliers.

use gk_config::Gate7Config;
use gk_domain::MarketState;

use crate::gate6::Gate06Result;

/// Result of GATE 7 (§4.14).
#[derive(Clone, Debug)]
pub struct Gate07Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate06: Gate06Result,
    pub depth_side_usd: f64,
    pub spread_mult: f64,
    pub impact_mult: f64,
    pub liquidity_mult: f64,
    pub details: String,
}

/// Linear [0,1] degradation for "lower is better" metrics (spread, |obi|):
/// 1.0 at/below `soft`, 0.0 at/above `hard`.
fn smooth_degradation_falling(value: f64, soft: f64, hard: f64) -> f64 {
    if hard <= soft {
        return if value <= soft { 1.0 } else { 0.0 };
    }
    ((hard - value) / (hard - soft)).clamp(0.0, 1.0)
}

/// Linear [0,1] degradation for "higher is better" metrics (depth):
/// 1.0 at/above `soft`, 0.0 at/below `hard`.
fn smooth_degradation_rising(value: f64, hard: f64, soft: f64) -> f64 {
    if soft <= hard {
        return if value >= soft { 1.0 } else { 0.0 };
    }
    ((value - hard) / (soft - hard)).clamp(0.0, 1.0)
}

/// Evaluate GATE 7 (§4.14). `depth_side_usd` is the book depth on the side
/// of the candidate trade (bid depth for SHORT exits, ask depth for LONG
/// entries, etc. — supplied by the caller).
pub fn evaluate(cfg: &Gate7Config, gate06: Gate06Result, market: &MarketState, depth_side_usd: f64) -> Gate07Result {
    if !gate06.entry_allowed {
        let block_reason = format!("gate06_blocked:{}", gate06.block_reason);
        let details = format!("GATE 6 blocked: {}", gate06.block_reason);
        return Gate07Result {
            entry_allowed: false,
            block_reason,
            depth_side_usd,
            spread_mult: 0.0,
            impact_mult: 0.0,
            liquidity_mult: 0.0,
            details,
            gate06,
        };
    }

    if depth_side_usd < cfg.depth_hard_min_usd {
        return Gate07Result {
            entry_allowed: false,
            block_reason: "liquidity_hard_fail".to_string(),
            details: format!("depth_side_usd={depth_side_usd:.0} < depth_hard_min={:.0}", cfg.depth_hard_min_usd),
            depth_side_usd,
            spread_mult: 0.0,
            impact_mult: 0.0,
            liquidity_mult: 0.0,
            gate06,
        };
    }
    if market.spread_bps > cfg.spread_hard_max_bps {
        return Gate07Result {
            entry_allowed: false,
            block_reason: "liquidity_hard_fail".to_string(),
            details: format!("spread_bps={:.2} > spread_hard_max={:.2}", market.spread_bps, cfg.spread_hard_max_bps),
            depth_side_usd,
            spread_mult: 0.0,
            impact_mult: 0.0,
            liquidity_mult: 0.0,
            gate06,
        };
    }
    if market.volume_24h_usd < cfg.volume_hard_min_usd {
        return Gate07Result {
            entry_allowed: false,
            block_reason: "liquidity_hard_fail".to_string(),
            details: format!(
                "volume_24h_usd={:.0} < volume_hard_min={:.0}",
                market.volume_24h_usd, cfg.volume_hard_min_usd
            ),
            depth_side_usd,
            spread_mult: 0.0,
            impact_mult: 0.0,
            liquidity_mult: 0.0,
            gate06,
        };
    }
    if market.obi.abs() > cfg.obi_hard_max {
        return Gate07Result {
            entry_allowed: false,
            block_reason: "liquidity_hard_fail".to_string(),
            details: format!("|obi|={:.3} > obi_hard_max={:.3}", market.obi.abs(), cfg.obi_hard_max),
            depth_side_usd,
            spread_mult: 0.0,
            impact_mult: 0.0,
            liquidity_mult: 0.0,
            gate06,
        };
    }

    let spread_mult = smooth_degradation_falling(market.spread_bps, cfg.spread_soft_max_bps, cfg.spread_hard_max_bps);
    // Depth/OBI both compress the "impact" side of the trade; take the tighter of the two.
    let depth_mult = smooth_degradation_rising(depth_side_usd, cfg.depth_hard_min_usd, cfg.depth_soft_min_usd);
    let obi_mult = smooth_degradation_falling(market.obi.abs(), cfg.obi_soft_max, cfg.obi_hard_max);
    let impact_mult = depth_mult.min(obi_mult);
    let liquidity_mult = spread_mult.min(impact_mult);

    Gate07Result {
        entry_allowed: true,
        block_reason: String::new(),
        details: format!("PASS: liquidity_mult={liquidity_mult:.3} (spread_mult={spread_mult:.3}, impact_mult={impact_mult:.3})"),
        depth_side_usd,
        spread_mult,
        impact_mult,
        liquidity_mult,
        gate06,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_domain::DataQualitySnapshot;
    use std::collections::BTreeMap;

    fn dq() -> DataQualitySnapshot {
        DataQualitySnapshot {
            price_ts_ms: 1_000,
            liquidity_ts_ms: 1_000,
            orderbook_ts_ms: 1_000,
            volatility_ts_ms: 1_000,
            funding_ts_ms: Some(1_000),
            oi_ts_ms: Some(1_000),
            basis_ts_ms: Some(1_000),
            derivatives_ts_ms: Some(1_000),
            price_src_a: 100.0,
            price_src_b: 100.0,
            price_oracle_c: Some(100.0),
            oracle_ts_ms: Some(1_000),
        }
    }

    fn market(spread_bps: f64, volume_24h_usd: f64, obi: f64) -> MarketState {
        MarketState {
            symbol: "BTC-USD".into(),
            timestamp_ms: 1_000,
            last: 50_000.0,
            bid: 49_995.0,
            ask: 50_005.0,
            spread_bps,
            atr: 500.0,
            atr_z_short: 1.0,
            depth_bid_usd: 100_000.0,
            depth_ask_usd: 100_000.0,
            volume_24h_usd,
            obi,
            funding_rate: 0.0001,
            next_funding_ts_ms: 2_000,
            open_interest: 1_000_000.0,
            basis: 0.0,
            data_quality: dq(),
            correlations: BTreeMap::new(),
        }
    }

    fn passing_gate06() -> Gate06Result {
        use crate::gate0::Gate00Result;
        use crate::gate1::Gate01Result;
        use crate::gate2::Gate02Result;
        use crate::gate3::Gate03Result;
        use crate::gate4::Gate04Result;
        use crate::gate5::Gate05Result;
        use crate::gate6::MleDecisionCategory;
        use gk_domain::{DrpState, EngineType, RegimeClass, TradingMode};

        Gate06Result {
            entry_allowed: true,
            block_reason: String::new(),
            gate05: Gate05Result {
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
                },
                entry_eff: 50025.0,
                tp_eff: 50975.0,
                sl_eff: 49475.0,
                unit_risk_allin_net: 550.0,
                unit_risk_bps: 110.0,
                expected_cost_r_pre_mle: 0.05,
                details: String::new(),
            },
            ev_r_price: 0.3,
            expected_cost_r_post_mle: 0.05,
            net_edge: 0.25,
            category: MleDecisionCategory::Strong,
            risk_mult: 1.5,
            details: String::new(),
        }
    }

    #[test]
    fn good_liquidity_passes_with_full_mult() {
        let cfg = Gate7Config::sane_defaults();
        let result = evaluate(&cfg, passing_gate06(), &market(5.0, 10_000_000.0, 0.0), 100_000.0);
        assert!(result.entry_allowed);
        assert_eq!(result.liquidity_mult, 1.0);
    }

    #[test]
    fn thin_depth_hard_fails() {
        let cfg = Gate7Config::sane_defaults();
        let result = evaluate(&cfg, passing_gate06(), &market(5.0, 10_000_000.0, 0.0), 1_000.0);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "liquidity_hard_fail");
    }

    #[test]
    fn wide_spread_hard_fails() {
        let cfg = Gate7Config::sane_defaults();
        let result = evaluate(&cfg, passing_gate06(), &market(100.0, 10_000_000.0, 0.0), 100_000.0);
        assert!(!result.entry_allowed);
    }

    #[test]
    fn soft_degradation_attenuates_mult() {
        let cfg = Gate7Config::sane_defaults();
        // spread between soft (20) and hard (50)
        let result = evaluate(&cfg, passing_gate06(), &market(35.0, 10_000_000.0, 0.0), 100_000.0);
        assert!(result.entry_allowed);
        assert!(result.liquidity_mult > 0.0 && result.liquidity_mult < 1.0);
    }

    #[test]
    fn gate6_block_propagates() {
        let cfg = Gate7Config::sane_defaults();
        let mut gate06 = passing_gate06();
        gate06.entry_allowed = false;
        gate06.block_reason = "net_edge_below_reject".to_string();
        let result = evaluate(&cfg, gate06, &market(5.0, 10_000_000.0, 0.0), 100_000.0);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "gate06_blocked:mle_reject");
    }
}
