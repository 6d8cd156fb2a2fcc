//! Stages 4-5 (§4.5): weighted DQS score and the downstream attenuation
//! multiplier, composed with stages 1-3 into one `evaluate_dqs` call.

use gk_config::DqsConfig;
use gk_domain::MarketState;

use crate::cross_validation::xdev;
use crate::glitch::any_glitch;
use crate::staleness::{score_critical, score_optional};
use crate::types::{DqsComponents, DqsResult};

/// `1.0` at/above `dqs_mult_full_at`, linear down to `dqs_mult_floor` at
/// `dqs_mult_floor_at`, and `0.0` strictly below `dqs_mult_floor_at` (§4.5
/// stage 4 — the floor value and the "0.0 below" clause are deliberately
/// discontinuous at that boundary, matching the spec literally).
pub fn compute_dqs_mult(dqs: f64, cfg: &DqsConfig) -> f64 {
    if dqs >= cfg.dqs_mult_full_at {
        1.0
    } else if dqs >= cfg.dqs_mult_floor_at {
        let span = (cfg.dqs_mult_full_at - cfg.dqs_mult_floor_at).max(f64::EPSILON);
        let t = (dqs - cfg.dqs_mult_floor_at) / span;
        cfg.dqs_mult_floor + t * (1.0 - cfg.dqs_mult_floor)
    } else {
        0.0
    }
}

/// Full DQS evaluation for one `MarketState` snapshot (§4.5 stages 1-5).
///
/// Checks run in stage order — staleness, cross-validation, glitch sanity
/// — and the first one to hard-gate sets `block_reason`; later stages
/// still run to completion so `components`/`dqs` are always populated for
/// diagnostics, matching the DRP machine's appetite for a `dqs` value even
/// on a hard-gated bar.
pub fn evaluate_dqs(cfg: &DqsConfig, market: &MarketState, now_ts_ms: i64) -> DqsResult {
    let dq = &market.data_quality;

    let components = DqsComponents {
        price: score_critical(now_ts_ms, dq.price_ts_ms, cfg.price),
        liquidity: score_critical(now_ts_ms, dq.liquidity_ts_ms, cfg.liquidity),
        orderbook: score_critical(now_ts_ms, dq.orderbook_ts_ms, cfg.orderbook),
        volatility: score_critical(now_ts_ms, dq.volatility_ts_ms, cfg.volatility),
        funding: score_optional(now_ts_ms, dq.funding_ts_ms, cfg.funding),
        open_interest: score_optional(now_ts_ms, dq.oi_ts_ms, cfg.open_interest),
        basis: score_optional(now_ts_ms, dq.basis_ts_ms, cfg.basis),
        derivatives: score_optional(now_ts_ms, dq.derivatives_ts_ms, cfg.derivatives),
    };

    let mut hard_gate_triggered = false;
    let mut block_reason = String::new();

    // Stage 1: critical-source staleness hard-gates.
    let critical = [
        ("price", components.price),
        ("liquidity", components.liquidity),
        ("orderbook", components.orderbook),
        ("volatility", components.volatility),
    ];
    for (name, score) in critical {
        if score.is_hard_stale {
            hard_gate_triggered = true;
            block_reason = format!("hard_gate:stale_critical_{name}");
            break;
        }
    }

    // Stage 2: cross-validation.
    let xdev_val = xdev(dq.price_src_a, dq.price_src_b);
    if !hard_gate_triggered && xdev_val >= cfg.xdev_hard_threshold {
        hard_gate_triggered = true;
        block_reason = "hard_gate:cross_validation_xdev".to_string();
    }

    let xdev_oracle = match (dq.price_oracle_c, dq.oracle_ts_ms) {
        (Some(oracle_price), Some(oracle_ts)) => {
            let oracle_score = score_critical(now_ts_ms, oracle_ts, cfg.oracle);
            let dev = xdev(dq.price_src_a, oracle_price);
            if !hard_gate_triggered && !oracle_score.is_hard_stale && dev >= cfg.xdev_hard_threshold {
                hard_gate_triggered = true;
                block_reason = "hard_gate:oracle_sanity".to_string();
            }
            Some(dev)
        }
        _ => None,
    };

    // Stage 3: glitch sanity over the raw market fields.
    let glitch_fields = [
        market.last,
        market.atr,
        market.spread_bps,
        market.bid,
        market.ask,
        market.depth_bid_usd,
        market.depth_ask_usd,
        market.atr_z_short,
    ];
    if !hard_gate_triggered && any_glitch(&glitch_fields) {
        hard_gate_triggered = true;
        block_reason = "hard_gate:glitch_nan".to_string();
    }

    // Stage 4: weighted DQS score (weights sum to 1.0 in `DqsConfig::sane_defaults`,
    // so no renormalization is needed; a custom config that doesn't sum to 1.0 is a
    // host misconfiguration, not something this evaluator silently corrects).
    let dqs = cfg.weight_price * components.price.score
        + cfg.weight_liquidity * components.liquidity.score
        + cfg.weight_orderbook * components.orderbook.score
        + cfg.weight_volatility * components.volatility.score
        + cfg.weight_funding * components.funding.score
        + cfg.weight_open_interest * components.open_interest.score
        + cfg.weight_basis * components.basis.score
        + cfg.weight_derivatives * components.derivatives.score;

    let dqs_mult = compute_dqs_mult(dqs, cfg);

    DqsResult {
        dqs,
        dqs_mult,
        hard_gate_triggered,
        block_reason,
        components,
        xdev: xdev_val,
        xdev_oracle,
    }
}
