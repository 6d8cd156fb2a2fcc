//! GATE 9 — Funding / Proximity (§4.16). Converts expected funding
//! payments over the anticipated hold into R-units and applies a
//! proximity-to-funding-event blackout/degradation.

use gk_config::Gate9Config;
use gk_domain::{Direction, MarketState};

use crate::gate8::Gate08Result;

/// Inputs specific to GATE 9 — the anticipated hold and the net trading
/// edge carried forward from GATE 6, neither of which belongs on
/// `MarketState` or any upstream `GateNResult`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gate9Input {
    pub direction: Direction,
    pub entry_price: f64,
    pub unit_risk_allin_net: f64,
    pub hold_hours: f64,
    pub ev_r_price_net: f64,
    pub funding_bonus_r_used: f64,
    pub now_ts_ms: i64,
}

/// Result of GATE 9 (§4.16).
#[derive(Clone, Debug)]
pub struct Gate09Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate08: Gate08Result,
    pub funding_cost_r: f64,
    pub net_yield_r: f64,
    pub time_to_funding_sec: f64,
    pub proximity_mult: f64,
    pub details: String,
}

fn direction_sign(direction: Direction) -> f64 {
    match direction {
        Direction::Long => 1.0,
        Direction::Short => -1.0,
    }
}

/// Evaluate GATE 9 (§4.16).
pub fn evaluate(cfg: &Gate9Config, gate08: Gate08Result, market: &MarketState, input: Gate9Input) -> Gate09Result {
    if !gate08.entry_allowed {
        let block_reason = format!("gate08_blocked:{}", gate08.block_reason);
        let details = format!("GATE 8 blocked: {}", gate08.block_reason);
        return Gate09Result {
            entry_allowed: false,
            block_reason,
            funding_cost_r: 0.0,
            net_yield_r: 0.0,
            time_to_funding_sec: 0.0,
            proximity_mult: 0.0,
            details,
            gate08,
        };
    }

    let time_to_funding_sec = ((market.next_funding_ts_ms - input.now_ts_ms) as f64 / 1000.0).max(0.0);

    let n_events = (input.hold_hours / cfg.funding_interval_hours).ceil().max(0.0);
    let sign = direction_sign(input.direction);
    let funding_pnl_frac = -sign * market.funding_rate * n_events;
    let funding_cost_r = -funding_pnl_frac * input.entry_price / input.unit_risk_allin_net;
    let net_yield_r = input.ev_r_price_net - funding_cost_r + input.funding_bonus_r_used;

    let tau = ((cfg.proximity_soft_sec - time_to_funding_sec) / (cfg.proximity_soft_sec - cfg.proximity_hard_sec))
        .clamp(0.0, 1.0);
    let proximity_mult = 1.0 - (1.0 - cfg.proximity_mult_min) * tau.powf(cfg.proximity_power);

    let blackout = time_to_funding_sec < cfg.proximity_hard_sec
        && funding_cost_r > cfg.blackout_cost_r_threshold
        && input.hold_hours < cfg.blackout_hold_hours_max;

    if blackout {
        return Gate09Result {
            entry_allowed: false,
            block_reason: "funding_blackout".to_string(),
            details: format!(
                "time_to_funding_sec={time_to_funding_sec:.0} < hard={:.0}, funding_cost_R={funding_cost_r:.4} > threshold={:.4}, hold_hours={:.2} < max={:.2}",
                cfg.proximity_hard_sec, cfg.blackout_cost_r_threshold, input.hold_hours, cfg.blackout_hold_hours_max
            ),
            funding_cost_r,
            net_yield_r,
            time_to_funding_sec,
            proximity_mult,
            gate08,
        };
    }

    Gate09Result {
        entry_allowed: true,
        block_reason: String::new(),
        details: format!(
            "PASS: funding_cost_R={funding_cost_r:.4}, net_yield_R={net_yield_r:.4}, proximity_mult={proximity_mult:.3}"
        ),
        funding_cost_r,
        net_yield_r,
        time_to_funding_sec,
        proximity_mult,
        gate08,
    }
}
