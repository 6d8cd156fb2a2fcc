//! GATE 8 — Gap / Glitch (§4.15). Price-jump and spike detection plus
//! stale-book flagging; any hard anomaly emits a `DrpTrigger` for the host
//! to feed back into the DRP machine on the next bar.

use gk_config::Gate8Config;
use gk_domain::EmergencyCause;

use crate::gate7::Gate07Result;

/// Inputs specific to GATE 8's anomaly checks — not part of `MarketState`
/// because they describe history/timing rather than a single snapshot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Gate8Input {
    pub price_now: f64,
    pub price_prev: f64,
    pub price_mean_recent: f64,
    pub price_stddev_recent: f64,
    pub orderbook_age_sec: f64,
    pub price_age_sec: f64,
}

/// Emitted when GATE 8 detects a hard anomaly; consumed by the host on the
/// next bar to drive `DrpStateMachine::evaluate_transition`'s
/// `emergency_cause` input (§4.15, §6 "Produced").
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrpTrigger {
    pub cause: EmergencyCause,
}

/// Result of GATE 8 (§4.15).
#[derive(Clone, Debug)]
pub struct Gate08Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate07: Gate07Result,
    pub jump_frac: f64,
    pub spike_z: f64,
    pub stale_book: bool,
    pub suspected_data_glitch: bool,
    pub drp_trigger: Option<DrpTrigger>,
    pub details: String,
}

/// Evaluate GATE 8 (§4.15: jump_frac, spike_z, stale-book).
pub fn evaluate(cfg: &Gate8Config, gate07: Gate07Result, input: Gate8Input) -> Gate08Result {
    if !gate07.entry_allowed {
        let block_reason = format!("gate07_blocked:{}", gate07.block_reason);
        let details = format!("GATE 7 blocked: {}", gate07.block_reason);
        return Gate08Result {
            entry_allowed: false,
            block_reason,
            jump_frac: 0.0,
            spike_z: 0.0,
            stale_book: false,
            suspected_data_glitch: false,
            drp_trigger: None,
            details,
            gate07,
        };
    }

    let jump_frac = if input.price_prev != 0.0 {
        (input.price_now - input.price_prev).abs() / input.price_prev
    } else {
        0.0
    };
    let spike_z = if input.price_stddev_recent > 0.0 {
        (input.price_now - input.price_mean_recent).abs() / input.price_stddev_recent
    } else {
        0.0
    };
    let stale_book = input.orderbook_age_sec > cfg.book_stale_max_sec && input.price_age_sec < cfg.price_fresh_max_sec;

    let jump_hard = jump_frac > cfg.jump_hard_frac;
    let spike_hard = spike_z > cfg.spike_z_hard;
    let suspected_data_glitch = jump_hard || spike_hard || stale_book;

    if jump_hard {
        return Gate08Result {
            entry_allowed: false,
            block_reason: "gap_hard".to_string(),
            details: format!("jump_frac={jump_frac:.4} > jump_hard={:.4}", cfg.jump_hard_frac),
            jump_frac,
            spike_z,
            stale_book,
            suspected_data_glitch,
            drp_trigger: Some(DrpTrigger { cause: EmergencyCause::DataGlitch }),
            gate07,
        };
    }
    if spike_hard {
        return Gate08Result {
            entry_allowed: false,
            block_reason: "spike_hard".to_string(),
            details: format!("spike_z={spike_z:.3} > z_hard={:.3}", cfg.spike_z_hard),
            jump_frac,
            spike_z,
            stale_book,
            suspected_data_glitch,
            drp_trigger: Some(DrpTrigger { cause: EmergencyCause::DataGlitch }),
            gate07,
        };
    }
    if stale_book {
        return Gate08Result {
            entry_allowed: false,
            block_reason: "stale_book".to_string(),
            details: format!(
                "orderbook_age_sec={:.1} > book_stale_max={:.1} while price_age_sec={:.1} < price_fresh_max={:.1}",
                input.orderbook_age_sec, cfg.book_stale_max_sec, input.price_age_sec, cfg.price_fresh_max_sec
            ),
            jump_frac,
            spike_z,
            stale_book,
            suspected_data_glitch,
            drp_trigger: Some(DrpTrigger { cause: EmergencyCause::DataGlitch }),
            gate07,
        };
    }

    let soft_jump = jump_frac > cfg.jump_soft_frac;
    let details = if soft_jump {
        format!("PASS (soft jump): jump_frac={jump_frac:.4} > jump_soft={:.4}", cfg.jump_soft_frac)
    } else {
        format!("PASS: jump_frac={jump_frac:.4}, spike_z={spike_z:.3}")
    };

    Gate08Result {
        entry_allowed: true,
        block_reason: String::new(),
        details,
        jump_frac,
        spike_z,
        stale_book,
        suspected_data_glitch: false,
        drp_trigger: None,
        gate07,
    }
}
