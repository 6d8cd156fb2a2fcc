//! GATE 4 — Signal Validation (§4.11). RR floor, SL-distance band, and
//! entry/TP/SL sanity.

use gk_domain::Signal;

use crate::gate3::Gate03Result;

/// Result of GATE 4 (§4.11).
#[derive(Clone, Debug)]
pub struct Gate04Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate03: Gate03Result,
    pub sl_distance: f64,
    pub sl_distance_atr_mult: f64,
    pub details: String,
}

/// Evaluate GATE 4 (§4.11: `raw_rr >= min_rr`; `min_sl_atr_mult * atr <= |entry - sl| <= max_sl_atr_mult * atr`;
/// entry/tp/sl/atr finite and positive, direction-consistent via `Signal::validate`).
pub fn evaluate(gate03: Gate03Result, signal: &Signal) -> Gate04Result {
    if !gate03.entry_allowed {
        let block_reason = format!("gate03_blocked:{}", gate03.block_reason);
        let details = format!("GATE 3 blocked: {}", gate03.block_reason);
        return Gate04Result {
            entry_allowed: false,
            block_reason,
            sl_distance: 0.0,
            sl_distance_atr_mult: 0.0,
            details,
            gate03,
        };
    }

    if signal.validate().is_err() {
        return Gate04Result {
            entry_allowed: false,
            block_reason: "signal_invalid".to_string(),
            sl_distance: 0.0,
            sl_distance_atr_mult: 0.0,
            details: "Signal failed sanity validation (non-finite/non-positive price or bad ordering)".to_string(),
            gate03,
        };
    }

    if signal.raw_rr < signal.min_rr {
        return Gate04Result {
            entry_allowed: false,
            block_reason: "rr_below_min".to_string(),
            sl_distance: 0.0,
            sl_distance_atr_mult: 0.0,
            details: format!("raw_rr={:.3} below min_rr={:.3}", signal.raw_rr, signal.min_rr),
            gate03,
        };
    }

    let sl_distance = (signal.entry_price - signal.sl_price).abs();
    let sl_distance_atr_mult = sl_distance / signal.atr;

    if sl_distance_atr_mult < signal.min_sl_atr_mult || sl_distance_atr_mult > signal.max_sl_atr_mult {
        return Gate04Result {
            entry_allowed: false,
            block_reason: "sl_distance_out_of_range".to_string(),
            sl_distance,
            sl_distance_atr_mult,
            details: format!(
                "sl_distance={sl_distance_atr_mult:.3}*atr outside [{:.3}, {:.3}]",
                signal.min_sl_atr_mult, signal.max_sl_atr_mult
            ),
            gate03,
        };
    }

    Gate04Result {
        entry_allowed: true,
        block_reason: String::new(),
        details: format!("PASS: raw_rr={:.3}, sl_distance={sl_distance_atr_mult:.3}*atr", signal.raw_rr),
        sl_distance,
        sl_distance_atr_mult,
        gate03,
    }
}
