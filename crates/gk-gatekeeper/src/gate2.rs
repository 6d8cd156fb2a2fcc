//! GATE 2 — Regime (§4.9). Resolves MRC/Baseline conflicts into a final
//! regime class, tracking sustained opposite-trend conflicts per symbol.

use gk_config::Gate2Config;
use gk_domain::{BaselineResult, DrpState, MrcResult, RegimeClass};

use crate::gate1::Gate01Result;

/// Per-symbol sustained-conflict tracker (§4.9 "no sustained conflict in
/// last N bars"), owned and mutated exclusively by `evaluate` — the same
/// single-writer pattern as `DrpStateMachine` (§5).
#[derive(Copy, Clone, Debug, Default)]
pub struct RegimeConflictTracker {
    consecutive_conflict_bars: u32,
}

impl RegimeConflictTracker {
    pub fn new() -> Self {
        RegimeConflictTracker::default()
    }

    pub fn consecutive_conflict_bars(&self) -> u32 {
        self.consecutive_conflict_bars
    }

    fn observe(&mut self, is_opposite_trend_conflict: bool) -> u32 {
        if is_opposite_trend_conflict {
            self.consecutive_conflict_bars += 1;
        } else {
            self.consecutive_conflict_bars = 0;
        }
        self.consecutive_conflict_bars
    }
}

/// Result of GATE 2 (§4.9).
#[derive(Clone, Debug)]
pub struct Gate02Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate01: Gate01Result,
    pub final_class: RegimeClass,
    pub final_confidence: f64,
    pub probe_conditions_met: bool,
    pub consecutive_conflict_bars: u32,
    pub details: String,
}

fn is_opposite_trend(a: RegimeClass, b: RegimeClass) -> bool {
    matches!(
        (a, b),
        (RegimeClass::TrendUp, RegimeClass::TrendDown) | (RegimeClass::TrendDown, RegimeClass::TrendUp)
    )
}

fn is_compatible_breakout(breakout: RegimeClass, baseline: RegimeClass) -> bool {
    match breakout {
        RegimeClass::BreakoutUp => baseline != RegimeClass::TrendDown,
        RegimeClass::BreakoutDown => baseline != RegimeClass::TrendUp,
        _ => false,
    }
}

/// Evaluate GATE 2 (§4.9 conflict-resolution table, low-confidence and
/// sustained-conflict blocks).
pub fn evaluate(
    cfg: &Gate2Config,
    tracker: &mut RegimeConflictTracker,
    gate01: Gate01Result,
    mrc: MrcResult,
    baseline: BaselineResult,
) -> Gate02Result {
    let low_confidence = mrc.confidence < cfg.min_probe_confidence || baseline.confidence < cfg.min_probe_confidence;

    if !gate01.entry_allowed {
        let block_reason = format!("gate01_blocked:{}", gate01.block_reason);
        let details = format!("GATE 1 blocked: {}", gate01.block_reason);
        return Gate02Result {
            entry_allowed: false,
            block_reason,
            final_class: RegimeClass::NoTrade,
            final_confidence: 0.0,
            probe_conditions_met: false,
            consecutive_conflict_bars: tracker.consecutive_conflict_bars,
            details,
            gate01,
        };
    }

    let conflict_now = is_opposite_trend(mrc.class, baseline.class);
    let conflict_bars = tracker.observe(conflict_now);

    if conflict_now && conflict_bars >= cfg.conflict_sustained_bars {
        return Gate02Result {
            entry_allowed: false,
            block_reason: "regime_conflict_sustained".to_string(),
            final_class: RegimeClass::NoTrade,
            final_confidence: mrc.confidence.min(baseline.confidence),
            probe_conditions_met: false,
            consecutive_conflict_bars: conflict_bars,
            details: format!("Sustained MRC/Baseline conflict for {conflict_bars} bars"),
            gate01,
        };
    }

    if mrc.class == RegimeClass::Noise {
        return Gate02Result {
            entry_allowed: false,
            block_reason: "regime_noise".to_string(),
            final_class: RegimeClass::NoTrade,
            final_confidence: mrc.confidence,
            probe_conditions_met: false,
            consecutive_conflict_bars: conflict_bars,
            details: "MRC classified NOISE".to_string(),
            gate01,
        };
    }

    if low_confidence {
        return Gate02Result {
            entry_allowed: false,
            block_reason: "regime_low_confidence".to_string(),
            final_class: RegimeClass::NoTrade,
            final_confidence: mrc.confidence.min(baseline.confidence),
            probe_conditions_met: false,
            consecutive_conflict_bars: conflict_bars,
            details: format!(
                "Low confidence: mrc={:.2}, baseline={:.2}, min_required={:.2}",
                mrc.confidence, baseline.confidence, cfg.min_probe_confidence
            ),
            gate01,
        };
    }

    let probe_conditions_met = mrc.confidence >= cfg.min_probe_confidence
        && baseline.confidence >= cfg.min_probe_confidence
        && conflict_bars < cfg.conflict_sustained_bars
        && gate01.drp_state == DrpState::Normal;

    let (final_class, entry_allowed, block_reason) = match (mrc.class, baseline.class) {
        (RegimeClass::TrendUp, RegimeClass::TrendUp) | (RegimeClass::TrendUp, RegimeClass::Range) => {
            (RegimeClass::TrendUp, true, String::new())
        }
        (RegimeClass::TrendDown, RegimeClass::TrendDown) | (RegimeClass::TrendDown, RegimeClass::Range) => {
            (RegimeClass::TrendDown, true, String::new())
        }
        (RegimeClass::TrendUp, RegimeClass::TrendDown) | (RegimeClass::TrendDown, RegimeClass::TrendUp) => {
            if probe_conditions_met {
                (RegimeClass::ProbeTrade, true, String::new())
            } else {
                (RegimeClass::NoTrade, false, "regime_conflict_no_probe".to_string())
            }
        }
        (RegimeClass::Range, RegimeClass::Range) => (RegimeClass::Range, true, String::new()),
        (RegimeClass::BreakoutUp, b) if is_compatible_breakout(RegimeClass::BreakoutUp, b) => {
            (RegimeClass::BreakoutUp, true, String::new())
        }
        (RegimeClass::BreakoutDown, b) if is_compatible_breakout(RegimeClass::BreakoutDown, b) => {
            (RegimeClass::BreakoutDown, true, String::new())
        }
        _ => (RegimeClass::NoTrade, false, "regime_no_trade".to_string()),
    };

    let details = format!(
        "mrc={:?}({:.2}), baseline={:?}({:.2}) -> final={:?}",
        mrc.class, mrc.confidence, baseline.class, baseline.confidence, final_class
    );

    Gate02Result {
        entry_allowed,
        block_reason,
        final_class,
        final_confidence: mrc.confidence.min(baseline.confidence),
        probe_conditions_met,
        consecutive_conflict_bars: conflict_bars,
        details,
        gate01,
    }
}
