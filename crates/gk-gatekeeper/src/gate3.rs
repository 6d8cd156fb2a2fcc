//! GATE 3 — Strategy Compatibility (§4.10). Checks the signal's engine
//! type against GATE 2's resolved regime class via a fixed matrix.

use gk_domain::{EngineType, RegimeClass};

use crate::gate2::Gate02Result;

/// Result of GATE 3 (§4.10).
#[derive(Clone, Debug)]
pub struct Gate03Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate02: Gate02Result,
    pub engine: EngineType,
    pub regime_class: RegimeClass,
    pub details: String,
}

fn is_compatible(engine: EngineType, class: RegimeClass) -> bool {
    match engine {
        EngineType::Trend => matches!(
            class,
            RegimeClass::TrendUp
                | RegimeClass::TrendDown
                | RegimeClass::BreakoutUp
                | RegimeClass::BreakoutDown
                | RegimeClass::ProbeTrade
        ),
        EngineType::Range => matches!(class, RegimeClass::Range),
    }
}

/// Evaluate GATE 3 (§4.10 compatibility matrix).
pub fn evaluate(gate02: Gate02Result, engine: EngineType) -> Gate03Result {
    let regime_class = gate02.final_class;

    if !gate02.entry_allowed {
        let block_reason = format!("gate02_blocked:{}", gate02.block_reason);
        let details = format!("GATE 2 blocked: {}", gate02.block_reason);
        return Gate03Result {
            entry_allowed: false,
            block_reason,
            engine,
            regime_class,
            details,
            gate02,
        };
    }

    if matches!(regime_class, RegimeClass::NoTrade | RegimeClass::Noise) {
        return Gate03Result {
            entry_allowed: false,
            block_reason: "incompatible_strategy_regime".to_string(),
            engine,
            regime_class,
            details: format!("{regime_class:?} blocks all engines"),
            gate02,
        };
    }

    if !is_compatible(engine, regime_class) {
        return Gate03Result {
            entry_allowed: false,
            block_reason: "incompatible_strategy_regime".to_string(),
            engine,
            regime_class,
            details: format!("{engine:?} engine incompatible with {regime_class:?}"),
            gate02,
        };
    }

    Gate03Result {
        entry_allowed: true,
        block_reason: String::new(),
        details: format!("PASS: {engine:?} compatible with {regime_class:?}"),
        engine,
        regime_class,
        gate02,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gk_domain::{DrpState, TradingMode};

    fn passing_gate02(final_class: RegimeClass) -> Gate02Result {
        use crate::gate0::Gate00Result;
        use crate::gate1::Gate01Result;

        Gate02Result {
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
            final_class,
            final_confidence: 0.9,
            probe_conditions_met: false,
            consecutive_conflict_bars: 0,
            details: String::new(),
        }
    }

    #[test]
    fn trend_engine_compatible_with_trend_up() {
        let result = evaluate(passing_gate02(RegimeClass::TrendUp), EngineType::Trend);
        assert!(result.entry_allowed);
    }

    #[test]
    fn trend_engine_compatible_with_probe_trade() {
        let result = evaluate(passing_gate02(RegimeClass::ProbeTrade), EngineType::Trend);
        assert!(result.entry_allowed);
    }

    #[test]
    fn range_engine_incompatible_with_trend_up() {
        let result = evaluate(passing_gate02(RegimeClass::TrendUp), EngineType::Range);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "incompatible_strategy_regime");
    }

    #[test]
    fn range_engine_compatible_with_range() {
        let result = evaluate(passing_gate02(RegimeClass::Range), EngineType::Range);
        assert!(result.entry_allowed);
    }

    #[test]
    fn no_trade_blocks_all_engines() {
        let result = evaluate(passing_gate02(RegimeClass::NoTrade), EngineType::Trend);
        assert!(!result.entry_allowed);
    }

    #[test]
    fn gate2_block_propagates() {
        let mut gate02 = passing_gate02(RegimeClass::TrendUp);
        gate02.entry_allowed = false;
        gate02.block_reason = "regime_noise".to_string();
        let result = evaluate(gate02, EngineType::Trend);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "gate02_blocked:regime_noise");
    }
}
