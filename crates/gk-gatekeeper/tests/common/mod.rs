//! Shared fixture helpers for the integration-test binaries under `tests/`.
//! Each integration test file is compiled as its own crate, so this module
//! is included via `mod common;` rather than exposed through the library.

use gk_domain::{DrpState, EngineType, RegimeClass, TradingMode};
use gk_gatekeeper::{Gate00Result, Gate01Result, Gate02Result, Gate03Result, Gate04Result, Gate05Result};

/// A GATE 5 result that passes straight through, LIVE mode, TREND/TrendUp
/// regime, `unit_risk_allin_net=550`, `unit_risk_bps=110`.
pub fn passing_gate05() -> Gate05Result {
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
        entry_eff: 50_025.0,
        tp_eff: 50_975.0,
        sl_eff: 49_475.0,
        unit_risk_allin_net: 550.0,
        unit_risk_bps: 110.0,
        expected_cost_r_pre_mle: 0.05,
        details: String::new(),
    }
}
