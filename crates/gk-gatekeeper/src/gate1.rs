//! GATE 1 — Kill-switch (§4.8). Pure function of GATE 0's result plus
//! manual halt flags and trading mode; performs no DRP transitions itself.

use gk_domain::{DrpState, TradingMode};

use crate::gate0::Gate00Result;

/// Result of GATE 1 (§4.8, §12 `is_shadow_mode` computed one gate early).
#[derive(Clone, Debug)]
pub struct Gate01Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub gate00: Gate00Result,
    pub drp_state: DrpState,
    pub trading_mode: TradingMode,
    pub manual_halt_new_entries: bool,
    pub manual_halt_all_trading: bool,
    pub is_shadow_mode: bool,
    pub details: String,
}

/// Evaluate GATE 1 (§4.8 order: manual_halt_all_trading, manual_halt_new_entries,
/// trading_mode PAPER/BACKTEST, GATE 0 propagation, else PASS).
pub fn evaluate(
    gate00: Gate00Result,
    trading_mode: TradingMode,
    manual_halt_new_entries: bool,
    manual_halt_all_trading: bool,
) -> Gate01Result {
    let drp_state = gate00.new_drp_state;
    let is_shadow_mode = trading_mode == TradingMode::Shadow;

    if manual_halt_all_trading {
        return Gate01Result {
            entry_allowed: false,
            block_reason: "manual_halt_all_trading".to_string(),
            drp_state,
            trading_mode,
            manual_halt_new_entries,
            manual_halt_all_trading,
            is_shadow_mode,
            details: "Manual emergency stop: all trading halted".to_string(),
            gate00,
        };
    }

    if manual_halt_new_entries {
        return Gate01Result {
            entry_allowed: false,
            block_reason: "manual_halt_new_entries".to_string(),
            drp_state,
            trading_mode,
            manual_halt_new_entries,
            manual_halt_all_trading,
            is_shadow_mode,
            details: "Manual kill-switch: new entries halted".to_string(),
            gate00,
        };
    }

    if trading_mode == TradingMode::Paper {
        return Gate01Result {
            entry_allowed: false,
            block_reason: "trading_mode_paper".to_string(),
            drp_state,
            trading_mode,
            manual_halt_new_entries,
            manual_halt_all_trading,
            is_shadow_mode,
            details: "PAPER mode: new entries blocked in GATE 1".to_string(),
            gate00,
        };
    }

    if trading_mode == TradingMode::Backtest {
        return Gate01Result {
            entry_allowed: false,
            block_reason: "trading_mode_backtest".to_string(),
            drp_state,
            trading_mode,
            manual_halt_new_entries,
            manual_halt_all_trading,
            is_shadow_mode,
            details: "BACKTEST mode: new entries blocked in GATE 1".to_string(),
            gate00,
        };
    }

    if !gate00.entry_allowed {
        let details = format!("GATE 0 blocked: {}", gate00.block_reason);
        let block_reason = format!("gate00_blocked:{}", gate00.block_reason);
        return Gate01Result {
            entry_allowed: false,
            block_reason,
            drp_state,
            trading_mode,
            manual_halt_new_entries,
            manual_halt_all_trading,
            is_shadow_mode,
            details,
            gate00,
        };
    }

    let shadow_note = if is_shadow_mode { " (SHADOW mode - will exit after GATE 6)" } else { "" };
    let details = format!("PASS: trading_mode={trading_mode:?}, DRP_state={drp_state:?}{shadow_note}");
    Gate01Result {
        entry_allowed: true,
        block_reason: String::new(),
        drp_state,
        trading_mode,
        manual_halt_new_entries,
        manual_halt_all_trading,
        is_shadow_mode,
        details,
        gate00,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passing_gate00() -> Gate00Result {
        Gate00Result {
            entry_allowed: true,
            block_reason: String::new(),
            dqs_result: None,
            drp_transition: None,
            new_drp_state: DrpState::Normal,
            new_warmup_bars_remaining: 0,
            new_drp_flap_count: 0,
            new_hibernate_until_ts_ms: None,
            details: "PASS".to_string(),
        }
    }

    #[test]
    fn manual_halt_all_trading_blocks_regardless_of_mode() {
        let result = evaluate(passing_gate00(), TradingMode::Live, false, true);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "manual_halt_all_trading");
    }

    #[test]
    fn manual_halt_new_entries_blocks() {
        let result = evaluate(passing_gate00(), TradingMode::Live, true, false);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "manual_halt_new_entries");
    }

    #[test]
    fn paper_mode_blocks() {
        let result = evaluate(passing_gate00(), TradingMode::Paper, false, false);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "trading_mode_paper");
    }

    #[test]
    fn backtest_mode_blocks() {
        let result = evaluate(passing_gate00(), TradingMode::Backtest, false, false);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "trading_mode_backtest");
    }

    #[test]
    fn gate0_block_propagates() {
        let mut gate00 = passing_gate00();
        gate00.entry_allowed = false;
        gate00.block_reason = "emergency_mode".to_string();
        let result = evaluate(gate00, TradingMode::Live, false, false);
        assert!(!result.entry_allowed);
        assert_eq!(result.block_reason, "gate00_blocked:emergency_mode");
    }

    #[test]
    fn shadow_mode_passes_with_flag_set() {
        let result = evaluate(passing_gate00(), TradingMode::Shadow, false, false);
        assert!(result.entry_allowed);
        assert!(result.is_shadow_mode);
    }

    #[test]
    fn live_mode_passes_without_shadow_flag() {
        let result = evaluate(passing_gate00(), TradingMode::Live, false, false);
        assert!(result.entry_allowed);
        assert!(!result.is_shadow_mode);
    }
}
