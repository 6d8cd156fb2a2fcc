//! GATE 0 — Warm-up / DQS (§4.7). Composes the DQS evaluator and the DRP
//! state machine: the only gate that mutates DRP transition history.

use gk_config::AdmissionConfig;
use gk_domain::{DrpState, EmergencyCause, MarketState, PortfolioState};
use gk_dqs::{evaluate_dqs, DqsResult};
use gk_drp::{DrpStateMachine, DrpTransitionInput, DrpTransitionResult};

/// Result of GATE 0 (§4.7, §12). Carries the updated DRP-derived portfolio
/// fields the host must persist for the next bar.
#[derive(Clone, Debug)]
pub struct Gate00Result {
    pub entry_allowed: bool,
    pub block_reason: String,
    pub dqs_result: Option<DqsResult>,
    pub drp_transition: Option<DrpTransitionResult>,
    pub new_drp_state: DrpState,
    pub new_warmup_bars_remaining: u32,
    pub new_drp_flap_count: u32,
    pub new_hibernate_until_ts_ms: Option<i64>,
    pub details: String,
}

/// Evaluate GATE 0 for one bar (§4.7 steps 1-5).
#[allow(clippy::too_many_arguments)]
pub fn evaluate(
    cfg: &AdmissionConfig,
    drp_machine: &mut DrpStateMachine,
    portfolio: &PortfolioState,
    market: &MarketState,
    now_ts_ms: i64,
    emergency_cause: Option<EmergencyCause>,
    successful_bar_completed: bool,
) -> Gate00Result {
    let mut current_state = portfolio.drp_state;
    let mut warmup_bars_remaining = portfolio.warmup_bars_remaining;
    let mut drp_flap_count = portfolio.drp_flap_count;
    let hibernate_until_ts_ms = Some(portfolio.hibernate_until_ts_ms);

    // 1. HIBERNATE: evaluate the DRP machine first, using a dummy DQS
    // value since the transition function ignores it while HIBERNATE.
    if current_state == DrpState::Hibernate {
        let hibernate_input = DrpTransitionInput {
            current_state,
            dqs: 1.0,
            hard_gate_triggered: false,
            warmup_bars_remaining,
            drp_flap_count,
            hibernate_until_ts_ms,
            now_ts_ms,
            atr_z_short: market.atr_z_short,
            emergency_cause,
            successful_bar_completed,
        };
        let transition = drp_machine.evaluate_transition(&cfg.drp, hibernate_input);
        if transition.new_state == DrpState::Hibernate {
            return Gate00Result {
                entry_allowed: false,
                block_reason: "hibernate_mode".to_string(),
                dqs_result: None,
                new_drp_state: transition.new_state,
                new_warmup_bars_remaining: transition.warmup_bars_remaining,
                new_drp_flap_count: transition.drp_flap_count,
                new_hibernate_until_ts_ms: transition.hibernate_until_ts_ms,
                details: format!("HIBERNATE mode active: {}", transition.details),
                drp_transition: Some(transition),
            };
        }
        current_state = transition.new_state;
        warmup_bars_remaining = transition.warmup_bars_remaining;
        drp_flap_count = transition.drp_flap_count;
    }

    // 2. DQS evaluation.
    let dqs_result = evaluate_dqs(&cfg.dqs, market, now_ts_ms);

    // 3. DRP transition from DQS + hard_gate.
    let transition = drp_machine.evaluate_transition(
        &cfg.drp,
        DrpTransitionInput {
            current_state,
            dqs: dqs_result.dqs,
            hard_gate_triggered: dqs_result.hard_gate_triggered,
            warmup_bars_remaining,
            drp_flap_count,
            hibernate_until_ts_ms,
            now_ts_ms,
            atr_z_short: market.atr_z_short,
            emergency_cause,
            successful_bar_completed,
        },
    );
    let new_state = transition.new_state;

    // 4. Block cascade.
    if dqs_result.hard_gate_triggered {
        let details = format!("Hard-gate triggered: {}, DQS={:.3}", dqs_result.block_reason, dqs_result.dqs);
        return Gate00Result {
            entry_allowed: false,
            block_reason: dqs_result.block_reason.clone(),
            new_drp_state: new_state,
            new_warmup_bars_remaining: transition.warmup_bars_remaining,
            new_drp_flap_count: transition.drp_flap_count,
            new_hibernate_until_ts_ms: transition.hibernate_until_ts_ms,
            dqs_result: Some(dqs_result),
            drp_transition: Some(transition),
            details,
        };
    }

    if new_state == DrpState::Emergency {
        let details = format!("EMERGENCY mode: DQS={:.3}, {}", dqs_result.dqs, transition.details);
        return Gate00Result {
            entry_allowed: false,
            block_reason: "emergency_mode".to_string(),
            new_drp_state: new_state,
            new_warmup_bars_remaining: transition.warmup_bars_remaining,
            new_drp_flap_count: transition.drp_flap_count,
            new_hibernate_until_ts_ms: transition.hibernate_until_ts_ms,
            dqs_result: Some(dqs_result),
            drp_transition: Some(transition),
            details,
        };
    }

    if new_state == DrpState::Recovery && transition.warmup_bars_remaining > 0 {
        let details = format!("Warm-up in progress: {} bars remaining", transition.warmup_bars_remaining);
        return Gate00Result {
            entry_allowed: false,
            block_reason: "warmup_in_progress".to_string(),
            new_drp_state: new_state,
            new_warmup_bars_remaining: transition.warmup_bars_remaining,
            new_drp_flap_count: transition.drp_flap_count,
            new_hibernate_until_ts_ms: transition.hibernate_until_ts_ms,
            dqs_result: Some(dqs_result),
            drp_transition: Some(transition),
            details,
        };
    }

    // 5. PASS.
    let details = format!(
        "PASS: DRP_state={:?}, DQS={:.3}, dqs_mult={:.3}",
        new_state, dqs_result.dqs, dqs_result.dqs_mult
    );
    Gate00Result {
        entry_allowed: true,
        block_reason: String::new(),
        new_drp_state: new_state,
        new_warmup_bars_remaining: transition.warmup_bars_remaining,
        new_drp_flap_count: transition.drp_flap_count,
        new_hibernate_until_ts_ms: transition.hibernate_until_ts_ms,
        dqs_result: Some(dqs_result),
        drp_transition: Some(transition),
        details,
    }
}
