//! The DRP state machine itself (§4.6). Each instance owns one symbol's
//! transition history — never shared across symbols (§5).

use std::collections::VecDeque;

use gk_config::DrpConfig;
use gk_domain::{DrpState, DrpTransitionEvent, EmergencyCause};

use crate::types::{DrpTransitionInput, DrpTransitionResult};

/// Safety cap on the history ring buffer, independent of time-based
/// pruning (§9 "a ring buffer sized to max(expected transitions in
/// flap_window_max) is sufficient" — at one strict transition per bar and
/// a generous bar rate, this comfortably covers `flap_window_minutes_max`).
const MAX_HISTORY_LEN: usize = 512;

const STRICT_STATES: [DrpState; 3] = [DrpState::Emergency, DrpState::Recovery, DrpState::Defensive];

fn is_strict(state: DrpState) -> bool {
    STRICT_STATES.contains(&state)
}

/// Owns the DRP transition-history ring buffer for one symbol and
/// evaluates state transitions bar-by-bar (§4.6).
#[derive(Clone, Debug, Default)]
pub struct DrpStateMachine {
    history: VecDeque<DrpTransitionEvent>,
}

impl DrpStateMachine {
    pub fn new() -> Self {
        DrpStateMachine {
            history: VecDeque::new(),
        }
    }

    /// Read-only view of the currently retained transition history.
    pub fn history(&self) -> &VecDeque<DrpTransitionEvent> {
        &self.history
    }

    /// Evaluate one bar's DRP transition (§4.6).
    pub fn evaluate_transition(&mut self, cfg: &DrpConfig, input: DrpTransitionInput) -> DrpTransitionResult {
        if input.current_state == DrpState::Hibernate {
            return self.evaluate_hibernate(cfg, input);
        }

        let target_state = determine_target_state(input.dqs, input.hard_gate_triggered, cfg);

        if input.current_state == DrpState::Recovery {
            return self.evaluate_recovery(cfg, input, target_state);
        }

        if input.current_state == DrpState::Emergency && target_state != DrpState::Emergency {
            let warmup_bars = calculate_warmup_bars(input.emergency_cause.unwrap_or(EmergencyCause::Other), cfg);
            let new_flap = self.update_flap_count(cfg, input.current_state, DrpState::Recovery, input, input.drp_flap_count);
            if new_flap >= cfg.anti_flap.flap_to_hibernate_threshold {
                return self.transition_to_hibernate(cfg, input, new_flap);
            }
            return DrpTransitionResult {
                new_state: DrpState::Recovery,
                previous_state: input.current_state,
                warmup_bars_remaining: warmup_bars,
                drp_flap_count: new_flap,
                hibernate_until_ts_ms: None,
                transition_occurred: true,
                transition_reason: "emergency_to_recovery".to_string(),
                details: format!("Emergency cleared, starting warmup: {warmup_bars} bars"),
            };
        }

        if target_state == DrpState::Emergency && input.current_state != DrpState::Emergency {
            let warmup_bars = calculate_warmup_bars(input.emergency_cause.unwrap_or(EmergencyCause::Other), cfg);
            let new_flap = self.update_flap_count(cfg, input.current_state, DrpState::Emergency, input, input.drp_flap_count);
            if new_flap >= cfg.anti_flap.flap_to_hibernate_threshold {
                return self.transition_to_hibernate(cfg, input, new_flap);
            }
            return DrpTransitionResult {
                new_state: DrpState::Emergency,
                previous_state: input.current_state,
                warmup_bars_remaining: warmup_bars,
                drp_flap_count: new_flap,
                hibernate_until_ts_ms: None,
                transition_occurred: true,
                transition_reason: "to_emergency".to_string(),
                details: format!(
                    "Transition to EMERGENCY, cause={:?}, warmup_bars={warmup_bars}",
                    input.emergency_cause
                ),
            };
        }

        if target_state != input.current_state
            && matches!(target_state, DrpState::Normal | DrpState::Defensive)
        {
            let new_flap = self.update_flap_count(cfg, input.current_state, target_state, input, input.drp_flap_count);
            if new_flap >= cfg.anti_flap.flap_to_hibernate_threshold {
                return self.transition_to_hibernate(cfg, input, new_flap);
            }
            return DrpTransitionResult {
                new_state: target_state,
                previous_state: input.current_state,
                warmup_bars_remaining: 0,
                drp_flap_count: new_flap,
                hibernate_until_ts_ms: None,
                transition_occurred: true,
                transition_reason: format!(
                    "dqs_based_transition_{}_to_{}",
                    state_tag(input.current_state),
                    state_tag(target_state)
                ),
                details: format!(
                    "DQS-based transition: {:?} -> {:?}, DQS={:.3}",
                    input.current_state, target_state, input.dqs
                ),
            };
        }

        DrpTransitionResult {
            new_state: input.current_state,
            previous_state: input.current_state,
            warmup_bars_remaining: input.warmup_bars_remaining,
            drp_flap_count: input.drp_flap_count,
            hibernate_until_ts_ms: None,
            transition_occurred: false,
            transition_reason: "no_transition".to_string(),
            details: format!(
                "State={:?}, DQS={:.3}, hard_gate={}",
                input.current_state, input.dqs, input.hard_gate_triggered
            ),
        }
    }

    fn evaluate_hibernate(&mut self, cfg: &DrpConfig, input: DrpTransitionInput) -> DrpTransitionResult {
        let _ = cfg;
        match input.hibernate_until_ts_ms {
            Some(until) if input.now_ts_ms >= until => DrpTransitionResult {
                new_state: DrpState::Normal,
                previous_state: input.current_state,
                warmup_bars_remaining: 0,
                drp_flap_count: 0,
                hibernate_until_ts_ms: None,
                transition_occurred: true,
                transition_reason: "hibernate_timeout_unlock".to_string(),
                details: "HIBERNATE unlock: hold duration elapsed".to_string(),
            },
            _ => {
                let remaining_sec = input
                    .hibernate_until_ts_ms
                    .map(|until| (until - input.now_ts_ms) as f64 / 1000.0)
                    .unwrap_or(0.0);
                DrpTransitionResult {
                    new_state: input.current_state,
                    previous_state: input.current_state,
                    warmup_bars_remaining: input.warmup_bars_remaining,
                    drp_flap_count: input.drp_flap_count,
                    hibernate_until_ts_ms: input.hibernate_until_ts_ms,
                    transition_occurred: false,
                    transition_reason: "in_hibernate".to_string(),
                    details: format!("Remaining: {remaining_sec:.1}s"),
                }
            }
        }
    }

    fn evaluate_recovery(
        &mut self,
        cfg: &DrpConfig,
        input: DrpTransitionInput,
        target_state: DrpState,
    ) -> DrpTransitionResult {
        let new_warmup = if input.successful_bar_completed && input.warmup_bars_remaining > 0 {
            input.warmup_bars_remaining - 1
        } else {
            input.warmup_bars_remaining
        };

        if new_warmup == 0 && target_state == DrpState::Normal {
            let new_flap = self.update_flap_count(cfg, input.current_state, DrpState::Normal, input, input.drp_flap_count);
            if new_flap >= cfg.anti_flap.flap_to_hibernate_threshold {
                return self.transition_to_hibernate(cfg, input, new_flap);
            }
            return DrpTransitionResult {
                new_state: DrpState::Normal,
                previous_state: input.current_state,
                warmup_bars_remaining: 0,
                drp_flap_count: new_flap,
                hibernate_until_ts_ms: None,
                transition_occurred: true,
                transition_reason: "warmup_completed".to_string(),
                details: "Warmup completed, transition RECOVERY -> NORMAL".to_string(),
            };
        }

        if input.hard_gate_triggered || target_state == DrpState::Emergency {
            let warmup_bars = calculate_warmup_bars(input.emergency_cause.unwrap_or(EmergencyCause::Other), cfg);
            let new_flap = self.update_flap_count(cfg, input.current_state, DrpState::Emergency, input, input.drp_flap_count);
            if new_flap >= cfg.anti_flap.flap_to_hibernate_threshold {
                return self.transition_to_hibernate(cfg, input, new_flap);
            }
            return DrpTransitionResult {
                new_state: DrpState::Emergency,
                previous_state: input.current_state,
                warmup_bars_remaining: warmup_bars,
                drp_flap_count: new_flap,
                hibernate_until_ts_ms: None,
                transition_occurred: true,
                transition_reason: "new_emergency_during_recovery".to_string(),
                details: format!("New emergency during RECOVERY, warmup_bars={warmup_bars}"),
            };
        }

        DrpTransitionResult {
            new_state: input.current_state,
            previous_state: input.current_state,
            warmup_bars_remaining: new_warmup,
            drp_flap_count: input.drp_flap_count,
            hibernate_until_ts_ms: None,
            transition_occurred: false,
            transition_reason: "in_warmup".to_string(),
            details: format!("Warmup in progress, remaining={new_warmup} bars"),
        }
    }

    fn transition_to_hibernate(
        &mut self,
        cfg: &DrpConfig,
        input: DrpTransitionInput,
        flap_count: u32,
    ) -> DrpTransitionResult {
        let hibernate_until = input.now_ts_ms + (cfg.anti_flap.hibernate_min_duration_sec * 1000.0) as i64;
        DrpTransitionResult {
            new_state: DrpState::Hibernate,
            previous_state: input.current_state,
            warmup_bars_remaining: 0,
            drp_flap_count: flap_count,
            hibernate_until_ts_ms: Some(hibernate_until),
            transition_occurred: true,
            transition_reason: "anti_flapping_hibernate".to_string(),
            details: format!("Excessive flapping detected: {flap_count} transitions, HIBERNATE until {hibernate_until}"),
        }
    }

    /// §4.6: count strict-state transitions within the ATR-adaptive flap
    /// window, pruning the history buffer in place.
    fn update_flap_count(
        &mut self,
        cfg: &DrpConfig,
        from_state: DrpState,
        to_state: DrpState,
        input: DrpTransitionInput,
        current_flap_count: u32,
    ) -> u32 {
        if from_state == to_state {
            return current_flap_count;
        }
        if !is_strict(from_state) && !is_strict(to_state) {
            return current_flap_count;
        }

        let flap_window_minutes_eff = (cfg.anti_flap.flap_window_minutes_base / input.atr_z_short.max(1.0))
            .clamp(cfg.anti_flap.flap_window_minutes_min, cfg.anti_flap.flap_window_minutes_max);

        self.history.push_back(DrpTransitionEvent {
            ts_ms: input.now_ts_ms,
            from_state,
            to_state,
        });
        if self.history.len() > MAX_HISTORY_LEN {
            self.history.pop_front();
        }

        let cutoff_ms = input.now_ts_ms - (flap_window_minutes_eff * 60_000.0) as i64;
        self.history.retain(|e| e.ts_ms >= cutoff_ms);

        self.history.len() as u32
    }
}

fn determine_target_state(dqs: f64, hard_gate_triggered: bool, cfg: &DrpConfig) -> DrpState {
    if hard_gate_triggered {
        return DrpState::Emergency;
    }
    if dqs < cfg.emergency_dqs_threshold {
        DrpState::Emergency
    } else if dqs < cfg.defensive_dqs_threshold {
        DrpState::Defensive
    } else {
        DrpState::Normal
    }
}

fn calculate_warmup_bars(cause: EmergencyCause, cfg: &DrpConfig) -> u32 {
    match cause {
        EmergencyCause::DataGlitch => cfg.warmup.data_glitch_bars,
        EmergencyCause::Liquidity => cfg.warmup.liquidity_bars,
        EmergencyCause::Depeg => cfg.warmup.depeg_bars,
        EmergencyCause::Other => {
            let bars = cfg.warmup.other_base_bars + (cfg.warmup.recovery_hold_minutes / 60.0).floor() as u32;
            bars.clamp(cfg.warmup.other_min_bars, cfg.warmup.other_max_bars)
        }
    }
}

fn state_tag(state: DrpState) -> &'static str {
    match state {
        DrpState::Normal => "normal",
        DrpState::Degraded => "degraded",
        DrpState::Defensive => "defensive",
        DrpState::Emergency => "emergency",
        DrpState::Recovery => "recovery",
        DrpState::Hibernate => "hibernate",
    }
}
