use gk_domain::{DrpState, EmergencyCause};

/// Everything `DrpStateMachine::evaluate_transition` needs for one bar
/// (§4.6). Bundled into one struct so the call site reads as a single
/// snapshot rather than a long parameter list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrpTransitionInput {
    pub current_state: DrpState,
    pub dqs: f64,
    pub hard_gate_triggered: bool,
    pub warmup_bars_remaining: u32,
    pub drp_flap_count: u32,
    pub hibernate_until_ts_ms: Option<i64>,
    pub now_ts_ms: i64,
    pub atr_z_short: f64,
    pub emergency_cause: Option<EmergencyCause>,
    pub successful_bar_completed: bool,
}

/// Result of one `evaluate_transition` call (§4.6, §12 "two reason
/// strings" supplement: `transition_reason` is a stable machine-matchable
/// tag, `details` is free-text diagnostic).
#[derive(Clone, Debug, PartialEq)]
pub struct DrpTransitionResult {
    pub new_state: DrpState,
    pub previous_state: DrpState,
    pub warmup_bars_remaining: u32,
    pub drp_flap_count: u32,
    pub hibernate_until_ts_ms: Option<i64>,
    pub transition_occurred: bool,
    pub transition_reason: String,
    pub details: String,
}
