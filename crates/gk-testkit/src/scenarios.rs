//! End-to-end scenario builders from §8. Each returns the inputs needed to
//! drive `gk_gatekeeper::pipeline::run` (or an individual gate, for the
//! scenarios that only exercise one) plus the expected outcome, so a test
//! only has to assert.

use gk_config::AdmissionConfig;
use gk_domain::{DrpState, EmergencyCause, MarketState, PortfolioState, RegimeClass};
use gk_drp::{DrpStateMachine, DrpTransitionInput};
use gk_gatekeeper::gate2::RegimeConflictTracker;

use crate::fixtures::{base_long_signal, base_market_state, base_mle_output, base_mrc_result, base_portfolio_state};

/// §8 scenario 1 — Happy path TREND LONG: everything should PASS through
/// GATE 10, category NORMAL (risk_mult=1.0).
pub struct HappyPathTrendLong {
    pub cfg: AdmissionConfig,
    pub drp_machine: DrpStateMachine,
    pub conflict_tracker: RegimeConflictTracker,
    pub portfolio: PortfolioState,
    pub market: MarketState,
}

pub fn happy_path_trend_long() -> HappyPathTrendLong {
    HappyPathTrendLong {
        cfg: AdmissionConfig::sane_defaults(),
        drp_machine: DrpStateMachine::new(),
        conflict_tracker: RegimeConflictTracker::new(),
        portfolio: base_portfolio_state(10_000.0),
        market: base_market_state("BTC-USD", 10_000, 100.0, 2.0),
    }
}

pub fn happy_path_signal() -> gk_domain::Signal {
    base_long_signal("BTC-USD", 100.0, 102.0, 99.0, 2.0)
}

pub fn happy_path_mrc() -> gk_domain::MrcResult {
    base_mrc_result(RegimeClass::TrendUp, 0.8)
}

pub fn happy_path_baseline() -> gk_domain::BaselineResult {
    crate::fixtures::base_baseline_result(RegimeClass::TrendUp, 0.7)
}

pub fn happy_path_mle() -> gk_domain::MLEOutput {
    base_mle_output(0.55, 1.2, 1.0, 0.8)
}

/// §8 scenario 2 — Hard-gate NaN: `market.last = NaN` drives GATE 0 to
/// `hard_gate:glitch_nan` and the DRP machine into EMERGENCY with a
/// 3-bar DATA_GLITCH warm-up.
pub fn hard_gate_nan_market(now_ts_ms: i64) -> MarketState {
    let mut market = base_market_state("BTC-USD", now_ts_ms, 100.0, 2.0);
    market.last = f64::NAN;
    market
}

pub const HARD_GATE_NAN_EMERGENCY_CAUSE: EmergencyCause = EmergencyCause::DataGlitch;

/// §8 scenario 3 — Warm-up completion: portfolio starts in RECOVERY with
/// 1 bar remaining; a successful bar at DQS=0.9 should complete warm-up.
pub fn warmup_completion_portfolio() -> PortfolioState {
    let mut portfolio = base_portfolio_state(10_000.0);
    portfolio.drp_state = DrpState::Recovery;
    portfolio.warmup_bars_remaining = 1;
    portfolio
}

/// §8 scenario 4 — Anti-flap → HIBERNATE: alternating DQS 0.5 (DEFENSIVE,
/// below `defensive_dqs_threshold=0.7`) / 0.8 (NORMAL) within the flap
/// window, each bar one minute apart. With `flap_to_hibernate_threshold=3`
/// the third bar's Normal->Defensive transition should push the running
/// count to 3 and land on HIBERNATE. The caller drives the real
/// `DrpStateMachine` bar-by-bar, feeding each prior result's
/// state/warmup/flap-count back in — this only supplies the per-bar DQS
/// and timestamp.
pub fn anti_flap_dqs_sequence(base_ts_ms: i64) -> [(f64, i64); 3] {
    [(0.5, base_ts_ms), (0.8, base_ts_ms + 60_000), (0.5, base_ts_ms + 120_000)]
}

pub fn anti_flap_transition_input(
    current_state: DrpState,
    dqs: f64,
    now_ts_ms: i64,
    warmup_bars_remaining: u32,
    drp_flap_count: u32,
) -> DrpTransitionInput {
    DrpTransitionInput {
        current_state,
        dqs,
        hard_gate_triggered: false,
        warmup_bars_remaining,
        drp_flap_count,
        hibernate_until_ts_ms: None,
        now_ts_ms,
        atr_z_short: 1.0,
        emergency_cause: None,
        successful_bar_completed: false,
    }
}

/// §8 scenario 5 — MLE REJECT: negative edge regardless of confidence.
pub fn mle_reject_output() -> gk_domain::MLEOutput {
    base_mle_output(0.40, 0.8, 1.0, 0.9)
}

/// §8 scenario 6 — Funding blackout: `time_to_funding=30s` (hard=60s),
/// `funding_rate=0.001`, `hold_hours=1`.
pub fn funding_blackout_market(now_ts_ms: i64) -> MarketState {
    let mut market = base_market_state("BTC-USD", now_ts_ms, 100.0, 2.0);
    market.funding_rate = 0.001;
    market.next_funding_ts_ms = now_ts_ms + 30_000;
    market
}
