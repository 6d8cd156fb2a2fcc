//! §8 scenario 2 — Hard-gate NaN: GATE 0 blocks with `hard_gate:glitch_nan`
//! and the DRP machine enters EMERGENCY with a 3-bar DATA_GLITCH warm-up.

use gk_config::AdmissionConfig;
use gk_domain::DrpState;
use gk_drp::DrpStateMachine;
use gk_gatekeeper::gate0::evaluate;
use gk_testkit::base_portfolio_state;
use gk_testkit::scenarios::{hard_gate_nan_market, HARD_GATE_NAN_EMERGENCY_CAUSE};

#[test]
fn nan_price_hard_gates_into_emergency_with_three_bar_warmup() {
    let cfg = AdmissionConfig::sane_defaults();
    let mut sm = DrpStateMachine::new();
    let portfolio = base_portfolio_state(10_000.0);
    let market = hard_gate_nan_market(10_000);

    let result = evaluate(&cfg, &mut sm, &portfolio, &market, 10_050, Some(HARD_GATE_NAN_EMERGENCY_CAUSE), false);

    assert!(!result.entry_allowed);
    assert_eq!(result.block_reason, "hard_gate:glitch_nan");
    assert_eq!(result.new_drp_state, DrpState::Emergency);
    assert_eq!(result.new_warmup_bars_remaining, 3);
}
