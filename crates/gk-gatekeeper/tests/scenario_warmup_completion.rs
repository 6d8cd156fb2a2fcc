//! §8 scenario 3 — Warm-up completion: RECOVERY with 1 bar remaining, a
//! successful bar at high DQS completes warm-up back to NORMAL.

use gk_config::AdmissionConfig;
use gk_domain::DrpState;
use gk_drp::DrpStateMachine;
use gk_gatekeeper::gate0::evaluate;
use gk_testkit::base_market_state;
use gk_testkit::scenarios::warmup_completion_portfolio;

#[test]
fn successful_bar_completes_warmup_back_to_normal() {
    let cfg = AdmissionConfig::sane_defaults();
    let mut sm = DrpStateMachine::new();
    let portfolio = warmup_completion_portfolio();
    let market = base_market_state("BTC-USD", 10_000, 100.0, 2.0);

    let result = evaluate(&cfg, &mut sm, &portfolio, &market, 10_050, None, true);

    assert!(result.entry_allowed);
    assert_eq!(result.new_drp_state, DrpState::Normal);
    assert_eq!(result.new_warmup_bars_remaining, 0);
}
