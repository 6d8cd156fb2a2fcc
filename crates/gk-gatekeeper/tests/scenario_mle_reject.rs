//! §8 scenario 5 — MLE REJECT: p_success=0.40, mu_s=0.8R, mu_f=1.0R gives
//! EV_R=-0.28, well below theta_reject. GATE 6 blocks with risk_mult=0.

use gk_config::Gate6Config;
use gk_gatekeeper::gate6::{evaluate, MleDecisionCategory};
use gk_testkit::scenarios::mle_reject_output;

mod common;
use common::passing_gate05;

#[test]
fn negative_edge_rejects_with_zero_risk_mult() {
    let cfg = Gate6Config::sane_defaults();
    let mle = mle_reject_output();

    let result = evaluate(&cfg, passing_gate05(), &mle);

    assert!(!result.entry_allowed);
    assert_eq!(result.block_reason, "net_edge_below_reject");
    assert_eq!(result.category, MleDecisionCategory::Reject);
    assert_eq!(result.risk_mult, 0.0);
    assert!((result.ev_r_price - (-0.28)).abs() < 1e-9);
}
