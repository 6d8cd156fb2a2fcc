//! §8 scenario 1 — Happy path TREND LONG: every gate passes, final
//! category is NORMAL (risk_mult=1.0), liquidity_mult ~= 1.0, no DRP change.

use gk_gatekeeper::gate6::MleDecisionCategory;
use gk_gatekeeper::gate8::Gate8Input;
use gk_gatekeeper::gate9::Gate9Input;
use gk_gatekeeper::gate10::Gate10Input;
use gk_gatekeeper::pipeline::{run, PipelineInputs};
use gk_testkit::scenarios::{happy_path_baseline, happy_path_mle, happy_path_mrc, happy_path_signal, happy_path_trend_long};

#[test]
fn happy_path_trend_long_passes_every_gate() {
    let mut scenario = happy_path_trend_long();
    let signal = happy_path_signal();
    let mle = happy_path_mle();
    let costs = gk_testkit::base_costs();

    let gate8_input = Gate8Input {
        price_now: 100.0,
        price_prev: 99.9,
        price_mean_recent: 99.95,
        price_stddev_recent: 0.5,
        orderbook_age_sec: 0.05,
        price_age_sec: 0.05,
    };

    let gate10_input = Gate10Input {
        symbol: "BTC-USD".to_string(),
        direction_sign: 1.0,
        asset_tag: "BTC".to_string(),
        sector_tag: "majors".to_string(),
        candidate_exposure_r: 1.0,
    };

    let inputs = PipelineInputs {
        now_ts_ms: 10_050,
        emergency_cause: None,
        successful_bar_completed: true,
        mrc: happy_path_mrc(),
        baseline: happy_path_baseline(),
        signal: &signal,
        mle: &mle,
        costs: &costs,
        unit_risk_min_atr_mult: 0.0,
        depth_side_usd: 100_000.0,
        gate8_input,
        hold_hours: 2.0,
        funding_bonus_r_used: 0.0,
        gate10_input,
    };

    let result = run(
        &scenario.cfg,
        &mut scenario.drp_machine,
        &mut scenario.conflict_tracker,
        &scenario.portfolio,
        &scenario.market,
        inputs,
    );

    assert!(result.entry_allowed, "blocked: {}", result.block_reason);
    assert_eq!(result.gate09.gate08.gate07.gate06.category, MleDecisionCategory::Normal);
    assert_eq!(result.gate09.gate08.gate07.gate06.risk_mult, 1.0);
    assert!((result.gate09.gate08.gate07.liquidity_mult - 1.0).abs() < 1e-9);
    assert_eq!(
        result.gate09.gate08.gate07.gate06.gate05.gate04.gate03.gate02.gate01.gate00.new_drp_state,
        gk_domain::DrpState::Normal
    );
}
