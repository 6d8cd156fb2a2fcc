//! Convenience runner that threads one candidate trade through GATE 0
//! through GATE 10 in order (§4.7-§4.17, §5 "gates 0→10 execute in
//! order"). Not required reading for any individual gate — each gate
//! module is independently usable — but this is the shape the host
//! actually drives per bar, per symbol.

use gk_config::AdmissionConfig;
use gk_domain::{BaselineResult, EmergencyCause, MarketState, MrcResult, PortfolioState, Signal};
use gk_domain::MLEOutput;
use gk_drp::DrpStateMachine;
use gk_riskmath::CostInputsBps;

use crate::gate10::{self, Gate10Input, Gate10Result};
use crate::gate2::RegimeConflictTracker;
use crate::gate8::Gate8Input;
use crate::gate9::Gate9Input;
use crate::{gate0, gate1, gate2, gate3, gate4, gate5, gate6, gate7, gate8, gate9};

/// Everything `run` needs beyond the durable per-symbol state
/// (`DrpStateMachine`, `RegimeConflictTracker`) and the `PortfolioState` /
/// `MarketState` pair already threaded through GATE 0.
pub struct PipelineInputs<'a> {
    pub now_ts_ms: i64,
    pub emergency_cause: Option<EmergencyCause>,
    pub successful_bar_completed: bool,
    pub mrc: MrcResult,
    pub baseline: BaselineResult,
    pub signal: &'a Signal,
    pub mle: &'a MLEOutput,
    pub costs: &'a CostInputsBps,
    pub unit_risk_min_atr_mult: f64,
    pub depth_side_usd: f64,
    pub gate8_input: Gate8Input,
    pub hold_hours: f64,
    pub funding_bonus_r_used: f64,
    pub gate10_input: Gate10Input,
}

/// Drive GATE 0 through GATE 10 for one candidate trade on one symbol/bar.
#[allow(clippy::too_many_arguments)]
pub fn run(
    cfg: &AdmissionConfig,
    drp_machine: &mut DrpStateMachine,
    conflict_tracker: &mut RegimeConflictTracker,
    portfolio: &PortfolioState,
    market: &MarketState,
    inputs: PipelineInputs,
) -> Gate10Result {
    let gate00 = gate0::evaluate(
        cfg,
        drp_machine,
        portfolio,
        market,
        inputs.now_ts_ms,
        inputs.emergency_cause,
        inputs.successful_bar_completed,
    );

    let gate01 = gate1::evaluate(
        gate00,
        portfolio.trading_mode,
        portfolio.manual_halt_new_entries,
        portfolio.manual_halt_all_trading,
    );

    let gate02 = gate2::evaluate(&cfg.gate2, conflict_tracker, gate01, inputs.mrc, inputs.baseline);

    let gate03 = gate3::evaluate(gate02, inputs.signal.engine);

    let gate04 = gate4::evaluate(gate03, inputs.signal);

    let gate05 = gate5::evaluate(
        gate04,
        inputs.signal.direction,
        inputs.signal.entry_price,
        inputs.signal.tp_price,
        inputs.signal.sl_price,
        inputs.costs,
        Some(inputs.signal.atr),
        inputs.unit_risk_min_atr_mult,
    );

    let gate06 = gate6::evaluate(&cfg.gate6, gate05, inputs.mle);

    let gate07 = gate7::evaluate(&cfg.gate7, gate06, market, inputs.depth_side_usd);

    let gate08 = gate8::evaluate(&cfg.gate8, gate07, inputs.gate8_input);

    let gate09_input = Gate9Input {
        direction: inputs.signal.direction,
        entry_price: inputs.signal.entry_price,
        unit_risk_allin_net: gate08.gate07.gate06.gate05.unit_risk_allin_net,
        hold_hours: inputs.hold_hours,
        ev_r_price_net: gate08.gate07.gate06.net_edge,
        funding_bonus_r_used: inputs.funding_bonus_r_used,
        now_ts_ms: inputs.now_ts_ms,
    };
    let gate09 = gate9::evaluate(&cfg.gate9, gate08, market, gate09_input);

    gate10::evaluate(&cfg.gate10, gate09, portfolio, market, inputs.gate10_input)
}
