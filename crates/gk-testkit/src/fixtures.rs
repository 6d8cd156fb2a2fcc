//! Hand-built base values for the gate pipeline's inputs. Every
//! `base_*` function returns a fresh, independently-valid value; tests
//! mutate the specific field they care about rather than relying on
//! shared global state.

use std::collections::BTreeMap;

use gk_domain::{
    BaselineResult, DataQualitySnapshot, Direction, EngineType, MLEOutput, MarketState, MrcResult, PortfolioState,
    RegimeClass, Signal, TradingMode,
};
use gk_drp::DrpState;
use gk_riskmath::CostInputsBps;

/// A fully-fresh `DataQualitySnapshot` at `now_ts_ms` (zero staleness,
/// agreeing cross-source prices).
pub fn base_data_quality(now_ts_ms: i64, price: f64) -> DataQualitySnapshot {
    DataQualitySnapshot {
        price_ts_ms: now_ts_ms,
        liquidity_ts_ms: now_ts_ms,
        orderbook_ts_ms: now_ts_ms,
        volatility_ts_ms: now_ts_ms,
        funding_ts_ms: Some(now_ts_ms),
        oi_ts_ms: Some(now_ts_ms),
        basis_ts_ms: Some(now_ts_ms),
        derivatives_ts_ms: Some(now_ts_ms),
        price_src_a: price,
        price_src_b: price,
        price_oracle_c: Some(price),
        oracle_ts_ms: Some(now_ts_ms),
    }
}

/// A calm, fully-liquid `MarketState` for `symbol` at `price` (§8 scenario 1
/// base: ATR=2, spread=10bps, fresh data).
pub fn base_market_state(symbol: &str, now_ts_ms: i64, price: f64, atr: f64) -> MarketState {
    let half_spread = price * 0.0005;
    MarketState {
        symbol: symbol.to_string(),
        timestamp_ms: now_ts_ms,
        last: price,
        bid: price - half_spread,
        ask: price + half_spread,
        spread_bps: 10.0,
        atr,
        atr_z_short: 1.0,
        depth_bid_usd: 100_000.0,
        depth_ask_usd: 100_000.0,
        volume_24h_usd: 10_000_000.0,
        obi: 0.0,
        funding_rate: 0.0001,
        next_funding_ts_ms: now_ts_ms + 3_600_000,
        open_interest: 1_000_000.0,
        basis: 0.0,
        data_quality: base_data_quality(now_ts_ms, price),
        correlations: BTreeMap::new(),
    }
}

/// A fresh portfolio with no open positions, NORMAL/LIVE, at `equity_usd`.
pub fn base_portfolio_state(equity_usd: f64) -> PortfolioState {
    PortfolioState {
        equity_usd,
        positions: Vec::new(),
        drp_state: DrpState::Normal,
        trading_mode: TradingMode::Live,
        manual_halt_all_trading: false,
        manual_halt_new_entries: false,
        warmup_bars_remaining: 0,
        drp_flap_count: 0,
        hibernate_until_ts_ms: 0,
    }
}

/// A valid TREND-engine LONG signal (§8 scenario 1: entry=100, TP=102, SL=99, raw_rr=2.0).
pub fn base_long_signal(symbol: &str, entry_price: f64, tp_price: f64, sl_price: f64, atr: f64) -> Signal {
    Signal {
        engine: EngineType::Trend,
        symbol: symbol.to_string(),
        direction: Direction::Long,
        entry_price,
        tp_price,
        sl_price,
        raw_rr: (tp_price - entry_price).abs() / (entry_price - sl_price).abs(),
        atr,
        depth_hint_usd: 100_000.0,
        min_rr: 1.5,
        min_sl_atr_mult: 0.1,
        max_sl_atr_mult: 5.0,
    }
}

/// `MrcResult` at `class`/`confidence` with a 20-bar horizon.
pub fn base_mrc_result(class: RegimeClass, confidence: f64) -> MrcResult {
    MrcResult { class, confidence, horizon: 20 }
}

/// `BaselineResult` at `class`/`confidence`.
pub fn base_baseline_result(class: RegimeClass, confidence: f64) -> BaselineResult {
    BaselineResult { class, confidence }
}

/// An `MLEOutput` from the raw decision-table inputs (§4.13).
pub fn base_mle_output(p_success: f64, mu_success_r: f64, mu_fail_r: f64, confidence: f64) -> MLEOutput {
    MLEOutput { p_success, mu_success_r, mu_fail_r, confidence, expected_cost_bps_post: 1.0 }
}

/// Zero-cost `CostInputsBps`, for tests that want to isolate a single
/// effect from the entry/exit cost stack.
pub fn zero_costs() -> CostInputsBps {
    CostInputsBps::zero()
}

/// A representative non-zero cost stack (10bps spread/fees, light slippage/impact).
pub fn base_costs() -> CostInputsBps {
    CostInputsBps {
        spread_bps: 10.0,
        fee_entry_bps: 10.0,
        fee_exit_bps: 10.0,
        slippage_entry_bps: 5.0,
        slippage_tp_bps: 5.0,
        slippage_stop_bps: 10.0,
        impact_entry_bps: 2.0,
        impact_exit_bps: 2.0,
        impact_stop_bps: 3.0,
        stop_slippage_mult: 1.0,
    }
}
