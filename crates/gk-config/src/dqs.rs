use serde::{Deserialize, Serialize};

/// Soft/hard staleness bounds, in seconds, for one data source.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StalenessBounds {
    /// `age <= soft_sec` is fresh.
    pub soft_sec: f64,
    /// `soft_sec < age <= hard_sec` is degraded; `age > hard_sec` hard-gates
    /// (critical sources only).
    pub hard_sec: f64,
}

/// Per-source staleness bounds and weights for §4.5's DQS score (§3
/// "data-quality timestamps per-source").
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DqsConfig {
    pub price: StalenessBounds,
    pub liquidity: StalenessBounds,
    pub orderbook: StalenessBounds,
    pub volatility: StalenessBounds,
    pub funding: StalenessBounds,
    pub open_interest: StalenessBounds,
    pub basis: StalenessBounds,
    pub derivatives: StalenessBounds,
    pub oracle: StalenessBounds,

    pub weight_price: f64,
    pub weight_liquidity: f64,
    pub weight_orderbook: f64,
    pub weight_volatility: f64,
    pub weight_funding: f64,
    pub weight_open_interest: f64,
    pub weight_basis: f64,
    pub weight_derivatives: f64,

    /// Cross-validation deviation threshold `xdev = |A-B| / max(A,B,eps)`;
    /// at or above this, hard-gate.
    pub xdev_hard_threshold: f64,

    /// `dqs >= dqs_mult_full_at` maps to `dqs_mult = 1.0`.
    pub dqs_mult_full_at: f64,
    /// `dqs_mult` decays linearly from 1.0 down to `dqs_mult_floor` between
    /// `dqs_mult_full_at` and `dqs_mult_floor_at`; below `dqs_mult_floor_at`
    /// it is 0.
    pub dqs_mult_floor_at: f64,
    pub dqs_mult_floor: f64,
}

impl DqsConfig {
    pub fn sane_defaults() -> Self {
        let critical = StalenessBounds { soft_sec: 5.0, hard_sec: 30.0 };
        let non_critical = StalenessBounds { soft_sec: 60.0, hard_sec: 600.0 };
        DqsConfig {
            price: critical,
            liquidity: critical,
            orderbook: critical,
            volatility: critical,
            funding: non_critical,
            open_interest: non_critical,
            basis: non_critical,
            derivatives: non_critical,
            oracle: StalenessBounds { soft_sec: 10.0, hard_sec: 60.0 },

            weight_price: 0.30,
            weight_liquidity: 0.20,
            weight_orderbook: 0.20,
            weight_volatility: 0.15,
            weight_funding: 0.05,
            weight_open_interest: 0.05,
            weight_basis: 0.025,
            weight_derivatives: 0.025,

            xdev_hard_threshold: 0.02,

            dqs_mult_full_at: 0.8,
            dqs_mult_floor_at: 0.3,
            dqs_mult_floor: 0.3,
        }
    }
}
