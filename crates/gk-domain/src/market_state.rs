use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-source data-quality timestamps + cross-validation inputs (§4.5).
///
/// Critical sources gate the pipeline on staleness; non-critical sources
/// degrade the DQS score but never hard-gate on their own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataQualitySnapshot {
    // --- critical sources ---
    pub price_ts_ms: i64,
    pub liquidity_ts_ms: i64,
    pub orderbook_ts_ms: i64,
    pub volatility_ts_ms: i64,

    // --- non-critical sources ---
    pub funding_ts_ms: Option<i64>,
    pub oi_ts_ms: Option<i64>,
    pub basis_ts_ms: Option<i64>,
    pub derivatives_ts_ms: Option<i64>,

    // --- cross-source price validation ---
    pub price_src_a: f64,
    pub price_src_b: f64,
    pub price_oracle_c: Option<f64>,
    pub oracle_ts_ms: Option<i64>,
}

/// Immutable snapshot of per-symbol market state at a wall-clock instant
/// (§3 MarketState).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketState {
    pub symbol: String,
    pub timestamp_ms: i64,

    // --- price family ---
    pub last: f64,
    pub bid: f64,
    pub ask: f64,
    pub spread_bps: f64,

    // --- volatility ---
    pub atr: f64,
    pub atr_z_short: f64,

    // --- liquidity ---
    pub depth_bid_usd: f64,
    pub depth_ask_usd: f64,
    pub volume_24h_usd: f64,
    pub obi: f64,

    // --- derivatives ---
    pub funding_rate: f64,
    pub next_funding_ts_ms: i64,
    pub open_interest: f64,
    pub basis: f64,

    pub data_quality: DataQualitySnapshot,

    /// `symbol -> correlation in [-1, 1]`. Absent entries default to 0 (§4.17).
    pub correlations: BTreeMap<String, f64>,
}

/// Reasons `MarketState::validate` can reject a snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarketStateError {
    /// `bid <= last <= ask` does not hold.
    PriceOrdering,
    /// `spread_bps` is negative.
    NegativeSpread,
    /// `atr` is not strictly positive.
    NonPositiveAtr,
}

impl std::fmt::Display for MarketStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketStateError::PriceOrdering => {
                write!(f, "market_state_invariant: bid <= last <= ask violated")
            }
            MarketStateError::NegativeSpread => {
                write!(f, "market_state_invariant: spread_bps must be >= 0")
            }
            MarketStateError::NonPositiveAtr => {
                write!(f, "market_state_invariant: atr must be > 0")
            }
        }
    }
}

impl std::error::Error for MarketStateError {}

impl MarketState {
    /// Check the structural invariants from §3: `bid <= last <= ask`,
    /// `spread_bps >= 0`, `atr > 0`.
    pub fn validate(&self) -> Result<(), MarketStateError> {
        if !(self.bid <= self.last && self.last <= self.ask) {
            return Err(MarketStateError::PriceOrdering);
        }
        if self.spread_bps < 0.0 {
            return Err(MarketStateError::NegativeSpread);
        }
        if !(self.atr > 0.0) {
            return Err(MarketStateError::NonPositiveAtr);
        }
        Ok(())
    }

    /// Correlation of `self.symbol`'s market against `other_symbol`, or
    /// `0.0` if no entry is present (§4.17 default).
    pub fn correlation_with(&self, other_symbol: &str) -> f64 {
        self.correlations.get(other_symbol).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dq() -> DataQualitySnapshot {
        DataQualitySnapshot {
            price_ts_ms: 1_000,
            liquidity_ts_ms: 1_000,
            orderbook_ts_ms: 1_000,
            volatility_ts_ms: 1_000,
            funding_ts_ms: Some(1_000),
            oi_ts_ms: Some(1_000),
            basis_ts_ms: Some(1_000),
            derivatives_ts_ms: Some(1_000),
            price_src_a: 100.0,
            price_src_b: 100.0,
            price_oracle_c: Some(100.0),
            oracle_ts_ms: Some(1_000),
        }
    }

    fn valid_market() -> MarketState {
        MarketState {
            symbol: "BTC-USD".into(),
            timestamp_ms: 1_000,
            last: 100.0,
            bid: 99.95,
            ask: 100.05,
            spread_bps: 10.0,
            atr: 2.0,
            atr_z_short: 1.0,
            depth_bid_usd: 100_000.0,
            depth_ask_usd: 100_000.0,
            volume_24h_usd: 10_000_000.0,
            obi: 0.0,
            funding_rate: 0.0001,
            next_funding_ts_ms: 2_000,
            open_interest: 1_000_000.0,
            basis: 0.0,
            data_quality: dq(),
            correlations: BTreeMap::new(),
        }
    }

    #[test]
    fn valid_market_state_passes() {
        assert!(valid_market().validate().is_ok());
    }

    #[test]
    fn bid_greater_than_last_is_rejected() {
        let mut m = valid_market();
        m.bid = 101.0;
        assert_eq!(m.validate(), Err(MarketStateError::PriceOrdering));
    }

    #[test]
    fn negative_spread_is_rejected() {
        let mut m = valid_market();
        m.spread_bps = -1.0;
        assert_eq!(m.validate(), Err(MarketStateError::NegativeSpread));
    }

    #[test]
    fn non_positive_atr_is_rejected() {
        let mut m = valid_market();
        m.atr = 0.0;
        assert_eq!(m.validate(), Err(MarketStateError::NonPositiveAtr));
    }

    #[test]
    fn correlation_defaults_to_zero() {
        let m = valid_market();
        assert_eq!(m.correlation_with("ETH-USD"), 0.0);
    }

    #[test]
    fn correlation_lookup_present_entry() {
        let mut m = valid_market();
        m.correlations.insert("ETH-USD".into(), 0.8);
        assert_eq!(m.correlation_with("ETH-USD"), 0.8);
    }

    #[test]
    fn roundtrips_through_json() {
        let m = valid_market();
        let s = serde_json::to_string(&m).unwrap();
        let back: MarketState = serde_json::from_str(&s).unwrap();
        assert_eq!(m, back);
    }
}
