use serde::{Deserialize, Serialize};

/// Disaster Recovery Protocol state (§4.6). `Degraded` is reserved and no
/// transition in `gk-drp` ever produces it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrpState {
    Normal,
    Degraded,
    Defensive,
    Emergency,
    Recovery,
    Hibernate,
}

/// What mode the host is driving the portfolio in (§3 PortfolioState).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradingMode {
    Live,
    Shadow,
    Paper,
    Backtest,
}

/// Why the DRP machine entered EMERGENCY, used to pick a warm-up bar
/// count (§4.6, §12).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmergencyCause {
    DataGlitch,
    Liquidity,
    Depeg,
    Other,
}

/// One entry in the DRP transition-history ring buffer (§3 "DRP
/// transition history").
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrpTransitionEvent {
    pub ts_ms: i64,
    pub from_state: DrpState,
    pub to_state: DrpState,
}
