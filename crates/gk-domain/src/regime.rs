use serde::{Deserialize, Serialize};

/// Shared regime classification vocabulary for MRC, Baseline, and the
/// final Gate 2 resolution (§3 Regime, §4.9).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeClass {
    TrendUp,
    TrendDown,
    Range,
    Noise,
    BreakoutUp,
    BreakoutDown,
    NoTrade,
    ProbeTrade,
}

/// Output of the external MRC classifier (§6 `MRCClassifier.classify`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MrcResult {
    pub class: RegimeClass,
    pub confidence: f64,
    /// Classification horizon in bars.
    pub horizon: u32,
}

/// Output of the external Baseline classifier (§6 `BaselineClassifier.classify`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BaselineResult {
    pub class: RegimeClass,
    pub confidence: f64,
}

/// Gate 2's resolved regime: the `RegimeClass` that survives the
/// MRC/Baseline conflict-resolution table, plus whether resolution hit
/// the "sustained conflict" diagnostic block.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalRegime {
    pub class: RegimeClass,
    pub confidence: f64,
}
