use serde::{Deserialize, Serialize};

/// Gate 2 — regime conflict resolution (§4.9).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate2Config {
    pub min_probe_confidence: f64,
    /// A sustained opposite-trend conflict persisting this many bars or
    /// longer triggers the `regime_conflict_sustained` diagnostic block.
    pub conflict_sustained_bars: u32,
}

impl Gate2Config {
    pub fn sane_defaults() -> Self {
        Gate2Config {
            min_probe_confidence: 0.6,
            conflict_sustained_bars: 5,
        }
    }
}

/// Gate 6 — MLE decision thresholds (§4.13).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate6Config {
    pub theta_reject: f64,
    pub theta_normal: f64,
    pub theta_strong: f64,
    pub confidence_min: f64,
    pub risk_mult_weak: f64,
    pub risk_mult_normal: f64,
    pub risk_mult_strong: f64,
}

impl Gate6Config {
    pub fn sane_defaults() -> Self {
        Gate6Config {
            theta_reject: 0.0,
            theta_normal: 0.15,
            theta_strong: 0.35,
            confidence_min: 0.4,
            risk_mult_weak: 0.5,
            risk_mult_normal: 1.0,
            risk_mult_strong: 1.5,
        }
    }
}

/// Gate 7 — liquidity hard/soft thresholds (§4.14).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate7Config {
    pub depth_hard_min_usd: f64,
    pub depth_soft_min_usd: f64,
    pub spread_hard_max_bps: f64,
    pub spread_soft_max_bps: f64,
    pub volume_hard_min_usd: f64,
    pub volume_soft_min_usd: f64,
    pub obi_hard_max: f64,
    pub obi_soft_max: f64,
}

impl Gate7Config {
    pub fn sane_defaults() -> Self {
        Gate7Config {
            depth_hard_min_usd: 5_000.0,
            depth_soft_min_usd: 25_000.0,
            spread_hard_max_bps: 50.0,
            spread_soft_max_bps: 20.0,
            volume_hard_min_usd: 100_000.0,
            volume_soft_min_usd: 1_000_000.0,
            obi_hard_max: 0.9,
            obi_soft_max: 0.6,
        }
    }
}

/// Gate 8 — gap/glitch thresholds (§4.15).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate8Config {
    pub jump_hard_frac: f64,
    pub jump_soft_frac: f64,
    pub spike_z_hard: f64,
    pub book_stale_max_sec: f64,
    pub price_fresh_max_sec: f64,
}

impl Gate8Config {
    pub fn sane_defaults() -> Self {
        Gate8Config {
            jump_hard_frac: 0.03,
            jump_soft_frac: 0.01,
            spike_z_hard: 5.0,
            book_stale_max_sec: 15.0,
            price_fresh_max_sec: 5.0,
        }
    }
}

/// Gate 9 — funding cost and proximity blackout thresholds (§4.16).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate9Config {
    pub funding_interval_hours: f64,
    pub proximity_soft_sec: f64,
    pub proximity_hard_sec: f64,
    pub proximity_mult_min: f64,
    pub proximity_power: f64,
    pub blackout_cost_r_threshold: f64,
    pub blackout_hold_hours_max: f64,
}

impl Gate9Config {
    pub fn sane_defaults() -> Self {
        Gate9Config {
            funding_interval_hours: 8.0,
            proximity_soft_sec: 900.0,
            proximity_hard_sec: 120.0,
            proximity_mult_min: 0.5,
            proximity_power: 2.0,
            blackout_cost_r_threshold: 0.1,
            blackout_hold_hours_max: 4.0,
        }
    }
}

/// Gate 10 — correlation and exposure limits (§4.17).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gate10Config {
    pub corr_hard_max: f64,
    pub corr_soft_max: f64,
    pub max_exposure_asset_r: f64,
    pub max_exposure_sector_r: f64,
    pub max_exposure_total_r: f64,
    pub max_positions: u32,
    pub max_concentration_r_frac: f64,
}

impl Gate10Config {
    pub fn sane_defaults() -> Self {
        Gate10Config {
            corr_hard_max: 0.85,
            corr_soft_max: 0.6,
            max_exposure_asset_r: 3.0,
            max_exposure_sector_r: 5.0,
            max_exposure_total_r: 10.0,
            max_positions: 12,
            max_concentration_r_frac: 0.35,
        }
    }
}
