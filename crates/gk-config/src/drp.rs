use serde::{Deserialize, Serialize};

/// Warm-up bar counts for RECOVERY, keyed by `EmergencyCause` (§4.6,
/// supplemented from the original source's `WarmupConfig`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrpWarmupConfig {
    pub data_glitch_bars: u32,
    pub liquidity_bars: u32,
    pub depeg_bars: u32,
    /// Base bar count for `OTHER`, before the recovery-hold adjustment.
    pub other_base_bars: u32,
    pub other_min_bars: u32,
    pub other_max_bars: u32,
    /// Minutes of recovery hold folded into the `OTHER` warm-up
    /// (`other_base_bars + floor(recovery_hold_minutes / 60)`, clipped to
    /// `[other_min_bars, other_max_bars]`).
    pub recovery_hold_minutes: f64,
}

impl DrpWarmupConfig {
    pub fn sane_defaults() -> Self {
        DrpWarmupConfig {
            data_glitch_bars: 3,
            liquidity_bars: 6,
            depeg_bars: 24,
            other_base_bars: 3,
            other_min_bars: 2,
            other_max_bars: 48,
            recovery_hold_minutes: 60.0,
        }
    }
}

/// Anti-flapping thresholds (§4.6, supplemented from the original source's
/// `AntiFlappingConfig`).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrpAntiFlapConfig {
    pub flap_window_minutes_base: f64,
    pub flap_window_minutes_min: f64,
    pub flap_window_minutes_max: f64,
    /// Strict-state transitions within the effective flap window, at or
    /// above this count, force HIBERNATE.
    pub flap_to_hibernate_threshold: u32,
    pub hibernate_min_duration_sec: f64,
}

impl DrpAntiFlapConfig {
    pub fn sane_defaults() -> Self {
        DrpAntiFlapConfig {
            flap_window_minutes_base: 60.0,
            flap_window_minutes_min: 10.0,
            flap_window_minutes_max: 240.0,
            flap_to_hibernate_threshold: 5,
            hibernate_min_duration_sec: 3600.0,
        }
    }
}

/// Full DRP configuration (§4.6).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrpConfig {
    /// `dqs < emergency_dqs_threshold` (or a hard gate) forces EMERGENCY.
    pub emergency_dqs_threshold: f64,
    /// `dqs < defensive_dqs_threshold` forces DEFENSIVE.
    pub defensive_dqs_threshold: f64,
    pub warmup: DrpWarmupConfig,
    pub anti_flap: DrpAntiFlapConfig,
}

impl DrpConfig {
    pub fn sane_defaults() -> Self {
        DrpConfig {
            emergency_dqs_threshold: 0.3,
            defensive_dqs_threshold: 0.7,
            warmup: DrpWarmupConfig::sane_defaults(),
            anti_flap: DrpAntiFlapConfig::sane_defaults(),
        }
    }
}
