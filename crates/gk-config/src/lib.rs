//! gk-config
//!
//! The single canonical configuration tree for the gate/DQS/DRP layer of
//! the admission core (`AdmissionConfig`). The Open Questions in the
//! specification call out thresholds that the source duplicated across
//! modules with differing defaults (`corr_hard_max`,
//! `flap_to_hibernate_threshold`, and similar gate/DRP tunables) and ask
//! for exactly one authoritative place; this is that place.
//!
//! It deliberately does NOT re-host the epsilon/threshold constants that
//! `gk-riskmath` already owns as module-level constants
//! (`RISK_AMOUNT_MIN_ABSOLUTE_USD`, `ABS_MIN_UNIT_RISK_USD`,
//! `COMPOUNDING_R_FLOOR_EPS`, ...) — those were never duplicated
//! elsewhere, so centralizing them here would introduce the very
//! duplication this crate exists to forbid.
//!
//! This crate derives `Serialize`/`Deserialize` so a host can snapshot or
//! hydrate an `AdmissionConfig`, but it never reads a file, environment
//! variable, or CLI flag itself — that wiring belongs to the host.

mod drp;
mod dqs;
mod gates;

pub use drp::{DrpAntiFlapConfig, DrpConfig, DrpWarmupConfig};
pub use dqs::{DqsConfig, StalenessBounds};
pub use gates::{Gate10Config, Gate2Config, Gate6Config, Gate7Config, Gate8Config, Gate9Config};

use serde::{Deserialize, Serialize};

/// The gate/DQS/DRP configuration tree.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdmissionConfig {
    pub dqs: DqsConfig,
    pub drp: DrpConfig,
    pub gate2: Gate2Config,
    pub gate6: Gate6Config,
    pub gate7: Gate7Config,
    pub gate8: Gate8Config,
    pub gate9: Gate9Config,
    pub gate10: Gate10Config,
}

impl AdmissionConfig {
    /// Defaults for every threshold in the gate pipeline. Values named
    /// explicitly in the specification (`xdev_hard_threshold = 0.02`, DRP
    /// warm-up bar counts, DQS transition thresholds 0.3/0.7) use that
    /// exact value; values the specification leaves to implementation
    /// discretion use a round, conservative default.
    pub fn sane_defaults() -> Self {
        AdmissionConfig {
            dqs: DqsConfig::sane_defaults(),
            drp: DrpConfig::sane_defaults(),
            gate2: Gate2Config::sane_defaults(),
            gate6: Gate6Config::sane_defaults(),
            gate7: Gate7Config::sane_defaults(),
            gate8: Gate8Config::sane_defaults(),
            gate9: Gate9Config::sane_defaults(),
            gate10: Gate10Config::sane_defaults(),
        }
    }
}
