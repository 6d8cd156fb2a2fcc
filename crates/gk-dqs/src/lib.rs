//! gk-dqs
//!
//! Data Quality Score evaluator (§4.5): staleness, cross-validation, and
//! glitch sanity feed a single weighted `dqs` score plus a `dqs_mult`
//! downstream risk-attenuation factor. Pure over its inputs; never reads
//! the wall clock (`now_ts_ms` is always supplied by the caller).

mod cross_validation;
mod evaluator;
mod glitch;
mod staleness;
mod types;

pub use cross_validation::xdev;
pub use evaluator::{compute_dqs_mult, evaluate_dqs};
pub use glitch::any_glitch;
pub use staleness::{score_critical, score_optional};
pub use types::{DqsComponents, DqsResult, SourceScore};
