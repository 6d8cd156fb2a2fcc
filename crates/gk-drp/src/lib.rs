//! gk-drp
//!
//! Disaster Recovery Protocol state machine (§4.6): tracks one symbol's
//! DRP state across bars, deciding EMERGENCY/DEFENSIVE/RECOVERY/HIBERNATE
//! transitions from the DQS evaluator's output plus an ATR-adaptive
//! anti-flapping window. Pure over its inputs; `now_ts_ms` is always
//! supplied by the caller, never read from the wall clock.

mod machine;
mod types;

pub use gk_domain::{DrpState, DrpTransitionEvent, EmergencyCause};
pub use machine::DrpStateMachine;
pub use types::{DrpTransitionInput, DrpTransitionResult};
