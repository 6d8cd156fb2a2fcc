//! gk-domain
//!
//! The admission core's value objects: `MarketState`, `PortfolioState`,
//! `Position`, `Signal`, `MLEOutput`, regime classifications, and the DRP
//! vocabulary they all share. Every type here is immutable once
//! constructed; mutation happens by producing a new value, never in place.

mod drp_types;
mod market_state;
mod mle;
mod portfolio;
mod position;
mod regime;
mod signal;

pub use drp_types::{DrpState, DrpTransitionEvent, EmergencyCause, TradingMode};
pub use market_state::{DataQualitySnapshot, MarketState, MarketStateError};
pub use mle::{MLEOutput, MLEOutputError};
pub use portfolio::{PortfolioState, PortfolioStateError, EQUITY_MIN_FOR_PCT_CALC};
pub use position::{Direction, Position, PositionError};
pub use regime::{BaselineResult, FinalRegime, MrcResult, RegimeClass};
pub use signal::{EngineType, Signal, SignalError};
