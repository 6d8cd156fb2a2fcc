//! The eleven-stage Gatekeeper pipeline (§4.7-§4.17). Each `GateNResult`
//! embeds the previous gate's result; `pipeline::run` is a convenience
//! wrapper that threads one candidate trade through all eleven gates in
//! order and returns the final `Gate10Result`.

pub mod gate0;
pub mod gate1;
pub mod gate2;
pub mod gate3;
pub mod gate4;
pub mod gate5;
pub mod gate6;
pub mod gate7;
pub mod gate8;
pub mod gate9;
pub mod gate10;
pub mod pipeline;

pub use gate0::Gate00Result;
pub use gate1::Gate01Result;
pub use gate2::{Gate02Result, RegimeConflictTracker};
pub use gate3::Gate03Result;
pub use gate4::Gate04Result;
pub use gate5::Gate05Result;
pub use gate6::{Gate06Result, MleDecisionCategory};
pub use gate7::Gate07Result;
pub use gate8::{DrpTrigger, Gate08Result, Gate8Input};
pub use gate9::{Gate09Result, Gate9Input};
pub use gate10::{Gate10Input, Gate10Result};
pub use pipeline::{run, PipelineInputs};
