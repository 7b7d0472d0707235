//! Exponential fitting.
//!
//! Responsibilities:
//!
//! - seed `(a, b, c)` from finite differences (`estimate`)
//! - solve `(a, b)` in closed form for a fixed offset and score it (`regress`)
//! - refine the offset by a guarded decaying-step search (`search`)
//! - tie the stages together into one fit (`fitter`)

pub mod estimate;
pub mod fitter;
pub mod regress;
pub mod search;

pub use estimate::*;
pub use fitter::*;
pub use regress::*;
pub use search::*;
