//! Exponential-plus-offset model evaluation.
//!
//! Kept as small, pure functions so fitting, reporting and plotting share one
//! definition of the curve.

pub mod model;

pub use model::*;
