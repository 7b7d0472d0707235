//! Mathematical utilities: least squares and small descriptive statistics.

pub mod ols;
pub mod stats;

pub use ols::*;
pub use stats::*;
