//! Input data providers.
//!
//! - synthetic exponential samples for self-checks (`synthetic`)

pub mod synthetic;

pub use synthetic::*;
