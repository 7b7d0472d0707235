//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the sample store (`Samples`)
//! - model parameters and fit outputs (`ExpParams`, `FitResult`, `SearchStep`, etc.)
//! - run configuration (`FitOptions`, `FitConfig`) and the curve JSON schema

pub mod samples;
pub mod types;

pub use samples::*;
pub use types::*;
