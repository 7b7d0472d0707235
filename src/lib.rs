//! `exp-fit` library crate.
//!
//! Fits `y = a·e^(b·x) + c` to sampled data: a finite-difference seed, a
//! guarded decaying-step search for the offset `c`, and a closed-form
//! log-linear regression for `(a, b)` at each candidate offset.
//!
//! The binary (`expfit`) is a thin wrapper around this library so that
//! core logic is testable without spawning processes.
//!
//! ```
//! use exp_fit::fit::fit_y;
//!
//! let fit = fit_y(&[1.0, std::f64::consts::E, std::f64::consts::E.powi(2)]).unwrap();
//! assert!((fit.params.b - 1.0).abs() < 1e-6);
//! ```

pub mod app;
pub mod cli;
pub mod data;
pub mod debug;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
