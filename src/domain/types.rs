//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during fitting
//! - exported to JSON/CSV
//! - reloaded later for plotting or comparisons

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Parameters of `y = a·e^(b·x) + c`.
///
/// `a` may be negative (curves approaching the offset from below).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpParams {
    /// Amplitude.
    pub a: f64,
    /// Growth rate (negative for decaying curves).
    pub b: f64,
    /// Offset (horizontal asymptote).
    pub c: f64,
}

impl ExpParams {
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite() && self.c.is_finite()
    }
}

/// Finite-difference seed produced before any iteration.
///
/// Only `c` and the sign of `a` drive the search; `b` is informational.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialEstimate {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl InitialEstimate {
    /// Sign carried into the regression: `+1.0` when `a > 0`, else `-1.0`.
    pub fn sign(&self) -> f64 {
        if self.a > 0.0 { 1.0 } else { -1.0 }
    }
}

/// How a candidate offset is scored by the search.
///
/// One metric is used for the whole fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ErrorMetric {
    /// `Σ |y_i - ŷ_i|` over the fitted curve at the candidate offset.
    #[default]
    #[value(name = "abs")]
    AbsoluteResidual,
    /// `Σ (y_i - ŷ_i)²`.
    #[value(name = "squared")]
    SquaredResidual,
    /// Legacy form: total deviation of per-interval growth factors from the
    /// average growth factor over the whole span.
    #[value(name = "growth")]
    GrowthFactor,
}

impl ErrorMetric {
    pub fn display_name(&self) -> &'static str {
        match self {
            ErrorMetric::AbsoluteResidual => "sum |residual|",
            ErrorMetric::SquaredResidual => "sum residual^2",
            ErrorMetric::GrowthFactor => "growth-factor deviation",
        }
    }
}

/// Step size below which the offset search is considered converged.
pub const DEFAULT_STEP_TOLERANCE: f64 = 1e-7;

/// Hard ceiling on offset search transitions.
pub const DEFAULT_MAX_ITERATIONS: usize = 10_000;

/// Options controlling a single fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub metric: ErrorMetric,
    /// The search stops once `|step| <= step_tolerance`.
    pub step_tolerance: f64,
    /// Exceeding this many transitions fails the fit with `FitError::Convergence`.
    pub max_iterations: usize,
    /// Return every search transition in `FitResult::trace`.
    pub record_trace: bool,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            metric: ErrorMetric::default(),
            step_tolerance: DEFAULT_STEP_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            record_trace: false,
        }
    }
}

impl FitOptions {
    pub fn validate(&self) -> Result<(), FitError> {
        if !(self.step_tolerance.is_finite() && self.step_tolerance > 0.0) {
            return Err(FitError::InvalidOptions(format!(
                "step tolerance must be finite and > 0, got {}",
                self.step_tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(FitError::InvalidOptions(
                "max iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// What the search did with one candidate offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepOutcome {
    /// Scoring of the seed offset before the first move.
    Initial,
    /// Candidate improved the error and became the current offset.
    Accepted,
    /// Candidate did not improve; step reversed and halved.
    Reversed,
    /// Candidate fell inside `[min(y), max(y)]`; step halved without scoring.
    Guarded,
}

/// One row of the offset search trace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchStep {
    pub iteration: usize,
    /// Offset that was tried.
    pub trial_c: f64,
    /// Step that produced `trial_c` (before any update).
    pub step: f64,
    /// Score of `trial_c`; `None` for guarded candidates.
    pub error: Option<f64>,
    /// Best score after this transition.
    pub min_error: f64,
    /// Current offset after this transition.
    pub c: f64,
    pub outcome: StepOutcome,
}

/// Result of a successful fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub params: ExpParams,
    pub initial: InitialEstimate,
    /// `a·e^(b·x_i) + c` at every sample.
    pub fitted: Vec<f64>,
    /// Final score under `metric`.
    pub error: f64,
    pub metric: ErrorMetric,
    /// Search transitions performed (guard rejections included).
    pub iterations: usize,
    /// Filled only when `FitOptions::record_trace` is set.
    pub trace: Vec<SearchStep>,
}

/// Observed vs fitted value for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleResidual {
    pub index: usize,
    pub x: f64,
    pub y_obs: f64,
    pub y_fit: f64,
    pub residual: f64,
}

/// Summary stats about the samples actually fitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Parameters of the synthetic-test mode.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticSpec {
    pub n: usize,
    pub params: ExpParams,
    /// Standard deviation of additive Gaussian noise (0 = exact data).
    pub noise_sigma: f64,
    pub seed: u64,
}

/// Where a run gets its samples from.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSource {
    Csv {
        path: PathBuf,
        /// `None` means x defaults to `0..n-1`.
        x_column: Option<String>,
        y_column: String,
    },
    Synthetic(SyntheticSpec),
}

/// Full configuration for a single run.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub source: SampleSource,

    pub metric: ErrorMetric,
    pub step_tolerance: f64,
    pub max_iterations: usize,

    /// Print the search trace table.
    pub trace: bool,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_curve: Option<PathBuf>,
    pub debug_bundle: bool,
}

impl FitConfig {
    pub fn fit_options(&self) -> FitOptions {
        FitOptions {
            metric: self.metric,
            step_tolerance: self.step_tolerance,
            max_iterations: self.max_iterations,
            record_trace: self.trace || self.debug_bundle,
        }
    }
}

/// Portable JSON representation of a fitted curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub created: DateTime<Utc>,
    pub metric: ErrorMetric,
    pub params: ExpParams,
    pub initial: InitialEstimate,
    pub error: f64,
    pub iterations: usize,
    pub n_points: usize,
    pub grid: CurveGrid,
}

/// Fitted curve sampled on a regular x grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_validate() {
        let opts = FitOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.metric, ErrorMetric::AbsoluteResidual);
        assert_eq!(opts.step_tolerance, 1e-7);
        assert_eq!(opts.max_iterations, 10_000);
    }

    #[test]
    fn invalid_options_rejected() {
        let zero_tol = FitOptions {
            step_tolerance: 0.0,
            ..FitOptions::default()
        };
        assert!(matches!(zero_tol.validate(), Err(FitError::InvalidOptions(_))));

        let no_iters = FitOptions {
            max_iterations: 0,
            ..FitOptions::default()
        };
        assert!(matches!(no_iters.validate(), Err(FitError::InvalidOptions(_))));
    }

    #[test]
    fn initial_estimate_sign() {
        assert_eq!(InitialEstimate { a: 2.0, b: 0.0, c: 0.0 }.sign(), 1.0);
        assert_eq!(InitialEstimate { a: -0.5, b: 0.0, c: 0.0 }.sign(), -1.0);
    }
}
