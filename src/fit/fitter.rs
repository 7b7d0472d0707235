//! Full fit of `y = a·e^(b·x) + c` to one dataset.
//!
//! Given:
//! - a sample store (`x_i`, `y_i`)
//! - fit options (metric, tolerance, iteration ceiling)
//!
//! we:
//! - seed `(a₀, b₀, c₀)` from finite differences
//! - search for the offset `c` minimizing the chosen error metric
//! - recover `(a, b)` at the converged `c` by linear least squares
//!
//! Every fit owns its working state; nothing is cached between calls.

use tracing::info;

use crate::domain::{FitOptions, FitResult, Samples};
use crate::error::{FitError, FitStage};
use crate::fit::estimate::initial_estimate;
use crate::fit::regress::regress_at;
use crate::fit::search::search_offset;

/// Fit the exponential-plus-offset model.
pub fn fit_exponential(samples: &Samples, opts: &FitOptions) -> Result<FitResult, FitError> {
    opts.validate()?;

    let initial = initial_estimate(samples)?;
    let search = search_offset(samples, &initial, opts)?;
    let regression = regress_at(samples, search.c, initial.sign())?;

    if regression.fitted.iter().any(|v| !v.is_finite()) {
        return Err(FitError::domain(
            FitStage::Regress,
            "fitted curve contains non-finite values",
        ));
    }

    info!(
        a = regression.params.a,
        b = regression.params.b,
        c = regression.params.c,
        error = search.error,
        iterations = search.iterations,
        "exponential fit converged"
    );

    Ok(FitResult {
        params: regression.params,
        initial,
        fitted: regression.fitted,
        error: search.error,
        metric: opts.metric,
        iterations: search.iterations,
        trace: search.trace,
    })
}

/// Convenience wrapper: fit `y` against `x = 0..n-1` with default options.
pub fn fit_y(y: &[f64]) -> Result<FitResult, FitError> {
    let samples = Samples::from_y(y.to_vec())?;
    fit_exponential(&samples, &FitOptions::default())
}
