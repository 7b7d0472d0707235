//! Reporting utilities: residuals and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{FitResult, SampleResidual, Samples};
use crate::error::{AppError, FitError, FitStage};

/// Pair each sample with its value on the fitted curve (`FitResult::fitted`).
pub fn compute_residuals(samples: &Samples, fit: &FitResult) -> Result<Vec<SampleResidual>, AppError> {
    if fit.fitted.len() != samples.len() {
        return Err(FitError::shape(format!(
            "fitted curve has {} values for {} samples",
            fit.fitted.len(),
            samples.len()
        ))
        .into());
    }

    let mut out = Vec::with_capacity(samples.len());
    let points = samples.x().iter().zip(samples.y()).zip(&fit.fitted);
    for (index, ((&x, &y_obs), &y_fit)) in points.enumerate() {
        if !y_fit.is_finite() {
            return Err(FitError::domain(
                FitStage::Regress,
                format!("non-finite fitted value at x = {x}"),
            )
            .into());
        }
        out.push(SampleResidual {
            index,
            x,
            y_obs,
            y_fit,
            residual: y_obs - y_fit,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorMetric, ExpParams, InitialEstimate};
    use crate::models::fitted_curve;

    fn fit(samples: &Samples, params: ExpParams) -> FitResult {
        FitResult {
            params,
            initial: InitialEstimate { a: params.a, b: params.b, c: params.c },
            fitted: fitted_curve(&params, samples.x()),
            error: 0.0,
            metric: ErrorMetric::AbsoluteResidual,
            iterations: 0,
            trace: Vec::new(),
        }
    }

    #[test]
    fn compute_residuals_basic() {
        let samples = Samples::from_xy(vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 4.5]).unwrap();
        let residuals = compute_residuals(&samples, &fit(&samples, ExpParams::new(1.0, 0.0, 2.0))).unwrap();
        assert_eq!(residuals.len(), 3);
        assert!(residuals[0].residual.abs() < 1e-12);
        assert!((residuals[1].residual - 1.0).abs() < 1e-12);
        assert_eq!(residuals[2].index, 2);
    }

    #[test]
    fn overflowing_prediction_is_an_error() {
        let samples = Samples::from_xy(vec![0.0, 1.0, 1000.0], vec![1.0, 2.0, 3.0]).unwrap();
        let err = compute_residuals(&samples, &fit(&samples, ExpParams::new(1.0, 1.0, 0.0))).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn residuals_use_the_stored_fitted_curve() {
        let samples = Samples::from_xy(vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 4.5]).unwrap();
        let mut result = fit(&samples, ExpParams::new(1.0, 0.0, 2.0));
        result.fitted = vec![2.5, 3.5, 4.0];

        let residuals = compute_residuals(&samples, &result).unwrap();
        let y_fit: Vec<f64> = residuals.iter().map(|r| r.y_fit).collect();
        assert_eq!(y_fit, vec![2.5, 3.5, 4.0]);
        assert_eq!(residuals[0].residual, 0.5);
    }

    #[test]
    fn fitted_length_mismatch_is_a_data_error() {
        let samples = Samples::from_xy(vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 4.5]).unwrap();
        let mut result = fit(&samples, ExpParams::new(1.0, 0.0, 2.0));
        result.fitted.pop();
        assert_eq!(compute_residuals(&samples, &result).unwrap_err().exit_code(), 3);
    }
}
