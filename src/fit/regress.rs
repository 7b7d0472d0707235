//! Closed-form `(a, b)` at a fixed offset, and scoring of candidate offsets.
//!
//! With `c` fixed the model linearizes to
//!
//! ```text
//! ln(s·(y_i - c)) = ln|a| + b·x_i,      s = sign(a₀)
//! ```
//!
//! which is an ordinary least squares line in `x`. The log drops the sign of
//! `a`, so it is carried over from the initial estimate.

use crate::domain::{ErrorMetric, ExpParams, Samples};
use crate::error::{FitError, FitStage};
use crate::math::fit_line;
use crate::models::fitted_curve;

/// Best `(a, b)` for one offset plus the curve it produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Regression {
    pub params: ExpParams,
    pub fitted: Vec<f64>,
}

/// Least-squares `(a, b)` for a fixed offset `c`.
///
/// Every `sign·(y_i - c)` must be strictly positive.
pub fn regress_at(samples: &Samples, c: f64, sign: f64) -> Result<Regression, FitError> {
    let ln_v = log_offsets(samples, c, sign, FitStage::Regress)?;

    let line = fit_line(samples.x(), &ln_v).ok_or_else(|| {
        FitError::domain(
            FitStage::Regress,
            format!("no unique line through ln|y - c| at c = {c} (x has no spread)"),
        )
    })?;

    let params = ExpParams::new(sign * line.intercept.exp(), line.slope, c);
    if !(params.is_finite() && params.a != 0.0) {
        return Err(FitError::domain(
            FitStage::Regress,
            format!("degenerate parameters at c = {c}: a = {}, b = {}", params.a, params.b),
        ));
    }

    let fitted = fitted_curve(&params, samples.x());
    Ok(Regression { params, fitted })
}

/// Score an offset under `metric`; smaller is better.
pub fn evaluate(samples: &Samples, c: f64, sign: f64, metric: ErrorMetric) -> Result<f64, FitError> {
    let score = match metric {
        ErrorMetric::AbsoluteResidual => {
            let reg = regress_at(samples, c, sign)?;
            residuals(samples, &reg).map(f64::abs).sum::<f64>()
        }
        ErrorMetric::SquaredResidual => {
            let reg = regress_at(samples, c, sign)?;
            residuals(samples, &reg).map(|r| r * r).sum::<f64>()
        }
        ErrorMetric::GrowthFactor => growth_factor_deviation(samples, c, sign)?,
    };

    if score.is_finite() {
        Ok(score)
    } else {
        Err(FitError::domain(
            FitStage::Evaluate,
            format!("{} is not finite at c = {c}", metric.display_name()),
        ))
    }
}

fn residuals<'a>(samples: &'a Samples, reg: &'a Regression) -> impl Iterator<Item = f64> + 'a {
    samples
        .y()
        .iter()
        .zip(reg.fitted.iter())
        .map(|(y, y_fit)| y - y_fit)
}

/// Legacy metric: `Σ |ḡ - g_i|` with per-interval growth factors
/// `g_i = e^(ln((y_{i+1}-c)/(y_i-c)) / Δx_i)` and `ḡ` the average growth
/// factor over the whole x span.
fn growth_factor_deviation(samples: &Samples, c: f64, sign: f64) -> Result<f64, FitError> {
    let x = samples.x();
    let ln_v = log_offsets(samples, c, sign, FitStage::Evaluate)?;

    let span = x[x.len() - 1] - x[0];
    if span == 0.0 {
        return Err(FitError::domain(
            FitStage::Evaluate,
            "first and last x coincide; average growth factor undefined",
        ));
    }

    let mut ee_sum = 0.0;
    let mut growth = Vec::with_capacity(ln_v.len() - 1);
    for i in 0..ln_v.len() - 1 {
        let dx = x[i + 1] - x[i];
        if dx == 0.0 {
            return Err(FitError::domain(
                FitStage::Evaluate,
                format!("zero-width interval at x[{i}] = {}", x[i]),
            ));
        }
        let ee = ln_v[i + 1] - ln_v[i];
        ee_sum += ee;
        growth.push((ee / dx).exp());
    }

    let avg = (ee_sum / span).exp();
    Ok(growth.iter().map(|g| (avg - g).abs()).sum())
}

/// `ln(sign·(y_i - c))` for every sample.
fn log_offsets(samples: &Samples, c: f64, sign: f64, stage: FitStage) -> Result<Vec<f64>, FitError> {
    samples
        .y()
        .iter()
        .enumerate()
        .map(|(i, &yi)| {
            let v = sign * (yi - c);
            if v > 0.0 && v.is_finite() {
                Ok(v.ln())
            } else {
                Err(FitError::domain(
                    stage,
                    format!("y[{i}] - c = {} has the wrong sign for a {} amplitude", yi - c, sign_word(sign)),
                ))
            }
        })
        .collect()
}

fn sign_word(sign: f64) -> &'static str {
    if sign > 0.0 { "positive" } else { "negative" }
}
