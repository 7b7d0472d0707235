//! Evaluation of `y = a·e^(b·x) + c`.

use crate::domain::ExpParams;

/// Predict `y(x)`.
pub fn predict(params: &ExpParams, x: f64) -> f64 {
    params.a * (params.b * x).exp() + params.c
}

/// Evaluate the model at every `x`.
pub fn fitted_curve(params: &ExpParams, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| predict(params, x)).collect()
}
