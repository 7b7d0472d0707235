//! Finite-difference seed for `(a, b, c)`.
//!
//! For a pure exponential the local slopes `dq_i = Δy_i / Δx_i` grow
//! geometrically: `dq_{i+1} / dq_i = e^(b·(cx_{i+1} - cx_i))`, where `cx` are
//! interval midpoints. That gives one estimate of `b` per consecutive pair of
//! intervals; `a` follows from `Δy_i = a·(e^(b·x_{i+1}) - e^(b·x_i))` and `c`
//! from `y_i - a·e^(b·x_i)`.
//!
//! The `c_i` can span many orders of magnitude when the data sits close to
//! the asymptote, so the offset seed is their median.

use tracing::debug;

use crate::domain::{InitialEstimate, Samples};
use crate::error::{FitError, FitStage};
use crate::math::{mean, median_mut};

/// Compute the non-iterative seed `(a₀, b₀, c₀)`.
pub fn initial_estimate(samples: &Samples) -> Result<InitialEstimate, FitError> {
    let x = samples.x();
    let y = samples.y();
    let n = samples.len();

    let mut dy = Vec::with_capacity(n - 1);
    let mut cx = Vec::with_capacity(n - 1);
    let mut dq = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let dx = x[i + 1] - x[i];
        if dx == 0.0 {
            return Err(FitError::domain(
                FitStage::Estimate,
                format!("x[{}] == x[{i}] = {}; zero-width interval", i + 1, x[i]),
            ));
        }
        dy.push(y[i + 1] - y[i]);
        cx.push((x[i + 1] + x[i]) / 2.0);
        dq.push(dy[i] / dx);
    }

    let mut b_est = Vec::with_capacity(n - 2);
    for i in 0..n - 2 {
        let ratio = dq[i + 1] / dq[i];
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(FitError::domain(
                FitStage::Estimate,
                format!("slope ratio dq[{}]/dq[{i}] = {ratio} is not positive", i + 1),
            ));
        }
        let dcx = cx[i + 1] - cx[i];
        if dcx == 0.0 {
            return Err(FitError::domain(
                FitStage::Estimate,
                format!("midpoints cx[{}] and cx[{i}] coincide", i + 1),
            ));
        }
        b_est.push(ratio.ln() / dcx);
    }
    let b = finite(mean(&b_est), "growth rate")?;

    let mut a_est = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let denom = (b * x[i + 1]).exp() - (b * x[i]).exp();
        if denom == 0.0 {
            return Err(FitError::domain(
                FitStage::Estimate,
                format!("e^(b·x) does not change over interval {i} (b = {b})"),
            ));
        }
        a_est.push(dy[i] / denom);
    }
    let a = finite(mean(&a_est), "amplitude")?;
    if a == 0.0 {
        return Err(FitError::domain(FitStage::Estimate, "amplitude estimate is zero"));
    }

    let mut c_est: Vec<f64> = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| yi - a * (b * xi).exp())
        .collect();
    let c = finite(median_mut(&mut c_est), "offset")?;

    debug!(a0 = a, b0 = b, c0 = c, "initial estimate");
    Ok(InitialEstimate { a, b, c })
}

fn finite(value: Option<f64>, what: &str) -> Result<f64, FitError> {
    match value {
        Some(v) if v.is_finite() => Ok(v),
        Some(v) => Err(FitError::domain(
            FitStage::Estimate,
            format!("{what} estimate is not finite ({v})"),
        )),
        None => Err(FitError::domain(
            FitStage::Estimate,
            format!("no values to estimate {what} from"),
        )),
    }
}
