//! Ordinary least squares for a straight line.
//!
//! The linearized exponential model `ln|y - c| = ln|a| + b·x` is a line in `x`,
//! so every candidate offset reduces to:
//!
//! ```text
//! minimize Σ (v_i - (β0 + β1·x_i))^2
//! ```
//!
//! Implementation choices:
//! - The design matrix is tall (`n × 2`), so we solve with SVD rather than QR
//!   (nalgebra's `QR::solve` is intended for square systems).
//! - A degenerate x spread (all x equal) has no unique slope. We reject it up
//!   front instead of letting SVD return a minimum-norm solution.

use nalgebra::{DMatrix, DVector};

/// Relative threshold for treating the x spread as zero.
const SPREAD_EPS: f64 = 1e-12;

/// Intercept and slope of a fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit `v ≈ intercept + slope·x`.
///
/// Returns `None` when the inputs have mismatched lengths, fewer than two
/// points, no x spread, or the solve produces non-finite coefficients.
pub fn fit_line(x: &[f64], v: &[f64]) -> Option<LineFit> {
    let n = x.len();
    if n < 2 || v.len() != n {
        return None;
    }

    let x_mean = x.iter().sum::<f64>() / n as f64;
    let spread: f64 = x.iter().map(|xi| (xi - x_mean).powi(2)).sum();
    let scale: f64 = x.iter().map(|xi| xi * xi).sum::<f64>().max(1.0);
    if !(spread > SPREAD_EPS * scale) {
        return None;
    }

    let mut design = DMatrix::<f64>::zeros(n, 2);
    for (i, &xi) in x.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = xi;
    }
    let rhs = DVector::from_column_slice(v);

    let beta = solve_least_squares(&design, &rhs)?;
    Some(LineFit {
        intercept: beta[0],
        slope: beta[1],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn fit_line_matches_closed_form() {
        let x = [-5.0, -4.0, 6.0, 7.0, 8.0];
        let v = [1.3, 1.1, -0.4, -0.7, -0.8];

        let n = x.len() as f64;
        let sx: f64 = x.iter().sum();
        let sxx: f64 = x.iter().map(|a| a * a).sum();
        let sv: f64 = v.iter().sum();
        let sxv: f64 = x.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
        let denom = n * sxx - sx * sx;
        let slope = (n * sxv - sx * sv) / denom;
        let intercept = (sxx * sv - sx * sxv) / denom;

        let line = fit_line(&x, &v).unwrap();
        assert!((line.slope - slope).abs() < 1e-12);
        assert!((line.intercept - intercept).abs() < 1e-12);
    }

    #[test]
    fn fit_line_rejects_degenerate_x() {
        assert!(fit_line(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(fit_line(&[1.0], &[1.0]).is_none());
        assert!(fit_line(&[1.0, 2.0], &[1.0]).is_none());
    }
}
