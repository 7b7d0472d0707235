//! Synthetic samples `y_i = a·e^(b·i) + c` at `x_i = i`.
//!
//! Exact data is used to check that a fit recovers its generating parameters.
//! Optional additive Gaussian noise is drawn from a seeded RNG, so a given
//! `(spec, seed)` always produces the same dataset.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::domain::{ExpParams, Samples, SyntheticSpec};
use crate::error::FitError;
use crate::models::predict;

#[derive(Debug, Clone)]
pub struct SyntheticData {
    pub samples: Samples,
    /// Parameters the data was generated from.
    pub truth: ExpParams,
    pub noise_sigma: f64,
}

/// Noise-free samples at `x = 0..n-1`.
pub fn generate_exact(n: usize, params: &ExpParams) -> Result<Samples, FitError> {
    let y = (0..n).map(|i| predict(params, i as f64)).collect();
    Samples::from_y(y)
}

/// Generate a dataset from a synthetic spec, adding noise when requested.
pub fn generate_sample(spec: &SyntheticSpec) -> Result<SyntheticData, FitError> {
    if !(spec.noise_sigma.is_finite() && spec.noise_sigma >= 0.0) {
        return Err(FitError::InvalidOptions(format!(
            "noise sigma must be finite and >= 0, got {}",
            spec.noise_sigma
        )));
    }
    if !spec.params.is_finite() {
        return Err(FitError::InvalidOptions(
            "synthetic parameters must be finite".to_string(),
        ));
    }

    let exact = generate_exact(spec.n, &spec.params)?;
    let samples = if spec.noise_sigma > 0.0 {
        let mut rng = StdRng::seed_from_u64(spec.seed);
        let normal = Normal::new(0.0, spec.noise_sigma)
            .map_err(|e| FitError::InvalidOptions(format!("noise distribution: {e}")))?;
        let y = exact.y().iter().map(|&y| y + normal.sample(&mut rng)).collect();
        Samples::from_xy(exact.x().to_vec(), y)?
    } else {
        exact
    };

    Ok(SyntheticData {
        samples,
        truth: spec.params,
        noise_sigma: spec.noise_sigma,
    })
}
