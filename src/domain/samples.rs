//! Sample store: ordered `(x, y)` observations for one fit.
//!
//! `x` need not be sorted or evenly spaced. When it is omitted it is
//! synthesized as `0, 1, …, n-1`.

use crate::domain::DatasetStats;
use crate::error::FitError;
use crate::math::min_max;

/// Second-order finite differences need at least three points.
pub const MIN_SAMPLES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Samples {
    /// Build a store from `y` and an optional matching `x`.
    pub fn new(y: Vec<f64>, x: Option<Vec<f64>>) -> Result<Self, FitError> {
        let x = match x {
            Some(x) => {
                if x.len() != y.len() {
                    return Err(FitError::shape(format!(
                        "x has {} values but y has {}",
                        x.len(),
                        y.len()
                    )));
                }
                x
            }
            None => (0..y.len()).map(|i| i as f64).collect(),
        };

        if y.len() < MIN_SAMPLES {
            return Err(FitError::shape(format!(
                "need at least {MIN_SAMPLES} samples, got {}",
                y.len()
            )));
        }

        for (axis, values) in [("x", &x), ("y", &y)] {
            if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(FitError::NonFinite { axis, index, value });
            }
        }

        Ok(Self { x, y })
    }

    /// `y` only; x becomes `0..n-1`.
    pub fn from_y(y: Vec<f64>) -> Result<Self, FitError> {
        Self::new(y, None)
    }

    pub fn from_xy(x: Vec<f64>, y: Vec<f64>) -> Result<Self, FitError> {
        Self::new(y, Some(x))
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Always `false` for a constructed store.
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// `(min(y), max(y))` of this dataset.
    pub fn y_range(&self) -> (f64, f64) {
        // Non-empty and finite by construction.
        min_max(&self.y).unwrap_or((f64::NAN, f64::NAN))
    }

    pub fn stats(&self) -> DatasetStats {
        let (x_min, x_max) = min_max(&self.x).unwrap_or((f64::NAN, f64::NAN));
        let (y_min, y_max) = self.y_range();
        DatasetStats {
            n_points: self.len(),
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x_defaults_to_index() {
        let s = Samples::from_y(vec![1.0, 2.0, 4.0, 8.0]).unwrap();
        assert_eq!(s.x(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = Samples::from_xy(vec![0.0, 1.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, FitError::Shape { .. }));
    }

    #[test]
    fn rejects_too_few_samples() {
        let err = Samples::from_y(vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, FitError::Shape { .. }));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = Samples::from_xy(vec![0.0, f64::NAN, 2.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, FitError::NonFinite { axis: "x", index: 1, .. }));

        let err = Samples::from_y(vec![1.0, 2.0, f64::INFINITY]).unwrap_err();
        assert!(matches!(err, FitError::NonFinite { axis: "y", index: 2, .. }));
    }

    #[test]
    fn range_and_stats_follow_the_data() {
        let s = Samples::from_xy(vec![-5.0, -4.0, 6.0], vec![0.2, 5.0, 1.0]).unwrap();
        assert_eq!(s.y_range(), (0.2, 5.0));
        let stats = s.stats();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (-5.0, 6.0));
    }
}
