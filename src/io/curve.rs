//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - fitted parameters and the initial estimate
//! - fit metadata (metric, final error, iterations)
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::domain::{CurveFile, CurveGrid, DatasetStats, FitResult};
use crate::error::AppError;
use crate::models::predict;

/// Number of grid points written to curve files.
pub const CURVE_GRID_POINTS: usize = 101;

/// Build the portable representation of a fit.
pub fn curve_file(fit: &FitResult, stats: &DatasetStats) -> CurveFile {
    CurveFile {
        tool: "expfit".to_string(),
        created: Utc::now(),
        metric: fit.metric,
        params: fit.params,
        initial: fit.initial,
        error: fit.error,
        iterations: fit.iterations,
        n_points: stats.n_points,
        grid: build_grid(fit, stats.x_min, stats.x_max, CURVE_GRID_POINTS),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, fit: &FitResult, stats: &DatasetStats) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &curve_file(fit, stats))
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    Ok(curve)
}

fn build_grid(fit: &FitResult, x_min: f64, x_max: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let (mut x0, mut x1) = (x_min, x_max);
    if !(x0.is_finite() && x1.is_finite()) || x1 < x0 {
        x0 = 0.0;
        x1 = 1.0;
    }
    if (x1 - x0).abs() < 1e-12 {
        x0 -= 0.5;
        x1 += 0.5;
    }

    let mut xs = Vec::with_capacity(n);
    let mut ys = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let x = x0 + u * (x1 - x0);
        xs.push(x);
        ys.push(predict(&fit.params, x));
    }

    CurveGrid { x: xs, y: ys }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorMetric, ExpParams, InitialEstimate};

    fn fit() -> FitResult {
        FitResult {
            params: ExpParams::new(-3.0, -0.16, 7.0),
            initial: InitialEstimate { a: -2.9, b: -0.15, c: 7.01 },
            fitted: vec![],
            error: 0.01,
            metric: ErrorMetric::AbsoluteResidual,
            iterations: 31,
            trace: Vec::new(),
        }
    }

    #[test]
    fn curve_json_round_trips_through_disk() {
        let stats = DatasetStats { n_points: 5, x_min: -5.0, x_max: 8.0, y_min: 0.2, y_max: 6.2 };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.json");

        write_curve_json(&path, &fit(), &stats).unwrap();
        let curve = read_curve_json(&path).unwrap();

        assert_eq!(curve.tool, "expfit");
        assert_eq!(curve.params, fit().params);
        assert_eq!(curve.grid.x.len(), CURVE_GRID_POINTS);
        assert_eq!(curve.grid.x[0], -5.0);
        assert!((curve.grid.x[CURVE_GRID_POINTS - 1] - 8.0).abs() < 1e-12);
        assert!((curve.grid.y[0] - predict(&curve.params, -5.0)).abs() < 1e-12);
    }

    #[test]
    fn rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(read_curve_json(&path).unwrap_err().exit_code(), 2);
    }
}
