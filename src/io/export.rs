//! Export per-sample results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{FitResult, SampleResidual};
use crate::error::AppError;

/// Write per-sample results to a CSV file.
pub fn write_results_csv(path: &Path, residuals: &[SampleResidual], fit: &FitResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results(file, residuals, fit)
}

/// Write per-sample results as CSV to any writer.
pub fn write_results<W: Write>(mut out: W, residuals: &[SampleResidual], fit: &FitResult) -> Result<(), AppError> {
    writeln!(out, "index,x,y_obs,y_fit,residual,a,b,c")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    let p = &fit.params;
    for r in residuals {
        writeln!(
            out,
            "{},{},{},{},{},{},{},{}",
            r.index, r.x, r.y_obs, r.y_fit, r.residual, p.a, p.b, p.c,
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorMetric, ExpParams, InitialEstimate};

    #[test]
    fn writes_header_and_one_row_per_sample() {
        let fit = FitResult {
            params: ExpParams::new(1.0, 0.5, 2.0),
            initial: InitialEstimate { a: 1.0, b: 0.5, c: 2.0 },
            fitted: vec![3.0, 3.5],
            error: 0.0,
            metric: ErrorMetric::AbsoluteResidual,
            iterations: 0,
            trace: Vec::new(),
        };
        let residuals = [
            SampleResidual { index: 0, x: 0.0, y_obs: 3.0, y_fit: 3.0, residual: 0.0 },
            SampleResidual { index: 1, x: 1.0, y_obs: 3.75, y_fit: 3.5, residual: 0.25 },
        ];

        let mut buf = Vec::new();
        write_results(&mut buf, &residuals, &fit).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "index,x,y_obs,y_fit,residual,a,b,c");
        assert_eq!(lines[2], "1,1,3.75,3.5,0.25,1,0.5,2");
    }
}
