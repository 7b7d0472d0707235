//! Debug bundle writer for inspecting a fit step by step.
//!
//! The bundle is a markdown file holding the input samples, the initial
//! estimate, every offset-search transition and the final parameters.

use std::fmt::Write as _;
use std::fs::{create_dir_all, write};
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::{FitConfig, FitResult, SampleSource};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::report::format_equation;

/// Write a bundle under `dir` and return its path.
pub fn write_debug_bundle(
    dir: &Path,
    ingest: &IngestedData,
    fit: &FitResult,
    config: &FitConfig,
) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("expfit_debug_n{}_{ts}.md", ingest.stats.n_points));

    write(&path, render_debug_bundle(ingest, fit, config))
        .map_err(|e| AppError::new(4, format!("Failed to write debug file: {e}")))?;
    Ok(path)
}

/// Markdown body of a debug bundle.
pub fn render_debug_bundle(ingest: &IngestedData, fit: &FitResult, config: &FitConfig) -> String {
    // Writing into a String cannot fail.
    let mut md = String::new();

    let _ = writeln!(md, "# expfit debug bundle");
    let _ = writeln!(md, "- generated: {}", Local::now().to_rfc3339());
    match &config.source {
        SampleSource::Csv { path, x_column, y_column } => {
            let _ = writeln!(
                md,
                "- source: csv `{}` (x={}, y={})",
                path.display(),
                x_column.as_deref().unwrap_or("index"),
                y_column
            );
        }
        SampleSource::Synthetic(spec) => {
            let _ = writeln!(
                md,
                "- source: synthetic n={} a={} b={} c={} noise={} seed={}",
                spec.n, spec.params.a, spec.params.b, spec.params.c, spec.noise_sigma, spec.seed
            );
        }
    }
    let _ = writeln!(
        md,
        "- metric: {} | tolerance={:e} | max_iter={}",
        fit.metric.display_name(),
        config.step_tolerance,
        config.max_iterations
    );
    let _ = writeln!(
        md,
        "- rows: read={} used={} skipped={}",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    );

    let _ = writeln!(md, "\n## Samples");
    let _ = writeln!(md, "| i | x | y | y_fit |");
    let _ = writeln!(md, "| - | - | - | - |");
    let samples = &ingest.samples;
    for (i, (x, y)) in samples.x().iter().zip(samples.y()).enumerate() {
        let y_fit = fit.fitted.get(i).copied().unwrap_or(f64::NAN);
        let _ = writeln!(md, "| {i} | {x:.6} | {y:.6} | {y_fit:.6} |");
    }
    for e in &ingest.row_errors {
        let _ = writeln!(md, "- skipped line {}: {}", e.line, e.message);
    }

    let _ = writeln!(md, "\n## Initial estimate");
    let _ = writeln!(
        md,
        "a0={:.9} b0={:.9} c0={:.9}",
        fit.initial.a, fit.initial.b, fit.initial.c
    );

    let _ = writeln!(md, "\n## Offset search");
    let _ = writeln!(md, "| iter | trial_c | step | error | min_error | c | outcome |");
    let _ = writeln!(md, "| - | - | - | - | - | - | - |");
    for row in &fit.trace {
        let _ = writeln!(
            md,
            "| {} | {:.9} | {:.3e} | {} | {:.6e} | {:.9} | {:?} |",
            row.iteration,
            row.trial_c,
            row.step,
            row.error.map(|e| format!("{e:.6e}")).unwrap_or_else(|| "-".to_string()),
            row.min_error,
            row.c,
            row.outcome
        );
    }
    if fit.trace.is_empty() {
        let _ = writeln!(md, "(trace not recorded)");
    }

    let _ = writeln!(md, "\n## Final fit");
    let _ = writeln!(md, "{}", format_equation(&fit.params));
    let _ = writeln!(md, "- error: {:.9e}", fit.error);
    let _ = writeln!(md, "- iterations: {}", fit.iterations);

    md
}
