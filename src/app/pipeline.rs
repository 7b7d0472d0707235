//! Shared "fit pipeline" logic used by the `fit` and `synth` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load or generate samples -> fit -> residuals
//!
//! The command handlers can then focus on presentation and exports.

use tracing::info;

use crate::data::generate_sample;
use crate::domain::{ExpParams, FitConfig, FitResult, SampleResidual, SampleSource};
use crate::error::AppError;
use crate::fit::fit_exponential;
use crate::io::ingest::{IngestedData, load_samples};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub fit: FitResult,
    pub residuals: Vec<SampleResidual>,
    /// Generating parameters, for synthetic runs.
    pub truth: Option<ExpParams>,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let (ingest, truth) = match &config.source {
        SampleSource::Csv { path, x_column, y_column } => {
            let ingest = load_samples(path, x_column.as_deref(), y_column)?;
            info!(
                path = %path.display(),
                rows_used = ingest.rows_used,
                skipped = ingest.row_errors.len(),
                "loaded samples"
            );
            (ingest, None)
        }
        SampleSource::Synthetic(spec) => {
            let data = generate_sample(spec)?;
            info!(n = spec.n, noise = spec.noise_sigma, seed = spec.seed, "generated samples");
            (IngestedData::from_samples(data.samples, true), Some(data.truth))
        }
    };

    let fit = fit_exponential(&ingest.samples, &config.fit_options())?;
    let residuals = crate::report::compute_residuals(&ingest.samples, &fit)?;

    Ok(RunOutput {
        ingest,
        fit,
        residuals,
        truth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorMetric, SyntheticSpec};

    fn synth_config(a: f64, b: f64, c: f64) -> FitConfig {
        FitConfig {
            source: SampleSource::Synthetic(SyntheticSpec {
                n: 5,
                params: ExpParams::new(a, b, c),
                noise_sigma: 0.0,
                seed: 1,
            }),
            metric: ErrorMetric::AbsoluteResidual,
            step_tolerance: 1e-7,
            max_iterations: 10_000,
            trace: false,
            plot: false,
            plot_width: 60,
            plot_height: 15,
            export_results: None,
            export_curve: None,
            debug_bundle: false,
        }
    }

    #[test]
    fn synthetic_run_recovers_truth() {
        let run = run_fit(&synth_config(-1.0, 1.0, 0.0)).unwrap();
        let p = run.fit.params;
        assert!((p.a + 1.0).abs() < 1e-6);
        assert!((p.b - 1.0).abs() < 1e-6);
        assert!(p.c.abs() < 1e-6);
        assert_eq!(run.truth, Some(ExpParams::new(-1.0, 1.0, 0.0)));
        assert_eq!(run.residuals.len(), 5);
    }

    #[test]
    fn csv_run_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "x,y\n0,1\n1,2.718281828459045\n2,7.38905609893065\n").unwrap();

        let mut config = synth_config(1.0, 1.0, 0.0);
        config.source = SampleSource::Csv {
            path,
            x_column: Some("x".to_string()),
            y_column: "y".to_string(),
        };
        let run = run_fit(&config).unwrap();
        assert!(run.truth.is_none());
        assert!((run.fit.params.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn missing_file_is_a_schema_error() {
        let mut config = synth_config(1.0, 1.0, 0.0);
        config.source = SampleSource::Csv {
            path: "/nonexistent/expfit.csv".into(),
            x_column: None,
            y_column: "y".to_string(),
        };
        assert_eq!(run_fit(&config).unwrap_err().exit_code(), 2);
    }
}
