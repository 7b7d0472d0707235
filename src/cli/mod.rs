//! Command-line parsing for the exponential curve fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the fitting code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_MAX_ITERATIONS, DEFAULT_STEP_TOLERANCE, ErrorMetric};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "expfit", version, about = "Fit y = a*e^(b*x) + c to sampled data")]
pub struct Cli {
    /// Log filter used when `RUST_LOG` is unset (error, warn, info, debug, trace).
    #[arg(long, global = true, env = "EXPFIT_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Shorthand for `--log-level debug`.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Effective log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &str {
        if self.debug { "debug" } else { &self.log_level }
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit samples read from a CSV file.
    Fit(FitArgs),
    /// Generate `y = a*e^(b*i) + c` (optionally noisy) and fit it.
    Synth(SynthArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Options for fitting a CSV file.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Input CSV with a header row.
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Column holding x values.
    #[arg(long, default_value = "x", conflicts_with = "no_x")]
    pub x_col: String,

    /// Column holding y values.
    #[arg(long, default_value = "y")]
    pub y_col: String,

    /// Ignore x data and use the row index `0..n-1`.
    #[arg(long)]
    pub no_x: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Options for the synthetic-test mode.
#[derive(Debug, Args, Clone)]
pub struct SynthArgs {
    /// Number of samples (x = 0..n-1).
    #[arg(short = 'n', long, default_value_t = 50)]
    pub count: usize,

    /// Amplitude.
    #[arg(short, long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub a: f64,

    /// Growth rate.
    #[arg(short, long, default_value_t = 1.0, allow_hyphen_values = true)]
    pub b: f64,

    /// Offset.
    #[arg(short, long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub c: f64,

    /// Standard deviation of additive Gaussian noise.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Fit and output options shared by `fit` and `synth`.
#[derive(Debug, Args, Clone)]
pub struct CommonArgs {
    /// Score used to compare candidate offsets.
    #[arg(long, value_enum, default_value_t = ErrorMetric::AbsoluteResidual)]
    pub metric: ErrorMetric,

    /// Stop once the offset step is at most this large.
    #[arg(long, default_value_t = DEFAULT_STEP_TOLERANCE)]
    pub tolerance: f64,

    /// Give up after this many search transitions.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iter: usize,

    /// Print the offset search trace.
    #[arg(long)]
    pub trace: bool,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export per-sample results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export curve (parameters + fitted grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,

    /// Write a markdown debug bundle under `debug/`.
    #[arg(long)]
    pub debug_bundle: bool,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Curve JSON file produced by `expfit fit --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
