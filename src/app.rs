//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - installs the tracing subscriber
//! - runs the fit pipeline
//! - prints reports/plots
//! - writes optional exports

use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::{Cli, Command, CommonArgs, FitArgs, PlotArgs, SynthArgs};
use crate::domain::{ExpParams, FitConfig, SampleSource, SyntheticSpec};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `expfit` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.log_filter());

    match cli.command {
        Command::Fit(args) => handle_fit(&fit_config_from_args(&args)),
        Command::Synth(args) => handle_fit(&synth_config_from_args(&args)),
        Command::Plot(args) => handle_plot(args),
    }
}

/// `RUST_LOG` wins; otherwise use the CLI filter. Logs go to stderr.
fn init_tracing(log_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn handle_fit(config: &FitConfig) -> Result<(), AppError> {
    let run = pipeline::run_fit(config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.ingest, &run.fit, config, run.truth.as_ref())
    );
    println!("{}", crate::report::format_samples(&run.residuals));

    if config.trace {
        println!("{}", crate::report::format_trace(&run.fit.trace));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.residuals,
            &run.fit.params,
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    // Optional exports.
    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.residuals, &run.fit)?;
        println!("Wrote results: {}", path.display());
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, &run.fit, &run.ingest.stats)?;
        println!("Wrote curve: {}", path.display());
    }
    if config.debug_bundle {
        let path = crate::debug::write_debug_bundle(Path::new("debug"), &run.ingest, &run.fit, config)?;
        println!("Wrote debug bundle: {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;

    println!("{}", crate::report::format_equation(&curve.params));
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    let source = SampleSource::Csv {
        path: args.input.clone(),
        x_column: (!args.no_x).then(|| args.x_col.clone()),
        y_column: args.y_col.clone(),
    };
    config_with_source(source, &args.common)
}

pub fn synth_config_from_args(args: &SynthArgs) -> FitConfig {
    let source = SampleSource::Synthetic(SyntheticSpec {
        n: args.count,
        params: ExpParams::new(args.a, args.b, args.c),
        noise_sigma: args.noise,
        seed: args.seed,
    });
    config_with_source(source, &args.common)
}

fn config_with_source(source: SampleSource, common: &CommonArgs) -> FitConfig {
    FitConfig {
        source,
        metric: common.metric,
        step_tolerance: common.tolerance,
        max_iterations: common.max_iter,
        trace: common.trace,
        plot: common.plot && !common.no_plot,
        plot_width: common.width,
        plot_height: common.height,
        export_results: common.export.clone(),
        export_curve: common.export_curve.clone(),
        debug_bundle: common.debug_bundle,
    }
}
