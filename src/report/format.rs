//! Plain-text formatting of fit results.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{ExpParams, FitConfig, FitResult, SampleResidual, SearchStep, StepOutcome};
use crate::io::ingest::IngestedData;

/// Maximum sample rows printed in the summary.
pub const MAX_PRINTED_SAMPLES: usize = 10;

/// Format the full run summary (dataset stats + fit diagnostics + parameters).
pub fn format_run_summary(
    ingest: &IngestedData,
    fit: &FitResult,
    config: &FitConfig,
    truth: Option<&ExpParams>,
) -> String {
    let mut out = String::new();
    let s = &ingest.stats;

    out.push_str("=== expfit - y = a*e^(b*x) + c ===\n");
    out.push_str(&format!(
        "Points: n={} | x=[{}, {}]{} | y=[{}, {}]\n",
        s.n_points,
        fmt_num(s.x_min),
        fmt_num(s.x_max),
        if ingest.x_synthesized { " (index)" } else { "" },
        fmt_num(s.y_min),
        fmt_num(s.y_max),
    ));
    if !ingest.row_errors.is_empty() {
        out.push_str(&format!(
            "Rows: read={} used={} skipped={}\n",
            ingest.rows_read,
            ingest.rows_used,
            ingest.row_errors.len()
        ));
        for e in ingest.row_errors.iter().take(5) {
            out.push_str(&format!("  line {}: {}\n", e.line, e.message));
        }
    }
    out.push_str(&format!(
        "Metric: {} | tolerance={:e} | max_iter={}\n",
        fit.metric.display_name(),
        config.step_tolerance,
        config.max_iterations
    ));

    out.push_str("\nInitial estimate:\n");
    out.push_str(&format!(
        "- a0={}  b0={}  c0={}\n",
        fmt_num(fit.initial.a),
        fmt_num(fit.initial.b),
        fmt_num(fit.initial.c)
    ));

    out.push_str("\nThe exponential fit is:\n");
    out.push_str(&format!("    {}\n", format_equation(&fit.params)));
    out.push_str(&format!(
        "- error={} | iterations={}\n",
        fmt_num(fit.error),
        fit.iterations
    ));

    if let Some(t) = truth {
        out.push_str(&format!(
            "- true: a={}  b={}  c={}\n",
            fmt_num(t.a),
            fmt_num(t.b),
            fmt_num(t.c)
        ));
        out.push_str(&format!(
            "- |diff|: a={:.3e}  b={:.3e}  c={:.3e}\n",
            (fit.params.a - t.a).abs(),
            (fit.params.b - t.b).abs(),
            (fit.params.c - t.c).abs()
        ));
    }
    out.push('\n');

    out
}

/// `y = a * e^(b*x) + c` with the fitted numbers.
pub fn format_equation(p: &ExpParams) -> String {
    format!("y = {} * e^({} * x) + {}", fmt_num(p.a), fmt_num(p.b), fmt_num(p.c))
}

/// Observed vs fitted values (first `MAX_PRINTED_SAMPLES` rows).
pub fn format_samples(residuals: &[SampleResidual]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5} {:>14} {:>14} {:>14} {:>12}\n",
        "i", "x", "y_obs", "y_fit", "residual"
    ));
    out.push_str(&format!(
        "{:->5} {:->14} {:->14} {:->14} {:->12}\n",
        "", "", "", "", ""
    ));
    for r in residuals.iter().take(MAX_PRINTED_SAMPLES) {
        out.push_str(&format!(
            "{:>5} {:>14} {:>14} {:>14} {:>12.3e}\n",
            r.index,
            fmt_num(r.x),
            fmt_num(r.y_obs),
            fmt_num(r.y_fit),
            r.residual
        ));
    }
    if residuals.len() > MAX_PRINTED_SAMPLES {
        out.push_str(&format!("  ... {} more\n", residuals.len() - MAX_PRINTED_SAMPLES));
    }
    out
}

/// Offset search trace, one line per transition.
pub fn format_trace(trace: &[SearchStep]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>5} {:>16} {:>12} {:>12} {:>12} {:>16} {:<9}\n",
        "iter", "trial_c", "step", "error", "min_error", "c", "outcome"
    ));
    for row in trace {
        let error = row
            .error
            .map(|e| format!("{e:.5e}"))
            .unwrap_or_else(|| "-".to_string());
        out.push_str(&format!(
            "{:>5} {:>16} {:>12.4e} {:>12} {:>12.5e} {:>16} {:<9}\n",
            row.iteration,
            fmt_num(row.trial_c),
            row.step,
            error,
            row.min_error,
            fmt_num(row.c),
            outcome_label(row.outcome)
        ));
    }
    out
}

fn outcome_label(outcome: StepOutcome) -> &'static str {
    match outcome {
        StepOutcome::Initial => "initial",
        StepOutcome::Accepted => "accepted",
        StepOutcome::Reversed => "reversed",
        StepOutcome::Guarded => "guarded",
    }
}

/// Fixed precision for ordinary magnitudes, scientific otherwise.
fn fmt_num(v: f64) -> String {
    let a = v.abs();
    if v == 0.0 || (1e-4..1e6).contains(&a) {
        format!("{v:.6}")
    } else {
        format!("{v:.6e}")
    }
}
