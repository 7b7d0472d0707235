//! One-dimensional search for the offset `c`.
//!
//! `c` enters the model only through `y_i - c`, so it can never cross an
//! observed y value without breaking the logarithm. The search therefore
//! walks from the seed towards the data with a step that is:
//!
//! - kept when the candidate improves the score,
//! - reversed and halved when it does not,
//! - halved (same direction, no scoring) when the candidate falls inside
//!   `[min(y), max(y)]`.
//!
//! It converges once `|step| <= step_tolerance`.

use tracing::{debug, trace};

use crate::domain::{FitOptions, InitialEstimate, Samples, SearchStep, StepOutcome};
use crate::error::{FitError, FitStage};
use crate::fit::regress::evaluate;

/// Converged offset and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub c: f64,
    pub error: f64,
    /// Transitions performed, guard rejections included.
    pub iterations: usize,
    /// Empty unless `FitOptions::record_trace` is set.
    pub trace: Vec<SearchStep>,
}

/// Refine the seed offset by decaying-step search.
pub fn search_offset(
    samples: &Samples,
    initial: &InitialEstimate,
    opts: &FitOptions,
) -> Result<SearchOutcome, FitError> {
    let sign = initial.sign();
    let (y_min, y_max) = samples.y_range();

    if (y_min..=y_max).contains(&initial.c) {
        return Err(FitError::domain(
            FitStage::Search,
            format!("seed offset {} lies inside the data range [{y_min}, {y_max}]", initial.c),
        ));
    }

    let mut c = initial.c;
    let mut step = if sign > 0.0 { y_min - c } else { y_max - c };
    let mut min_error = evaluate(samples, c, sign, opts.metric)?;
    let mut iterations = 0usize;

    let mut steps = Vec::new();
    let mut record = |row: SearchStep| {
        if opts.record_trace {
            steps.push(row);
        }
    };
    record(SearchStep {
        iteration: 0,
        trial_c: c,
        step,
        error: Some(min_error),
        min_error,
        c,
        outcome: StepOutcome::Initial,
    });
    debug!(c, step, error = min_error, "offset search start");

    while step.abs() > opts.step_tolerance {
        if iterations >= opts.max_iterations {
            return Err(FitError::Convergence { iterations, step });
        }
        iterations += 1;

        let trial_c = c + step;
        let tried_step = step;

        if (y_min..=y_max).contains(&trial_c) {
            trace!(iteration = iterations, trial_c, y_min, y_max, "candidate inside data range");
            step /= 2.0;
            record(SearchStep {
                iteration: iterations,
                trial_c,
                step: tried_step,
                error: None,
                min_error,
                c,
                outcome: StepOutcome::Guarded,
            });
            continue;
        }

        let error = evaluate(samples, trial_c, sign, opts.metric)?;
        let outcome = if error < min_error {
            c = trial_c;
            min_error = error;
            StepOutcome::Accepted
        } else {
            step = -step / 2.0;
            StepOutcome::Reversed
        };

        debug!(
            iteration = iterations,
            trial_c,
            step = tried_step,
            error,
            min_error,
            ?outcome,
            "offset search step"
        );
        record(SearchStep {
            iteration: iterations,
            trial_c,
            step: tried_step,
            error: Some(error),
            min_error,
            c,
            outcome,
        });
    }

    Ok(SearchOutcome {
        c,
        error: min_error,
        iterations,
        trace: steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::initial_estimate;

    fn exact(n: usize, a: f64, b: f64, c: f64) -> Samples {
        let y = (0..n).map(|i| a * (b * i as f64).exp() + c).collect();
        Samples::from_y(y).unwrap()
    }

    #[test]
    fn converges_to_true_offset() {
        let s = exact(5, 1.0, 1.0, 0.0);
        let seed = initial_estimate(&s).unwrap();
        let out = search_offset(&s, &seed, &FitOptions::default()).unwrap();
        assert!(out.c.abs() < 1e-6);
        assert!(out.iterations > 0);
        assert!(out.trace.is_empty());
    }

    #[test]
    fn guard_rejects_candidates_inside_range() {
        let s = exact(5, 1.0, 1.0, 0.0);
        let seed = initial_estimate(&s).unwrap();
        let opts = FitOptions {
            record_trace: true,
            ..FitOptions::default()
        };
        let out = search_offset(&s, &seed, &opts).unwrap();
        let (lo, hi) = s.y_range();

        // The very first candidate is exactly min(y).
        assert_eq!(out.trace[1].outcome, StepOutcome::Guarded);

        for row in &out.trace {
            if row.outcome == StepOutcome::Guarded {
                assert!(row.trial_c >= lo && row.trial_c <= hi);
                assert!(row.error.is_none());
            }
            assert!(row.c < lo || row.c > hi, "current c {} inside [{lo}, {hi}]", row.c);
        }
    }

    #[test]
    fn iteration_ceiling_yields_convergence_error() {
        let s = exact(5, 1.0, 1.0, 0.0);
        let seed = initial_estimate(&s).unwrap();
        let opts = FitOptions {
            max_iterations: 3,
            ..FitOptions::default()
        };
        let err = search_offset(&s, &seed, &opts).unwrap_err();
        assert!(matches!(err, FitError::Convergence { iterations: 3, .. }));
    }

    #[test]
    fn seed_inside_data_range_is_a_domain_error() {
        let s = exact(5, 1.0, 1.0, 0.0);
        let seed = InitialEstimate { a: 1.0, b: 1.0, c: 3.0 };
        assert!(matches!(
            search_offset(&s, &seed, &FitOptions::default()),
            Err(FitError::Domain { stage: FitStage::Search, .. })
        ));
    }
}
