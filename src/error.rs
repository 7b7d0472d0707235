//! Error types.
//!
//! - `FitError`: typed failure of a single fit invocation (library surface)
//! - `AppError`: message + process exit code for the `expfit` binary

use std::fmt;

use thiserror::Error;

/// Component of the fitting pipeline where a domain violation was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStage {
    Estimate,
    Regress,
    Evaluate,
    Search,
}

impl fmt::Display for FitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FitStage::Estimate => "initial estimate",
            FitStage::Regress => "linear regression",
            FitStage::Evaluate => "fit evaluation",
            FitStage::Search => "offset search",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while fitting `y = a·e^(b·x) + c`.
///
/// All variants are fatal for the current fit; nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    /// `x` and `y` have different lengths, or there are too few samples.
    #[error("Shape error: {detail}")]
    Shape {
        /// Human-readable description of the mismatch.
        detail: String,
    },

    /// An input value is NaN or infinite.
    #[error("Non-finite input: {axis}[{index}] = {value}")]
    NonFinite {
        axis: &'static str,
        index: usize,
        value: f64,
    },

    /// A logarithm or division received a non-positive/zero argument, or an
    /// intermediate value became non-finite.
    #[error("Domain error during {stage}: {detail}")]
    Domain { stage: FitStage, detail: String },

    /// The offset search hit its iteration ceiling before the step shrank below
    /// the tolerance.
    #[error("Offset search did not converge after {iterations} iterations (step = {step:e})")]
    Convergence {
        /// Iterations performed.
        iterations: usize,
        /// Step size when the ceiling was reached.
        step: f64,
    },

    /// Rejected `FitOptions`.
    #[error("Invalid fit options: {0}")]
    InvalidOptions(String),
}

impl FitError {
    pub(crate) fn shape(detail: impl Into<String>) -> Self {
        FitError::Shape {
            detail: detail.into(),
        }
    }

    pub(crate) fn domain(stage: FitStage, detail: impl Into<String>) -> Self {
        FitError::Domain {
            stage,
            detail: detail.into(),
        }
    }

    /// Exit code used by the binary for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::Shape { .. } | FitError::NonFinite { .. } => 3,
            FitError::Domain { .. } | FitError::Convergence { .. } => 4,
            FitError::InvalidOptions(_) => 2,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), format!("Fit failed: {err}"))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_error_maps_to_exit_codes() {
        let shape: AppError = FitError::shape("x has 3 values, y has 4").into();
        assert_eq!(shape.exit_code(), 3);
        assert!(shape.to_string().contains("x has 3 values"));

        let domain: AppError = FitError::domain(FitStage::Regress, "ln(0)").into();
        assert_eq!(domain.exit_code(), 4);
        assert!(domain.to_string().contains("linear regression"));

        let conv: AppError = FitError::Convergence {
            iterations: 10,
            step: 0.5,
        }
        .into();
        assert_eq!(conv.exit_code(), 4);
    }
}
