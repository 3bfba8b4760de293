//! Human-readable and JSON run reports.

use serde::{Deserialize, Serialize};

use crate::demo::DemoOutcome;

/// Formats like C's `%e`: six fractional digits and a signed exponent of at
/// least two digits (`1.234568e-15`, `0.000000e+00`).
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let formatted = format!("{value:.6e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.abs())
        }
        None => formatted,
    }
}

/// Machine-readable summary of one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub solver: String,
    pub supported: bool,
    pub n: usize,
    pub residual_l1: Option<f64>,
    pub matrix_nnz: Option<usize>,
    pub factor_nnz: Option<usize>,
    pub true_residual: Option<f64>,
    pub symbolic_seconds: Option<f64>,
    pub numeric_seconds: Option<f64>,
    pub solve_seconds: Option<f64>,
    /// RFC 3339 timestamp supplied by the caller
    pub generated_at: String,
}

impl RunReport {
    pub fn from_outcome(
        solver: &str,
        n: usize,
        outcome: &DemoOutcome,
        generated_at: String,
    ) -> Self {
        match outcome {
            DemoOutcome::Unsupported { .. } => Self {
                solver: solver.to_string(),
                supported: false,
                n,
                residual_l1: None,
                matrix_nnz: None,
                factor_nnz: None,
                true_residual: None,
                symbolic_seconds: None,
                numeric_seconds: None,
                solve_seconds: None,
                generated_at,
            },
            DemoOutcome::Solved(run) => Self {
                solver: solver.to_string(),
                supported: true,
                n,
                residual_l1: Some(run.residual_l1),
                matrix_nnz: Some(run.info.matrix_nnz),
                factor_nnz: run.info.factor_nnz,
                true_residual: run.info.true_residual,
                symbolic_seconds: Some(run.info.timings.symbolic.as_secs_f64()),
                numeric_seconds: Some(run.info.timings.numeric.as_secs_f64()),
                solve_seconds: Some(run.info.timings.solve.as_secs_f64()),
                generated_at,
            },
        }
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
