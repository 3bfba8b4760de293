//! Solver parameters.
//!
//! All direct solvers share one typed parameter set. Parameters are
//! validated when they are built or deserialized, so a [`SolverParams`]
//! value held by a solver handle is always usable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DlsError, Result};

/// Default absolute pivot threshold.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-14;

/// Options understood by every direct solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverParams {
    /// Report the time spent in each phase after solving
    pub print_timing: bool,
    /// Report problem size, factor fill and call counts after solving
    pub print_status: bool,
    /// Compute ‖b − A·x‖₂ after solving
    pub compute_true_residual: bool,
    /// Record ‖x‖₂ and ‖b‖₂ after solving
    pub compute_vector_norms: bool,
    /// Pivots with magnitude at or below this value are treated as zero
    /// (dense LU)
    pub pivot_tolerance: f64,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            print_timing: false,
            print_status: false,
            compute_true_residual: false,
            compute_vector_norms: false,
            pivot_tolerance: DEFAULT_PIVOT_TOLERANCE,
        }
    }
}

impl SolverParams {
    /// Timing and status reports switched on.
    pub fn verbose() -> Self {
        Self {
            print_timing: true,
            print_status: true,
            ..Default::default()
        }
    }

    pub fn builder() -> SolverParamsBuilder {
        SolverParamsBuilder::default()
    }

    /// Parses and validates a JSON object. Unknown keys are rejected.
    pub fn from_json(text: &str) -> Result<Self> {
        let params: SolverParams = serde_json::from_str(text)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.pivot_tolerance.is_finite() || self.pivot_tolerance < 0.0 {
            return Err(DlsError::InvalidParameter {
                name: "pivot_tolerance",
                reason: format!("must be finite and non-negative, got {}", self.pivot_tolerance),
            });
        }
        Ok(())
    }
}

/// Builder for [`SolverParams`]; `build` validates.
#[derive(Debug, Clone, Default)]
pub struct SolverParamsBuilder {
    params: SolverParams,
}

impl SolverParamsBuilder {
    pub fn print_timing(mut self, on: bool) -> Self {
        self.params.print_timing = on;
        self
    }

    pub fn print_status(mut self, on: bool) -> Self {
        self.params.print_status = on;
        self
    }

    pub fn compute_true_residual(mut self, on: bool) -> Self {
        self.params.compute_true_residual = on;
        self
    }

    pub fn compute_vector_norms(mut self, on: bool) -> Self {
        self.params.compute_vector_norms = on;
        self
    }

    pub fn pivot_tolerance(mut self, tol: f64) -> Self {
        self.params.pivot_tolerance = tol;
        self
    }

    pub fn build(self) -> Result<SolverParams> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = SolverParams::default();
        assert!(!params.print_timing);
        assert!(!params.print_status);
        assert_eq!(params.pivot_tolerance, DEFAULT_PIVOT_TOLERANCE);
    }

    #[test]
    fn test_verbose_preset() {
        let params = SolverParams::verbose();
        assert!(params.print_timing);
        assert!(params.print_status);
        assert!(!params.compute_true_residual);
    }

    #[test]
    fn test_json_partial_object_keeps_defaults() {
        let params = SolverParams::from_json(
            r#"{ "print_timing": true, "compute_true_residual": true }"#,
        )
        .unwrap();
        assert!(params.print_timing);
        assert!(!params.print_status);
        assert!(params.compute_true_residual);
    }

    #[test]
    fn test_json_unknown_key_is_rejected() {
        let err = SolverParams::from_json(r#"{ "PrintTiming": true }"#).unwrap_err();
        assert!(matches!(err, DlsError::Json(_)));
    }

    #[test]
    fn test_invalid_pivot_tolerance() {
        assert!(SolverParams::builder().pivot_tolerance(-1.0).build().is_err());
        assert!(SolverParams::builder().pivot_tolerance(f64::NAN).build().is_err());
        assert!(SolverParams::from_json(r#"{ "pivot_tolerance": -0.5 }"#).is_err());

        let ok = SolverParams::builder()
            .print_status(true)
            .pivot_tolerance(0.0)
            .build()
            .unwrap();
        assert!(ok.print_status);
    }
}
