//! Backend trait definitions for direct solvers.
//!
//! A direct solver works in three phases:
//!
//! 1. **Symbolic**: depends only on the sparsity pattern (orderings, fill
//!    prediction, structural checks).
//! 2. **Numeric**: computes the factors from the matrix values.
//! 3. **Solve**: applies the factors to a right-hand side.
//!
//! The [`SolverHandle`](crate::handle::SolverHandle) drives these phases and
//! times them; backends only implement the math.

use std::fmt;
use std::time::Duration;

use faer::sparse::linalg::solvers::SymbolicLu;
use nalgebra::DVector;
use nalgebra_sparse::factorization::CscSymbolicCholesky;

use crate::error::Result;
use crate::matrix::CrsMatrix;
use crate::params::SolverParams;

const RULE: &str = "----------------------------------------------------------------";

/// Reusable output of a backend's symbolic analysis.
#[derive(Clone)]
pub enum Analysis {
    /// Structural checks only, nothing to carry into the numeric phase
    Structure,
    /// Elimination tree and factor pattern of `L`
    Cholesky(CscSymbolicCholesky),
    /// Fill-reducing ordering and symbolic LU from faer
    SparseLu(SymbolicLu<usize>),
}

impl fmt::Debug for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Analysis::Structure => f.write_str("Structure"),
            Analysis::Cholesky(_) => f.write_str("Cholesky(..)"),
            Analysis::SparseLu(_) => f.write_str("SparseLu(..)"),
        }
    }
}

/// Result of the symbolic phase.
#[derive(Debug, Clone)]
pub struct Symbolic {
    /// Stored entries expected in the factors, when the backend can tell
    pub predicted_factor_nnz: Option<usize>,
    pub analysis: Analysis,
}

impl Symbolic {
    /// Symbolic result of a backend that only checks structure.
    pub fn structural(predicted_factor_nnz: Option<usize>) -> Self {
        Self {
            predicted_factor_nnz,
            analysis: Analysis::Structure,
        }
    }
}

/// Numeric factors ready to be applied to right-hand sides.
pub trait Factorization {
    /// Solve `A x = b` with the stored factors.
    fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>>;

    /// Stored entries in the factors, when the backend exposes them.
    fn factor_nnz(&self) -> Option<usize>;
}

/// Trait for a direct solver backend.
pub trait DirectSolver: Send + Sync {
    /// Factory key of this backend.
    fn name(&self) -> &'static str;

    /// Structural analysis of `matrix`.
    fn symbolic(&self, matrix: &CrsMatrix, params: &SolverParams) -> Result<Symbolic>;

    /// Numeric factorization reusing the result of [`symbolic`](Self::symbolic).
    fn numeric(
        &self,
        matrix: &CrsMatrix,
        symbolic: &Symbolic,
        params: &SolverParams,
    ) -> Result<Box<dyn Factorization>>;
}

/// Wall-clock time spent in each phase, accumulated over calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimings {
    pub symbolic: Duration,
    pub numeric: Duration,
    pub solve: Duration,
}

impl PhaseTimings {
    pub fn total(&self) -> Duration {
        self.symbolic + self.numeric + self.solve
    }
}

/// How many times each phase ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhaseCalls {
    pub symbolic: usize,
    pub numeric: usize,
    pub solve: usize,
}

/// Solver diagnostics returned by a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveInfo {
    /// Factory key of the solver that produced the solution
    pub solver_name: String,
    pub num_rows: usize,
    pub matrix_nnz: usize,
    /// Factor entries predicted by the symbolic phase
    pub predicted_factor_nnz: Option<usize>,
    pub factor_nnz: Option<usize>,
    pub timings: PhaseTimings,
    pub calls: PhaseCalls,
    /// ‖b − A·x‖₂, when requested
    pub true_residual: Option<f64>,
    /// ‖x‖₂, when requested
    pub lhs_norm: Option<f64>,
    /// ‖b‖₂, when requested
    pub rhs_norm: Option<f64>,
}

impl SolveInfo {
    /// Status block: problem size, fill and call counts.
    pub fn status_report(&self) -> String {
        let name = &self.solver_name;
        let mut lines = vec![
            RULE.to_string(),
            format!(
                "{name} : Matrix has {} rows and {} nonzeros",
                self.num_rows, self.matrix_nnz
            ),
        ];
        if let Some(predicted) = self.predicted_factor_nnz {
            lines.push(format!("{name} : Symbolic analysis predicts {predicted} factor nonzeros"));
        }
        if let Some(factor_nnz) = self.factor_nnz {
            let fill = if self.matrix_nnz > 0 {
                factor_nnz as f64 / self.matrix_nnz as f64
            } else {
                0.0
            };
            lines.push(format!(
                "{name} : Factors have {factor_nnz} nonzeros (fill ratio {fill:.2})"
            ));
        }
        lines.push(format!(
            "{name} : Symbolic calls = {}, numeric calls = {}, solve calls = {}",
            self.calls.symbolic, self.calls.numeric, self.calls.solve
        ));
        if let Some(residual) = self.true_residual {
            lines.push(format!("{name} : ||b - A x||_2 = {residual:e}"));
        }
        if let (Some(x), Some(b)) = (self.lhs_norm, self.rhs_norm) {
            lines.push(format!("{name} : ||x||_2 = {x:e}, ||b||_2 = {b:e}"));
        }
        lines.push(RULE.to_string());
        lines.join("\n")
    }

    /// Timing block: seconds spent in each phase.
    pub fn timing_report(&self) -> String {
        let name = &self.solver_name;
        let t = &self.timings;
        [
            RULE.to_string(),
            format!(
                "{name} : Time for symbolic factorization = {:.6e} (s)",
                t.symbolic.as_secs_f64()
            ),
            format!(
                "{name} : Time for numeric factorization  = {:.6e} (s)",
                t.numeric.as_secs_f64()
            ),
            format!(
                "{name} : Time for solve                  = {:.6e} (s)",
                t.solve.as_secs_f64()
            ),
            format!(
                "{name} : Total time                      = {:.6e} (s)",
                t.total().as_secs_f64()
            ),
            RULE.to_string(),
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_info() -> SolveInfo {
        SolveInfo {
            solver_name: "sparse-lu".to_string(),
            num_rows: 10,
            matrix_nnz: 28,
            predicted_factor_nnz: Some(28),
            factor_nnz: Some(28),
            timings: PhaseTimings::default(),
            calls: PhaseCalls {
                symbolic: 1,
                numeric: 1,
                solve: 1,
            },
            true_residual: Some(0.0),
            lhs_norm: None,
            rhs_norm: None,
        }
    }

    #[test]
    fn status_report_mentions_size_and_fill() {
        let report = sample_info().status_report();
        assert!(report.contains("Matrix has 10 rows and 28 nonzeros"));
        assert!(report.contains("predicts 28 factor nonzeros"));
        assert!(report.contains("fill ratio 1.00"));
        assert!(report.contains("||b - A x||_2"));
        assert!(!report.contains("||x||_2"));
    }

    #[test]
    fn timing_report_has_one_line_per_phase() {
        let report = sample_info().timing_report();
        assert!(report.contains("symbolic factorization"));
        assert!(report.contains("numeric factorization"));
        assert!(report.contains("Time for solve"));
        assert!(report.contains("Total time"));
    }

    #[test]
    fn status_report_skips_unknown_factor_sizes() {
        let info = SolveInfo {
            predicted_factor_nnz: None,
            factor_nnz: None,
            ..sample_info()
        };
        let report = info.status_report();
        assert!(!report.contains("predicts"));
        assert!(!report.contains("fill ratio"));
        assert!(report.contains("solve calls = 1"));
    }

    #[test]
    fn structural_symbolic_carries_no_analysis() {
        let symbolic = Symbolic::structural(Some(4));
        assert_eq!(symbolic.predicted_factor_nnz, Some(4));
        assert!(matches!(symbolic.analysis, Analysis::Structure));
    }
}
