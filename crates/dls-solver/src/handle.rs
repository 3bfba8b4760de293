//! Solver handles: a backend bound to one linear problem.
//!
//! A handle is acquired from [`SolverFactory::create`](crate::SolverFactory::create)
//! and released when it is dropped, on success and error paths alike.

use std::time::Instant;

use crate::backend::{
    DirectSolver, Factorization, PhaseCalls, PhaseTimings, SolveInfo, SolverKind, Symbolic,
};
use crate::error::{DlsError, Result};
use crate::params::SolverParams;
use crate::problem::LinearProblem;
use crate::verify;

/// A direct solver bound to a [`LinearProblem`].
pub struct SolverHandle<'a> {
    kind: SolverKind,
    backend: Box<dyn DirectSolver>,
    problem: LinearProblem<'a>,
    params: SolverParams,
    symbolic: Option<Symbolic>,
    factors: Option<Box<dyn Factorization>>,
    timings: PhaseTimings,
    calls: PhaseCalls,
}

impl<'a> SolverHandle<'a> {
    /// Binds `kind` to `problem` after checking that the problem is solvable
    /// by a serial direct solver.
    pub fn new(kind: SolverKind, problem: LinearProblem<'a>) -> Result<Self> {
        problem.check_input()?;
        if problem.matrix().map().is_distributed() {
            return Err(DlsError::DistributedUnsupported);
        }

        log::info!(
            "acquired {} solver for a {} x {} system",
            kind,
            problem.matrix().num_rows(),
            problem.matrix().num_cols()
        );

        Ok(Self {
            kind,
            backend: kind.backend(),
            problem,
            params: SolverParams::default(),
            symbolic: None,
            factors: None,
            timings: PhaseTimings::default(),
            calls: PhaseCalls::default(),
        })
    }

    pub fn kind(&self) -> SolverKind {
        self.kind
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Replaces the parameters. Cached phases are dropped when the
    /// parameters change.
    pub fn set_parameters(&mut self, params: SolverParams) -> Result<()> {
        params.validate()?;
        if params != self.params {
            self.symbolic = None;
            self.factors = None;
        }
        self.params = params;
        Ok(())
    }

    pub fn problem(&self) -> &LinearProblem<'a> {
        &self.problem
    }

    /// Runs the symbolic phase and discards any numeric factors.
    pub fn symbolic_factorization(&mut self) -> Result<()> {
        let symbolic = self.run_symbolic()?;
        self.symbolic = Some(symbolic);
        self.factors = None;
        Ok(())
    }

    /// Runs the numeric phase, reusing the cached symbolic analysis.
    pub fn numeric_factorization(&mut self) -> Result<()> {
        let factors = self.run_numeric()?;
        self.factors = Some(factors);
        Ok(())
    }

    /// Solves the bound problem, overwriting its solution vector in place.
    ///
    /// Missing symbolic and numeric phases run first.
    pub fn solve(&mut self) -> Result<SolveInfo> {
        let factors = match self.factors.take() {
            Some(factors) => factors,
            None => self.run_numeric()?,
        };

        let start = Instant::now();
        let outcome = factors.solve(self.problem.rhs().values());
        self.timings.solve += start.elapsed();
        self.calls.solve += 1;
        let factor_nnz = factors.factor_nnz();
        self.factors = Some(factors);

        self.problem.lhs_mut().assign(&outcome?)?;

        let matrix = self.problem.matrix();
        let true_residual = if self.params.compute_true_residual {
            Some(verify::true_residual(matrix, self.problem.lhs(), self.problem.rhs())?)
        } else {
            None
        };
        let (lhs_norm, rhs_norm) = if self.params.compute_vector_norms {
            (Some(self.problem.lhs().norm2()), Some(self.problem.rhs().norm2()))
        } else {
            (None, None)
        };

        log::debug!(
            "{}: solve finished in {:.3e} s",
            self.kind,
            self.timings.solve.as_secs_f64()
        );

        Ok(SolveInfo {
            solver_name: self.kind.key().to_string(),
            num_rows: matrix.num_rows(),
            matrix_nnz: matrix.nnz(),
            predicted_factor_nnz: self.symbolic.as_ref().and_then(|s| s.predicted_factor_nnz),
            factor_nnz,
            timings: self.timings,
            calls: self.calls,
            true_residual,
            lhs_norm,
            rhs_norm,
        })
    }

    fn run_symbolic(&mut self) -> Result<Symbolic> {
        let start = Instant::now();
        let symbolic = self.backend.symbolic(self.problem.matrix(), &self.params)?;
        self.timings.symbolic += start.elapsed();
        self.calls.symbolic += 1;
        Ok(symbolic)
    }

    fn run_numeric(&mut self) -> Result<Box<dyn Factorization>> {
        let symbolic = match self.symbolic.take() {
            Some(symbolic) => symbolic,
            None => self.run_symbolic()?,
        };

        let start = Instant::now();
        let factors = self
            .backend
            .numeric(self.problem.matrix(), &symbolic, &self.params);
        self.timings.numeric += start.elapsed();
        self.calls.numeric += 1;
        self.symbolic = Some(symbolic);
        factors
    }
}

impl Drop for SolverHandle<'_> {
    fn drop(&mut self) {
        log::info!(
            "released {} solver after {} solve(s)",
            self.kind,
            self.calls.solve
        );
    }
}
