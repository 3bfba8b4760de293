//! Sparse LU backend using faer.
//!
//! The symbolic phase computes faer's fill-reducing ordering and symbolic
//! factorization once per pattern; the numeric phase reuses it. faer picks
//! between simplicial and supernodal kernels on its own.

use faer::Mat;
use faer::prelude::SpSolver;
use faer::sparse::SparseColMat;
use faer::sparse::linalg::solvers::{Lu, SymbolicLu};
use nalgebra::DVector;

use super::traits::{Analysis, DirectSolver, Factorization, Symbolic};
use crate::error::{DlsError, Result};
use crate::matrix::CrsMatrix;
use crate::params::SolverParams;

/// Sparse LU with partial pivoting backed by `faer::sparse::linalg`.
pub struct SparseLu;

/// Copies the matrix into faer's compressed-column format.
fn to_faer(matrix: &CrsMatrix) -> Result<SparseColMat<usize, f64>> {
    let triplets: Vec<(usize, usize, f64)> = matrix
        .csr()
        .triplet_iter()
        .map(|(i, j, &v)| (i, j, v))
        .collect();
    SparseColMat::<usize, f64>::try_new_from_triplets(
        matrix.num_rows(),
        matrix.num_cols(),
        &triplets,
    )
    .map_err(|err| DlsError::Sparse(format!("faer matrix creation failed: {err:?}")))
}

impl DirectSolver for SparseLu {
    fn name(&self) -> &'static str {
        "sparse-lu"
    }

    fn symbolic(&self, matrix: &CrsMatrix, _params: &SolverParams) -> Result<Symbolic> {
        let mat = to_faer(matrix)?;
        let symbolic = SymbolicLu::try_new(mat.symbolic())
            .map_err(|err| DlsError::Sparse(format!("faer symbolic LU failed: {err:?}")))?;
        log::debug!("sparse-lu: symbolic analysis of {} columns", matrix.num_cols());

        Ok(Symbolic {
            predicted_factor_nnz: None,
            analysis: Analysis::SparseLu(symbolic),
        })
    }

    fn numeric(
        &self,
        matrix: &CrsMatrix,
        symbolic: &Symbolic,
        _params: &SolverParams,
    ) -> Result<Box<dyn Factorization>> {
        let Analysis::SparseLu(analysis) = &symbolic.analysis else {
            return Err(DlsError::Sparse(
                "sparse-lu numeric phase needs a sparse-lu symbolic analysis".into(),
            ));
        };

        let mat = to_faer(matrix)?;
        // faer reports a numerically singular matrix through the factorization
        // error or, for an exact zero pivot, through non-finite solutions.
        let lu = Lu::try_new_with_symbolic(analysis.clone(), mat.as_ref()).map_err(|err| {
            log::debug!("sparse-lu: numeric factorization failed: {err:?}");
            DlsError::Singular
        })?;

        Ok(Box::new(LuFactors {
            n: matrix.num_rows(),
            lu,
        }))
    }
}

struct LuFactors {
    n: usize,
    lu: Lu<usize, f64>,
}

impl Factorization for LuFactors {
    fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>> {
        if rhs.len() != self.n {
            return Err(DlsError::LengthMismatch {
                what: "right-hand side",
                expected: self.n,
                found: rhs.len(),
            });
        }

        let b = Mat::from_fn(self.n, 1, |i, _| rhs[i]);
        let x = self.lu.solve(&b);
        let x = DVector::from_fn(self.n, |i, _| x[(i, 0)]);
        if x.iter().any(|v| !v.is_finite()) {
            return Err(DlsError::Singular);
        }
        Ok(x)
    }

    fn factor_nnz(&self) -> Option<usize> {
        None
    }
}
