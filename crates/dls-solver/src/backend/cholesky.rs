//! Sparse Cholesky backend using `nalgebra_sparse::factorization`.
//!
//! Only symmetric positive definite matrices are accepted. Symmetry is
//! checked in the symbolic phase, positive definiteness in the numeric one.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;
use nalgebra_sparse::factorization::{CscCholesky, CscSymbolicCholesky};

use super::traits::{Analysis, DirectSolver, Factorization, Symbolic};
use crate::error::{DlsError, Result};
use crate::matrix::CrsMatrix;
use crate::params::SolverParams;

/// Relative tolerance for the symmetry check, scaled by `‖A‖∞`.
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Sparse Cholesky `A = L Lᵀ`.
pub struct Cholesky;

impl DirectSolver for Cholesky {
    fn name(&self) -> &'static str {
        "cholesky"
    }

    fn symbolic(&self, matrix: &CrsMatrix, _params: &SolverParams) -> Result<Symbolic> {
        let tol = SYMMETRY_TOLERANCE * matrix.norm_inf().max(1.0);
        if !matrix.is_symmetric(tol) {
            return Err(DlsError::UnsupportedStructure {
                solver: self.name(),
                reason: "matrix is not symmetric".into(),
            });
        }

        let csc = CscMatrix::from(matrix.csr());
        let symbolic = CscSymbolicCholesky::factor(csc.pattern().clone());
        let l_nnz = symbolic.l_pattern().nnz();
        log::debug!("cholesky: predicted {l_nnz} entries in L");

        Ok(Symbolic {
            predicted_factor_nnz: Some(l_nnz),
            analysis: Analysis::Cholesky(symbolic),
        })
    }

    fn numeric(
        &self,
        matrix: &CrsMatrix,
        symbolic: &Symbolic,
        _params: &SolverParams,
    ) -> Result<Box<dyn Factorization>> {
        let Analysis::Cholesky(analysis) = &symbolic.analysis else {
            return Err(DlsError::Sparse(
                "cholesky numeric phase needs a cholesky symbolic analysis".into(),
            ));
        };

        // Same pattern as in the symbolic phase, so the values line up.
        let csc = CscMatrix::from(matrix.csr());
        let factor = CscCholesky::factor_numerical(analysis.clone(), csc.values())
            .map_err(|_| DlsError::NotPositiveDefinite)?;
        Ok(Box::new(CholeskyFactors { factor }))
    }
}

struct CholeskyFactors {
    factor: CscCholesky<f64>,
}

impl Factorization for CholeskyFactors {
    fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>> {
        let n = self.factor.l().nrows();
        if rhs.len() != n {
            return Err(DlsError::LengthMismatch {
                what: "right-hand side",
                expected: n,
                found: rhs.len(),
            });
        }
        let b = DMatrix::from_column_slice(n, 1, rhs.as_slice());
        let x = self.factor.solve(&b);
        Ok(x.column(0).into_owned())
    }

    fn factor_nnz(&self) -> Option<usize> {
        Some(self.factor.l().nnz())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{banded_spd, laplace_1d};
    use crate::map::RowMap;
    use crate::matrix::CrsMatrixBuilder;

    #[test]
    fn cholesky_solves_banded_spd() {
        let a = banded_spd(&RowMap::serial(12), 3).unwrap();
        let params = SolverParams::default();
        let symbolic = Cholesky.symbolic(&a, &params).unwrap();
        let factors = Cholesky.numeric(&a, &symbolic, &params).unwrap();

        let exact = DVector::from_fn(12, |i, _| (i as f64).sin());
        let rhs = a.to_dense() * &exact;
        let x = factors.solve(&rhs).unwrap();
        assert!((x - exact).norm() < 1e-10);
        assert_eq!(symbolic.predicted_factor_nnz, factors.factor_nnz());
    }

    #[test]
    fn cholesky_rejects_nonsymmetric_matrix() {
        let map = RowMap::serial(2);
        let mut b = CrsMatrixBuilder::new(&map);
        b.insert_global_values(0, &[0, 1], &[2.0, 1.0]).unwrap();
        b.insert_global_values(1, &[1], &[2.0]).unwrap();
        let a = b.fill_complete().unwrap();

        let err = Cholesky.symbolic(&a, &SolverParams::default()).unwrap_err();
        assert!(matches!(
            err,
            DlsError::UnsupportedStructure {
                solver: "cholesky",
                ..
            }
        ));
    }

    #[test]
    fn cholesky_rejects_indefinite_matrix() {
        // Negated Laplacian is symmetric negative definite.
        let laplace = laplace_1d(&RowMap::serial(4)).unwrap();
        let map = laplace.map().clone();
        let mut b = CrsMatrixBuilder::new(&map);
        for i in 0..4 {
            let (cols, vals): (Vec<usize>, Vec<f64>) =
                laplace.row(i).into_iter().map(|(j, v)| (j, -v)).unzip();
            b.insert_global_values(i, &cols, &vals).unwrap();
        }
        let a = b.fill_complete().unwrap();

        let params = SolverParams::default();
        let symbolic = Cholesky.symbolic(&a, &params).unwrap();
        let err = Cholesky.numeric(&a, &symbolic, &params).err().expect("indefinite");
        assert!(matches!(err, DlsError::NotPositiveDefinite));
    }

    #[test]
    fn numeric_phase_reuses_symbolic_pattern() {
        let a = laplace_1d(&RowMap::serial(6)).unwrap();
        let params = SolverParams::default();
        let symbolic = Cholesky.symbolic(&a, &params).unwrap();
        assert!(matches!(symbolic.analysis, Analysis::Cholesky(_)));

        let first = Cholesky.numeric(&a, &symbolic, &params).unwrap();
        let second = Cholesky.numeric(&a, &symbolic, &params).unwrap();
        assert_eq!(first.factor_nnz(), second.factor_nnz());

        let err = Cholesky
            .numeric(&a, &Symbolic::structural(None), &params)
            .err()
            .expect("structure-only analysis");
        assert!(matches!(err, DlsError::Sparse(_)));
    }
}
