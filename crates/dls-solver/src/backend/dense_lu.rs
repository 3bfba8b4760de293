//! Dense LU backend using nalgebra.
//!
//! Expands the sparse matrix into a dense one and factors it with partial
//! pivoting. Suitable for small systems (a few thousand unknowns at most).

use nalgebra::linalg::LU;
use nalgebra::{DVector, Dyn};

use super::traits::{DirectSolver, Factorization, Symbolic};
use crate::error::{DlsError, Result};
use crate::matrix::CrsMatrix;
use crate::params::SolverParams;

/// Dense LU solver backed by `nalgebra::linalg::LU`.
pub struct DenseLu;

impl DirectSolver for DenseLu {
    fn name(&self) -> &'static str {
        "dense-lu"
    }

    fn symbolic(&self, matrix: &CrsMatrix, _params: &SolverParams) -> Result<Symbolic> {
        let n = matrix.num_rows();
        Ok(Symbolic::structural(Some(n * n)))
    }

    fn numeric(
        &self,
        matrix: &CrsMatrix,
        _symbolic: &Symbolic,
        params: &SolverParams,
    ) -> Result<Box<dyn Factorization>> {
        let lu = matrix.to_dense().lu();

        let u = lu.u();
        if let Some(column) = (0..u.nrows()).find(|&i| u[(i, i)].abs() <= params.pivot_tolerance) {
            return Err(DlsError::SingularMatrix { column });
        }

        Ok(Box::new(DenseFactors { lu }))
    }
}

struct DenseFactors {
    lu: LU<f64, Dyn, Dyn>,
}

impl Factorization for DenseFactors {
    fn solve(&self, rhs: &DVector<f64>) -> Result<DVector<f64>> {
        let n = self.lu.l().nrows();
        if rhs.len() != n {
            return Err(DlsError::LengthMismatch {
                what: "right-hand side",
                expected: n,
                found: rhs.len(),
            });
        }
        self.lu.solve(rhs).ok_or(DlsError::Singular)
    }

    fn factor_nnz(&self) -> Option<usize> {
        let n = self.lu.l().nrows();
        Some(n * n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::RowMap;
    use crate::matrix::CrsMatrixBuilder;

    fn build(n: usize, entries: &[(usize, usize, f64)]) -> CrsMatrix {
        let map = RowMap::serial(n);
        let mut b = CrsMatrixBuilder::new(&map);
        for &(i, j, v) in entries {
            b.insert_global_values(i, &[j], &[v]).unwrap();
        }
        b.fill_complete().unwrap()
    }

    #[test]
    fn dense_lu_solve_trivial() {
        // Solve: [2 0; 0 3] * [x; y] = [4; 9]
        let a = build(2, &[(0, 0, 2.0), (1, 1, 3.0)]);
        let params = SolverParams::default();
        let symbolic = DenseLu.symbolic(&a, &params).unwrap();
        let factors = DenseLu.numeric(&a, &symbolic, &params).unwrap();
        let x = factors.solve(&DVector::from_vec(vec![4.0, 9.0])).unwrap();
        assert!((x[0] - 2.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
        assert_eq!(factors.factor_nnz(), Some(4));
    }

    #[test]
    fn dense_lu_solve_3x3() {
        // K = [4 -1 0; -1 4 -1; 0 -1 4], F = [1; 2; 1]
        let a = build(
            3,
            &[
                (0, 0, 4.0),
                (0, 1, -1.0),
                (1, 0, -1.0),
                (1, 1, 4.0),
                (1, 2, -1.0),
                (2, 1, -1.0),
                (2, 2, 4.0),
            ],
        );
        let params = SolverParams::default();
        let symbolic = DenseLu.symbolic(&a, &params).unwrap();
        let factors = DenseLu.numeric(&a, &symbolic, &params).unwrap();
        let f = DVector::from_vec(vec![1.0, 2.0, 1.0]);
        let u = factors.solve(&f).unwrap();

        let check = a.to_dense() * &u;
        for i in 0..3 {
            assert!((check[i] - f[i]).abs() < 1e-10, "Residual too large at row {i}");
        }
    }

    #[test]
    fn dense_lu_detects_singular_matrix() {
        let a = build(2, &[(0, 0, 1.0), (0, 1, 2.0), (1, 0, 2.0), (1, 1, 4.0)]);
        let params = SolverParams::default();
        let symbolic = DenseLu.symbolic(&a, &params).unwrap();
        let err = DenseLu.numeric(&a, &symbolic, &params).err().expect("singular");
        assert!(matches!(err, DlsError::SingularMatrix { column: 1 }));
    }
}
