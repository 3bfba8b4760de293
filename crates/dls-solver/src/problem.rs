//! Linear problems `A x = b` and manufactured right-hand sides.

use crate::error::{DlsError, Result};
use crate::matrix::CrsMatrix;
use crate::vector::Vector;

/// Borrowed view binding a matrix, a solution vector and a right-hand side.
///
/// The solution (`lhs`) is borrowed mutably so that a solver can overwrite it
/// in place.
#[derive(Debug)]
pub struct LinearProblem<'a> {
    matrix: &'a CrsMatrix,
    lhs: &'a mut Vector,
    rhs: &'a Vector,
}

impl<'a> LinearProblem<'a> {
    pub fn new(matrix: &'a CrsMatrix, lhs: &'a mut Vector, rhs: &'a Vector) -> Self {
        Self { matrix, lhs, rhs }
    }

    pub fn matrix(&self) -> &CrsMatrix {
        self.matrix
    }

    pub fn lhs(&self) -> &Vector {
        &*self.lhs
    }

    pub fn lhs_mut(&mut self) -> &mut Vector {
        &mut *self.lhs
    }

    pub fn rhs(&self) -> &Vector {
        self.rhs
    }

    /// Checks that the matrix is square and that all three objects share
    /// the same row map.
    pub fn check_input(&self) -> Result<()> {
        let map = self.matrix.map();
        if map.num_global() != self.matrix.num_cols() {
            return Err(DlsError::NotSquare {
                rows: map.num_global(),
                cols: self.matrix.num_cols(),
            });
        }
        if !self.lhs.map().same_as(map) {
            return Err(DlsError::MapMismatch("solution vector and matrix"));
        }
        if !self.rhs.map().same_as(map) {
            return Err(DlsError::MapMismatch("right-hand side and matrix"));
        }
        Ok(())
    }
}

/// Builds the right-hand side for a known exact solution.
///
/// Returns `(lhs, rhs)` with `rhs = A * exact` and `lhs` zeroed so that a
/// solver has to recompute it.
pub fn manufacture(matrix: &CrsMatrix, exact: &Vector) -> Result<(Vector, Vector)> {
    let mut lhs = exact.clone();
    let mut rhs = Vector::zeros(matrix.map());
    matrix.multiply(false, &lhs, &mut rhs)?;
    lhs.put_scalar(0.0);
    Ok((lhs, rhs))
}
