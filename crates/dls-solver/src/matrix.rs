//! Row-oriented sparse matrices over a row map.
//!
//! Assembly happens in two stages:
//!
//! 1. [`CrsMatrixBuilder`] collects `(column, value)` pairs per owned row in
//!    any order. Columns are not checked here.
//! 2. [`CrsMatrixBuilder::fill_complete`] validates every column, sums
//!    duplicate entries, sorts each row and freezes the result into a
//!    [`CrsMatrix`] backed by `nalgebra_sparse::CsrMatrix`.
//!
//! Once finalized the structure and values can no longer change.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CsrMatrix;

use crate::error::{DlsError, Result};
use crate::map::RowMap;
use crate::vector::Vector;

/// Insert-phase sparse matrix.
#[derive(Debug, Clone)]
pub struct CrsMatrixBuilder {
    map: RowMap,
    num_cols: usize,
    rows: Vec<Vec<(usize, f64)>>,
}

impl CrsMatrixBuilder {
    /// Square builder: one row per owned index, `map.num_global()` columns.
    pub fn new(map: &RowMap) -> Self {
        Self::with_columns(map, map.num_global())
    }

    pub fn with_columns(map: &RowMap, num_cols: usize) -> Self {
        Self {
            map: map.clone(),
            num_cols,
            rows: vec![Vec::new(); map.num_local()],
        }
    }

    /// Appends entries to a locally owned row.
    ///
    /// Out-of-range columns are accepted here and reported by
    /// [`fill_complete`](Self::fill_complete).
    pub fn insert_global_values(
        &mut self,
        row: usize,
        cols: &[usize],
        values: &[f64],
    ) -> Result<()> {
        if cols.len() != values.len() {
            return Err(DlsError::LengthMismatch {
                what: "row values",
                expected: cols.len(),
                found: values.len(),
            });
        }
        let local = self
            .map
            .local_index(row)
            .ok_or(DlsError::RowNotOwned { row })?;

        self.rows[local].extend(cols.iter().copied().zip(values.iter().copied()));
        Ok(())
    }

    /// Number of raw insertions so far, duplicates included.
    pub fn num_inserted(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Validates and freezes the matrix.
    pub fn fill_complete(self) -> Result<CrsMatrix> {
        let num_rows = self.map.num_local();
        let mut row_offsets = Vec::with_capacity(num_rows + 1);
        let mut col_indices = Vec::with_capacity(self.num_inserted());
        let mut values = Vec::with_capacity(self.num_inserted());
        row_offsets.push(0);

        for (local, mut entries) in self.rows.into_iter().enumerate() {
            let row = self.map.min_global() + local;
            if let Some(&(col, _)) = entries.iter().find(|(col, _)| *col >= self.num_cols) {
                return Err(DlsError::ColumnOutOfRange {
                    row,
                    col,
                    num_cols: self.num_cols,
                });
            }

            entries.sort_by_key(|&(col, _)| col);
            let row_start = col_indices.len();
            for (col, value) in entries {
                if col_indices.len() > row_start && col_indices.last() == Some(&col) {
                    if let Some(last) = values.last_mut() {
                        *last += value;
                    }
                } else {
                    col_indices.push(col);
                    values.push(value);
                }
            }
            row_offsets.push(col_indices.len());
        }

        let csr = CsrMatrix::try_from_csr_data(
            num_rows,
            self.num_cols,
            row_offsets,
            col_indices,
            values,
        )
        .map_err(|err| DlsError::Sparse(err.to_string()))?;

        log::debug!(
            "fill_complete: {} x {} matrix, {} stored entries",
            csr.nrows(),
            csr.ncols(),
            csr.nnz()
        );

        Ok(CrsMatrix { map: self.map, csr })
    }
}

/// Finalized compressed-row sparse matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CrsMatrix {
    map: RowMap,
    csr: CsrMatrix<f64>,
}

impl CrsMatrix {
    pub fn map(&self) -> &RowMap {
        &self.map
    }

    pub fn csr(&self) -> &CsrMatrix<f64> {
        &self.csr
    }

    pub fn num_rows(&self) -> usize {
        self.csr.nrows()
    }

    pub fn num_cols(&self) -> usize {
        self.csr.ncols()
    }

    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    pub fn is_square(&self) -> bool {
        self.map.num_global() == self.num_cols() && !self.map.is_distributed()
    }

    /// Stored `(column, value)` pairs of a local row, sorted by column.
    pub fn row(&self, local_row: usize) -> Vec<(usize, f64)> {
        self.csr
            .get_row(local_row)
            .map(|row| {
                row.col_indices()
                    .iter()
                    .copied()
                    .zip(row.values().iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Stored entry at `(local_row, col)`, if any.
    pub fn get(&self, local_row: usize, col: usize) -> Option<f64> {
        let row = self.csr.get_row(local_row)?;
        let pos = row.col_indices().binary_search(&col).ok()?;
        Some(row.values()[pos])
    }

    /// Diagonal entries of the owned rows; missing entries read as zero.
    pub fn diagonal(&self) -> DVector<f64> {
        let first = self.map.min_global();
        DVector::from_iterator(
            self.num_rows(),
            (0..self.num_rows()).map(|i| self.get(i, first + i).unwrap_or(0.0)),
        )
    }

    /// Largest `|row - col|` over stored entries.
    pub fn bandwidth(&self) -> usize {
        let first = self.map.min_global();
        self.csr
            .triplet_iter()
            .map(|(i, j, _)| (first + i).abs_diff(j))
            .max()
            .unwrap_or(0)
    }

    /// Whether `A[i][j] == A[j][i]` within `tol` for every stored entry.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        if !self.is_square() {
            return false;
        }
        self.csr.triplet_iter().all(|(i, j, &v)| {
            let mirrored = self.get(j, i).unwrap_or(0.0);
            (v - mirrored).abs() <= tol
        })
    }

    /// Maximum absolute row sum.
    pub fn norm_inf(&self) -> f64 {
        self.csr
            .row_iter()
            .map(|row| row.values().iter().map(|v| v.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }

    /// Maximum absolute column sum.
    pub fn norm_one(&self) -> f64 {
        let mut sums = vec![0.0; self.num_cols()];
        for (_, j, v) in self.csr.triplet_iter() {
            sums[j] += v.abs();
        }
        sums.into_iter().fold(0.0, f64::max)
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.num_rows(), self.num_cols());
        for (i, j, &v) in self.csr.triplet_iter() {
            dense[(i, j)] = v;
        }
        dense
    }

    /// `y = A x`, or `y = Aᵀ x` when `transpose` is set.
    ///
    /// Only square serial matrices are supported, so `x` and `y` share the
    /// matrix map.
    pub fn multiply(&self, transpose: bool, x: &Vector, y: &mut Vector) -> Result<()> {
        if !self.is_square() {
            return Err(DlsError::NotSquare {
                rows: self.map.num_global(),
                cols: self.num_cols(),
            });
        }
        if !x.map().same_as(&self.map) || !y.map().same_as(&self.map) {
            return Err(DlsError::MapMismatch("multiply operands must use the matrix map"));
        }

        let out = self.apply(transpose, x.values());
        y.assign(&out)
    }

    pub(crate) fn apply(&self, transpose: bool, x: &DVector<f64>) -> DVector<f64> {
        let mut y = DVector::zeros(if transpose { self.num_cols() } else { self.num_rows() });
        if transpose {
            for (i, j, &v) in self.csr.triplet_iter() {
                y[j] += v * x[i];
            }
        } else {
            for (i, row) in self.csr.row_iter().enumerate() {
                y[i] = row
                    .col_indices()
                    .iter()
                    .zip(row.values())
                    .map(|(&j, &v)| v * x[j])
                    .sum();
            }
        }
        y
    }
}
