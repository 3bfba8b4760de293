//! Test matrices and manufactured solutions.

use crate::error::Result;
use crate::map::RowMap;
use crate::matrix::{CrsMatrix, CrsMatrixBuilder};
use crate::vector::Vector;

/// 1-D Laplacian stencil `[-1, 2, -1]` on the rows owned by `map`.
///
/// Row `i` holds `2.0` on the diagonal and `-1.0` at `i-1` and `i+1` where
/// those columns exist.
pub fn laplace_1d(map: &RowMap) -> Result<CrsMatrix> {
    let n = map.num_global();
    let mut builder = CrsMatrixBuilder::new(map);

    for i in map.global_indices() {
        let mut cols = Vec::with_capacity(3);
        let mut values = Vec::with_capacity(3);
        cols.push(i);
        values.push(2.0);
        if i > 0 {
            cols.push(i - 1);
            values.push(-1.0);
        }
        if i + 1 < n {
            cols.push(i + 1);
            values.push(-1.0);
        }
        builder.insert_global_values(i, &cols, &values)?;
    }

    builder.fill_complete()
}

/// Banded symmetric matrix with `2 * half_bandwidth` off-diagonals of `-1`
/// and a diagonal that keeps it strictly diagonally dominant.
pub fn banded_spd(map: &RowMap, half_bandwidth: usize) -> Result<CrsMatrix> {
    let n = map.num_global();
    let mut builder = CrsMatrixBuilder::new(map);
    let diag = 2.0 * half_bandwidth as f64 + 1.0;

    for i in map.global_indices() {
        let lo = i.saturating_sub(half_bandwidth);
        let hi = (i + half_bandwidth).min(n.saturating_sub(1));
        for j in lo..=hi {
            let value = if j == i { diag } else { -1.0 };
            builder.insert_global_values(i, &[j], &[value])?;
        }
    }

    builder.fill_complete()
}

/// Exact solution `x[i] = i`.
pub fn ramp(map: &RowMap) -> Vector {
    Vector::from_fn(map, |gid| gid as f64)
}
