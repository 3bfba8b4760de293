//! Solution checks against a known answer.

use crate::error::Result;
use crate::matrix::CrsMatrix;
use crate::vector::Vector;

/// `Σ |x[i] - exact[i]|`
pub fn l1_error(x: &Vector, exact: &Vector) -> Result<f64> {
    x.l1_distance(exact)
}

/// `‖b - A x‖₂`
pub fn true_residual(matrix: &CrsMatrix, x: &Vector, b: &Vector) -> Result<f64> {
    let mut ax = Vector::zeros(matrix.map());
    matrix.multiply(false, x, &mut ax)?;
    ax.update(1.0, b, -1.0)?;
    Ok(ax.norm2())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::{laplace_1d, ramp};
    use crate::map::RowMap;
    use crate::problem::manufacture;

    #[test]
    fn exact_solution_has_zero_error_and_residual() {
        let map = RowMap::serial(10);
        let a = laplace_1d(&map).unwrap();
        let exact = ramp(&map);
        let (_, rhs) = manufacture(&a, &exact).unwrap();

        assert_eq!(l1_error(&exact, &exact).unwrap(), 0.0);
        assert_eq!(true_residual(&a, &exact, &rhs).unwrap(), 0.0);
    }

    #[test]
    fn zero_guess_error_is_sum_of_ramp() {
        let map = RowMap::serial(10);
        let exact = ramp(&map);
        let zeros = Vector::zeros(&map);
        assert_eq!(l1_error(&zeros, &exact).unwrap(), 45.0);
    }
}
