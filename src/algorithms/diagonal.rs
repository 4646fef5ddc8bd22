//! Diagonal systems, solved by dividing each row by its pivot.

use super::{check_rhs, is_zero_pivot};
use crate::{
    error::{SolverError, SolverErrorKind},
    matrix::Diagonal,
};
use faer::{Mat, MatRef};

/// Solves `D x = b` in `O(n)` per right-hand side column.
pub fn diagonal_solve(d: &Diagonal, b: MatRef<'_, f64>) -> Result<Mat<f64>, SolverError> {
    let n = d.diag.len();
    check_rhs(n, b)?;
    if let Some(row) = d.diag.iter().position(|&p| is_zero_pivot(p)) {
        return Err(SolverErrorKind::SingularMatrix { row }.into());
    }
    Ok(Mat::from_fn(n, b.ncols(), |i, k| b[(i, k)] / d.diag[i]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_divides_every_column() {
        let d = Diagonal::from_diagonal(vec![2.0, -4.0, 0.5]);
        let b: Mat<f64> = mat![[2.0, 4.0], [8.0, -4.0], [1.0, 0.0]];
        let x = diagonal_solve(&d, b.as_ref()).unwrap();
        assert_eq!(x, mat![[1.0, 2.0], [-2.0, 1.0], [2.0, 0.0]]);
    }

    #[test]
    fn test_zero_entry_is_singular() {
        let d = Diagonal::from_diagonal(vec![1.0, 0.0, 3.0]);
        let b: Mat<f64> = mat![[1.0], [1.0], [1.0]];
        let err = diagonal_solve(&d, b.as_ref()).unwrap_err();
        assert!(err.is_singular());
        assert_eq!(
            err.to_string(),
            "Matrix is singular: zero pivot encountered at row 1."
        );
    }

    #[test]
    fn test_rhs_length_is_checked() {
        let d = Diagonal::from_diagonal(vec![1.0, 2.0]);
        let b: Mat<f64> = mat![[1.0]];
        assert!(diagonal_solve(&d, b.as_ref()).unwrap_err().is_dimension_mismatch());
    }
}
