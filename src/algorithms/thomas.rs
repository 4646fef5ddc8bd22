//! The Thomas algorithm for tridiagonal systems.
//!
//! A forward sweep eliminates the sub-diagonal, leaving an upper bidiagonal
//! system that is solved by back substitution. No pivoting is performed, so the
//! kernel expects diagonally dominant (or otherwise well-behaved) matrices and
//! reports a singular pivot instead of dividing by zero.

use super::{check_rhs, is_zero_pivot};
use crate::{
    error::{SolverError, SolverErrorKind},
    matrix::Tridiagonal,
};
use faer::{Mat, MatRef};

/// Solves `T x = b` in `O(n)` per right-hand side column.
pub fn thomas(t: &Tridiagonal, b: MatRef<'_, f64>) -> Result<Mat<f64>, SolverError> {
    let n = t.diag.len();
    check_rhs(n, b)?;

    // Modified diagonal after the forward sweep; it does not depend on `b`.
    let mut diag = t.diag.clone();
    let mut factors = vec![0.0; n];
    if is_zero_pivot(diag[0]) {
        return Err(SolverErrorKind::SingularMatrix { row: 0 }.into());
    }
    for i in 1..n {
        factors[i] = t.sub[i - 1] / diag[i - 1];
        diag[i] -= factors[i] * t.sup[i - 1];
        if is_zero_pivot(diag[i]) {
            return Err(SolverErrorKind::SingularMatrix { row: i }.into());
        }
    }

    let mut x = Mat::<f64>::zeros(n, b.ncols());
    let mut rhs = vec![0.0; n];
    for col in 0..b.ncols() {
        rhs[0] = b[(0, col)];
        for i in 1..n {
            rhs[i] = b[(i, col)] - factors[i] * rhs[i - 1];
        }

        x[(n - 1, col)] = rhs[n - 1] / diag[n - 1];
        for i in (0..n - 1).rev() {
            x[(i, col)] = (rhs[i] - t.sup[i] * x[(i + 1, col)]) / diag[i];
        }
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::StructuredMatrix;
    use faer::mat;

    #[test]
    fn test_matches_dense_product() {
        // The 1D Poisson matrix tridiag(-1, 2, -1).
        let n = 6;
        let t = Tridiagonal::from_diagonals(vec![-1.0; n - 1], vec![2.0; n], vec![-1.0; n - 1])
            .unwrap();
        let x_true = Mat::<f64>::from_fn(n, 1, |i, _| (i as f64) - 2.5);
        let b = t.apply(x_true.as_ref());

        let x = thomas(&t, b.as_ref()).unwrap();
        assert!((&x - &x_true).norm_l2() < 1e-12);
    }

    #[test]
    fn test_single_unknown() {
        let t = Tridiagonal::from_diagonals(vec![], vec![4.0], vec![]).unwrap();
        let b: Mat<f64> = mat![[2.0]];
        let x = thomas(&t, b.as_ref()).unwrap();
        assert_eq!(x, mat![[0.5]]);
    }

    #[test]
    fn test_zero_pivot_is_reported() {
        // Second pivot becomes 1 - 1 * 1 / 1 = 0.
        let t = Tridiagonal::from_diagonals(vec![1.0], vec![1.0, 1.0], vec![1.0]).unwrap();
        let b: Mat<f64> = mat![[1.0], [1.0]];
        let err = thomas(&t, b.as_ref()).unwrap_err();
        assert!(err.is_singular());
    }

    #[test]
    fn test_mismatched_diagonals_are_rejected() {
        assert!(Tridiagonal::from_diagonals(vec![1.0; 3], vec![1.0; 3], vec![1.0; 2]).is_err());
    }
}
