//! Back and forward substitution.
//!
//! Both kernels are written against [`StructuredMatrix`], so they run on the
//! packed [`UpperTriangular`](crate::matrix::UpperTriangular) and
//! [`LowerTriangular`](crate::matrix::LowerTriangular) types as well as on a dense
//! matrix whose other triangle is simply ignored.

use super::{check_rhs, is_zero_pivot};
use crate::{
    error::{SolverError, SolverErrorKind},
    matrix::StructuredMatrix,
};
use faer::{Mat, MatRef};

/// Solves `U x = b` for upper triangular `U`, walking the rows bottom-up.
///
/// Entries below the diagonal of `u` are never read.
pub fn back_substitution(
    u: &(impl StructuredMatrix + ?Sized),
    b: MatRef<'_, f64>,
) -> Result<Mat<f64>, SolverError> {
    let n = u.nrows();
    check_rhs(n, b)?;

    let mut x = Mat::<f64>::zeros(n, b.ncols());
    for col in 0..b.ncols() {
        for i in (0..n).rev() {
            let pivot = u.entry(i, i);
            if is_zero_pivot(pivot) {
                return Err(SolverErrorKind::SingularMatrix { row: i }.into());
            }
            let sum: f64 = (i + 1..n).map(|j| u.entry(i, j) * x[(j, col)]).sum();
            x[(i, col)] = (b[(i, col)] - sum) / pivot;
        }
    }
    Ok(x)
}

/// Solves `L x = b` for lower triangular `L`, walking the rows top-down.
///
/// Entries above the diagonal of `l` are never read.
pub fn forward_substitution(
    l: &(impl StructuredMatrix + ?Sized),
    b: MatRef<'_, f64>,
) -> Result<Mat<f64>, SolverError> {
    let n = l.nrows();
    check_rhs(n, b)?;

    let mut x = Mat::<f64>::zeros(n, b.ncols());
    for col in 0..b.ncols() {
        for i in 0..n {
            let pivot = l.entry(i, i);
            if is_zero_pivot(pivot) {
                return Err(SolverErrorKind::SingularMatrix { row: i }.into());
            }
            let sum: f64 = (0..i).map(|j| l.entry(i, j) * x[(j, col)]).sum();
            x[(i, col)] = (b[(i, col)] - sum) / pivot;
        }
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{LowerTriangular, UpperTriangular};
    use faer::mat;

    #[test]
    fn test_back_substitution_packed_and_dense_agree() {
        let dense: Mat<f64> = mat![[2.0, 1.0, -1.0], [0.0, 3.0, 2.0], [0.0, 0.0, 4.0]];
        let b: Mat<f64> = mat![[5.0], [13.0], [8.0]];

        let packed = UpperTriangular::try_from_dense(dense.as_ref()).unwrap();
        let x_packed = back_substitution(&packed, b.as_ref()).unwrap();
        let x_dense = back_substitution(&dense, b.as_ref()).unwrap();

        assert_eq!(x_packed, x_dense);
        // x = [2, 3, 2]
        assert!((x_packed[(0, 0)] - 2.0).abs() < 1e-14);
        assert!((x_packed[(1, 0)] - 3.0).abs() < 1e-14);
        assert!((x_packed[(2, 0)] - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_forward_substitution_multiple_columns() {
        let lower =
            LowerTriangular::try_from_dense(mat![[1.0, 0.0], [2.0, 4.0]].as_ref()).unwrap();
        let b: Mat<f64> = mat![[1.0, 3.0], [6.0, 10.0]];
        let x = forward_substitution(&lower, b.as_ref()).unwrap();
        assert_eq!(x, mat![[1.0, 3.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_zero_diagonal_is_singular() {
        let lower = LowerTriangular::zeros(2);
        let b: Mat<f64> = mat![[1.0], [1.0]];
        let err = forward_substitution(&lower, b.as_ref()).unwrap_err();
        assert!(err.is_singular());
    }

    #[test]
    fn test_rhs_dimension_mismatch() {
        let upper = UpperTriangular::zeros(3);
        let b: Mat<f64> = mat![[1.0], [1.0]];
        let err = back_substitution(&upper, b.as_ref()).unwrap_err();
        assert!(err.is_dimension_mismatch());
    }
}
