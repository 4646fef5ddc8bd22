//! Cholesky factorisation of symmetric positive definite matrices.
//!
//! [`cholesky`] computes the lower triangular factor `L` with `S = L Lᵀ` row by
//! row (the Cholesky–Banachiewicz ordering). [`cholesky_solve`] then solves
//! `S x = b` with one forward and one back substitution:
//!
//! ```text
//! L y = b,    Lᵀ x = y
//! ```

use super::{
    check_rhs, is_zero_pivot,
    substitution::{back_substitution, forward_substitution},
};
use crate::{
    error::{SolverError, SolverErrorKind},
    matrix::{LowerTriangular, StructuredMatrix, Symmetric},
};
use faer::{Mat, MatRef};

/// Factors `s` as `L Lᵀ`.
///
/// Fails with a "not positive definite" error at the first step whose radicand
/// `s_kk − Σ l_kj²` is not strictly positive.
pub fn cholesky(s: &Symmetric) -> Result<LowerTriangular, SolverError> {
    let n = s.nrows();
    let mut l = LowerTriangular::zeros(n);

    for k in 0..n {
        for i in 0..k {
            let l_ii = l.entry(i, i);
            if is_zero_pivot(l_ii) {
                return Err(SolverErrorKind::SingularMatrix { row: i }.into());
            }
            let sum: f64 = (0..i).map(|j| l.entry(i, j) * l.entry(k, j)).sum();
            l.set(k, i, (s.entry(k, i) - sum) / l_ii)?;
        }

        let sum: f64 = (0..k).map(|j| l.entry(k, j).powi(2)).sum();
        let radicand = s.entry(k, k) - sum;
        if !(radicand > 0.0) {
            return Err(SolverErrorKind::NotPositiveDefinite { step: k }.into());
        }
        l.set(k, k, radicand.sqrt())?;
    }

    Ok(l)
}

/// Solves `S x = b` through the Cholesky factor of `s`.
pub fn cholesky_solve(s: &Symmetric, b: MatRef<'_, f64>) -> Result<Mat<f64>, SolverError> {
    check_rhs(s.nrows(), b)?;
    let l = cholesky(s)?;
    let y = forward_substitution(&l, b)?;
    back_substitution(&l.transpose(), y.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_factor_reconstructs_matrix() {
        let dense: Mat<f64> = mat![[4.0, 12.0, -16.0], [12.0, 37.0, -43.0], [-16.0, -43.0, 98.0]];
        let s = Symmetric::try_from_dense(dense.as_ref()).unwrap();
        let l = cholesky(&s).unwrap();

        // Textbook factor: L = [[2, 0, 0], [6, 1, 0], [-8, 5, 3]].
        let expected: Mat<f64> = mat![[2.0, 0.0, 0.0], [6.0, 1.0, 0.0], [-8.0, 5.0, 3.0]];
        assert!((&l.to_dense() - &expected).norm_l2() < 1e-12);

        let l_dense = l.to_dense();
        let product = l_dense.as_ref() * l_dense.transpose();
        assert!((&product - &dense).norm_l2() < 1e-12);
    }

    #[test]
    fn test_solve_matches_known_solution() {
        let dense: Mat<f64> = mat![[4.0, 1.0], [1.0, 3.0]];
        let s = Symmetric::try_from_dense(dense.as_ref()).unwrap();
        let x_true: Mat<f64> = mat![[1.0], [2.0]];
        let b = &dense * &x_true;

        let x = cholesky_solve(&s, b.as_ref()).unwrap();
        assert!((&x - &x_true).norm_l2() < 1e-12);
    }

    #[test]
    fn test_indefinite_matrix_is_rejected() {
        let dense: Mat<f64> = mat![[1.0, 2.0], [2.0, 1.0]];
        let s = Symmetric::try_from_dense(dense.as_ref()).unwrap();
        let err = cholesky(&s).unwrap_err();
        assert!(err.is_not_positive_definite());
        assert_eq!(
            err.to_string(),
            "Matrix is not positive definite: Cholesky breakdown at step 1."
        );
    }
}
