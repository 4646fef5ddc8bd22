//! This module provides the high-level entry points for solving dense systems
//! `A x = b` with the kernels in [`crate::algorithms`].

use crate::{
    algorithms::{
        cholesky::cholesky_solve,
        diagonal::diagonal_solve,
        elimination::gaussian_elimination,
        substitution::{back_substitution, forward_substitution},
        thomas::thomas,
    },
    error::SolverError,
    matrix::{
        Diagonal, Symmetric, Tridiagonal, is_diagonal, is_lower_triangular, is_symmetric,
        is_tridiagonal, is_upper_triangular,
    },
};
use clap::ValueEnum;
use faer::{Mat, MatRef};
use serde::{Deserialize, Serialize};

/// The direct method used for the assembled system.
///
/// The command-line names follow the numeric `alg` argument of the driver
/// (`0` for elimination, `1` for Cholesky).
#[derive(ValueEnum, Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Gaussian elimination with scaled partial pivoting.
    #[default]
    #[value(name = "0", alias = "gauss")]
    Gaussian,
    /// Cholesky factorisation; the matrix must be symmetric positive definite.
    #[value(name = "1", alias = "cholesky")]
    Cholesky,
}

impl SolverKind {
    /// The positional argument understood by the driver binary.
    pub fn as_arg(&self) -> &'static str {
        match self {
            SolverKind::Gaussian => "0",
            SolverKind::Cholesky => "1",
        }
    }

    /// Human-readable name used in plot legends and titles.
    pub fn label(&self) -> &'static str {
        match self {
            SolverKind::Gaussian => "Gaussian elimination",
            SolverKind::Cholesky => "Cholesky",
        }
    }
}

/// Solves `A x = b` with the requested method.
///
/// For [`SolverKind::Cholesky`] the matrix must be exactly symmetric; otherwise a
/// structure mismatch error is returned before any factorisation is attempted.
pub fn solve_dense(
    a: MatRef<'_, f64>,
    b: MatRef<'_, f64>,
    kind: SolverKind,
) -> Result<Mat<f64>, SolverError> {
    match kind {
        SolverKind::Gaussian => gaussian_elimination(a, b),
        SolverKind::Cholesky => cholesky_solve(&Symmetric::try_from_dense(a)?, b),
    }
}

/// Solves `A x = b`, picking the cheapest kernel the structure of `A` allows.
///
/// Diagonal matrices are divided through, triangular ones go straight to
/// substitution and tridiagonal ones to the Thomas algorithm. Symmetric
/// matrices are tried with Cholesky first and fall back to elimination if they
/// turn out to be indefinite.
pub fn solve_auto(a: MatRef<'_, f64>, b: MatRef<'_, f64>) -> Result<Mat<f64>, SolverError> {
    if is_diagonal(a) {
        log::debug!("solve_auto: diagonal, dividing by the pivots");
        return diagonal_solve(&Diagonal::try_from_dense(a)?, b);
    }
    if is_upper_triangular(a) {
        log::debug!("solve_auto: upper triangular, using back substitution");
        return back_substitution(&a, b);
    }
    if is_lower_triangular(a) {
        log::debug!("solve_auto: lower triangular, using forward substitution");
        return forward_substitution(&a, b);
    }
    if is_tridiagonal(a) {
        log::debug!("solve_auto: tridiagonal, using the Thomas algorithm");
        match thomas(&Tridiagonal::try_from_dense(a)?, b) {
            Ok(x) => return Ok(x),
            // Without pivoting a tridiagonal matrix can still hit a zero pivot.
            Err(e) if e.is_singular() => {}
            Err(e) => return Err(e),
        }
    }
    if is_symmetric(a) {
        log::debug!("solve_auto: symmetric, trying Cholesky");
        match cholesky_solve(&Symmetric::from_dense_lower(a)?, b) {
            Ok(x) => return Ok(x),
            Err(e) if e.is_not_positive_definite() || e.is_singular() => {
                log::debug!("solve_auto: Cholesky failed ({e}), falling back to elimination");
            }
            Err(e) => return Err(e),
        }
    }
    gaussian_elimination(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_solver_kind_args_round_trip() {
        for kind in [SolverKind::Gaussian, SolverKind::Cholesky] {
            assert_eq!(SolverKind::from_str(kind.as_arg(), false).unwrap(), kind);
        }
        assert_eq!(
            SolverKind::from_str("cholesky", false).unwrap(),
            SolverKind::Cholesky
        );
        assert_eq!(SolverKind::default(), SolverKind::Gaussian);
    }

    #[test]
    fn test_cholesky_rejects_non_symmetric() {
        let a: Mat<f64> = mat![[2.0, 1.0], [0.0, 2.0]];
        let b: Mat<f64> = mat![[1.0], [1.0]];
        let err = solve_dense(a.as_ref(), b.as_ref(), SolverKind::Cholesky).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Structure mismatch: matrix is not symmetric."
        );
        assert!(solve_dense(a.as_ref(), b.as_ref(), SolverKind::Gaussian).is_ok());
    }

    #[test]
    fn test_solve_auto_handles_every_structure() {
        let cases: Vec<Mat<f64>> = vec![
            mat![[2.0, 0.0, 0.0], [0.0, -3.0, 0.0], [0.0, 0.0, 4.0]],
            mat![[2.0, 1.0, 1.0], [0.0, 3.0, 1.0], [0.0, 0.0, 4.0]],
            mat![[2.0, 0.0, 0.0], [1.0, 3.0, 0.0], [1.0, 1.0, 4.0]],
            mat![[4.0, 1.0, 0.0], [2.0, 4.0, 1.0], [0.0, 2.0, 4.0]],
            mat![[4.0, 1.0, 1.0], [1.0, 4.0, 1.0], [1.0, 1.0, 4.0]],
            // Symmetric but indefinite.
            mat![[1.0, 3.0, 0.5], [3.0, 1.0, 0.0], [0.5, 0.0, 1.0]],
            mat![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]],
        ];
        let x_true: Mat<f64> = mat![[1.0], [-2.0], [0.5]];
        for a in cases {
            let b = &a * &x_true;
            let x = solve_auto(a.as_ref(), b.as_ref()).unwrap();
            assert!((&x - &x_true).norm_l2() < 1e-10);
        }
    }
}
