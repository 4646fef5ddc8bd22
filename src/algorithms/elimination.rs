//! Gaussian elimination with scaled partial pivoting.
//!
//! The system is reduced on the augmented matrix `[A | b]`. Before elimination
//! every row gets a scale factor `s_i = max_j |a_ij|`. At step `k` the pivot row
//! is the remaining row with the largest scaled magnitude `|a_ik| / s_i`, which
//! keeps rows with large entries from dominating the pivot choice. The scale
//! factors travel with their rows when rows are swapped. Once the matrix is
//! upper triangular the solution is recovered by back substitution.

use super::{check_rhs, is_zero_pivot, substitution::back_substitution};
use crate::{
    error::{SolverError, SolverErrorKind},
    matrix::augment,
};
use faer::{Mat, MatRef};

/// Solves `A x = b` by Gaussian elimination with scaled partial pivoting.
///
/// # Arguments
/// * `a`: A square matrix.
/// * `b`: The right-hand side, one column per system.
///
/// # Returns
/// The solution `x` with the same shape as `b`, or a [`SolverError`] when `A` is
/// not square, `b` has the wrong number of rows, or `A` is numerically singular.
pub fn gaussian_elimination(
    a: MatRef<'_, f64>,
    b: MatRef<'_, f64>,
) -> Result<Mat<f64>, SolverError> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(SolverErrorKind::DimensionMismatch {
            expected: n,
            actual: a.ncols(),
        }
        .into());
    }
    check_rhs(n, b)?;

    let mut aug = augment(a, b)?;
    let width = aug.ncols();

    let mut scale: Vec<f64> = (0..n)
        .map(|i| (0..n).map(|j| aug[(i, j)].abs()).fold(0.0, f64::max))
        .collect();
    if let Some(row) = scale.iter().position(|&s| is_zero_pivot(s)) {
        return Err(SolverErrorKind::SingularMatrix { row }.into());
    }

    for k in 0..n {
        let (pivot_row, _) = (k..n)
            .map(|i| (i, aug[(i, k)].abs() / scale[i]))
            .fold((k, f64::NEG_INFINITY), |best, cand| {
                if cand.1 > best.1 { cand } else { best }
            });
        if is_zero_pivot(aug[(pivot_row, k)]) {
            return Err(SolverErrorKind::SingularMatrix { row: k }.into());
        }

        if pivot_row != k {
            for j in 0..width {
                let tmp = aug[(k, j)];
                aug[(k, j)] = aug[(pivot_row, j)];
                aug[(pivot_row, j)] = tmp;
            }
            scale.swap(k, pivot_row);
        }

        let pivot = aug[(k, k)];
        for i in k + 1..n {
            let factor = aug[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            aug[(i, k)] = 0.0;
            for j in k + 1..width {
                let upper = aug[(k, j)];
                aug[(i, j)] -= factor * upper;
            }
        }
    }

    let reduced = aug.as_ref().get(.., 0..n);
    let rhs = aug.as_ref().get(.., n..width);
    back_substitution(&reduced, rhs)
}
