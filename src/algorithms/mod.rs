//! Direct solvers for dense and structured linear systems.
//!
//! ** NOTE: We recommend using the high-level entry points in [`crate::solvers`]
//! instead. This module exposes the individual kernels for callers that already
//! hold a structured matrix.
//!
//! - [`substitution`]: back and forward substitution on triangular matrices.
//! - [`elimination`]: Gaussian elimination with scaled partial pivoting.
//! - [`cholesky`]: `S = L Lᵀ` factorisation of symmetric positive definite matrices.
//! - [`thomas`]: the Thomas algorithm for tridiagonal systems.
//! - [`diagonal`]: elementwise division for diagonal systems.
//!
//! Every kernel accepts a right-hand side with any number of columns and returns
//! the solution with the same shape.

pub mod cholesky;
pub mod diagonal;
pub mod elimination;
pub mod substitution;
pub mod thomas;

use crate::error::{SolverError, SolverErrorKind};
use faer::MatRef;

/// Pivots with a magnitude below this value are treated as zero.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Validates that `b` can be the right-hand side of an `n x n` system.
pub(crate) fn check_rhs(n: usize, b: MatRef<'_, f64>) -> Result<(), SolverError> {
    if n == 0 {
        return Err(SolverErrorKind::InputError("the system has no unknowns".to_string()).into());
    }
    if b.nrows() != n {
        return Err(SolverErrorKind::DimensionMismatch {
            expected: n,
            actual: b.nrows(),
        }
        .into());
    }
    Ok(())
}

#[inline]
pub(crate) fn is_zero_pivot(value: f64) -> bool {
    !(value.abs() >= PIVOT_TOLERANCE)
}
