//! Error types for the dense solvers and the structured matrix conversions.
//!
//! All numerical failures are funnelled into a single public type,
//! [`SolverError`], which wraps the private [`SolverErrorKind`] enum. The
//! split keeps the variants free to change while still giving callers a
//! readable `Display` through [`thiserror`].
use thiserror::Error;

/// Represents all possible errors raised while building or solving a linear system.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct SolverError(#[from] SolverErrorKind);

/// Private enum containing the distinct kinds of errors.
#[derive(Error, Debug, PartialEq)]
pub(crate) enum SolverErrorKind {
    /// The right-hand side (or the second operand) does not match the matrix.
    #[error("Dimension mismatch: expected {expected} rows but got {actual}.")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A pivot became numerically zero during elimination or substitution.
    #[error("Matrix is singular: zero pivot encountered at row {row}.")]
    SingularMatrix { row: usize },

    /// The Cholesky radicand at `step` was not strictly positive.
    #[error("Matrix is not positive definite: Cholesky breakdown at step {step}.")]
    NotPositiveDefinite { step: usize },

    /// A dense matrix does not have the structure requested by a conversion.
    #[error("Structure mismatch: matrix is not {0}.")]
    StructureMismatch(&'static str),

    /// An entry outside the stored band of a structured matrix was written.
    #[error("Entry ({row}, {col}) lies outside the stored band of a {structure} matrix.")]
    OutsideBand {
        row: usize,
        col: usize,
        structure: &'static str,
    },

    /// Indicates that an invalid input parameter was provided to a function.
    #[error("Invalid input parameter: {0}")]
    InputError(String),
}

impl SolverError {
    /// Returns true when the failure was caused by a zero pivot.
    pub fn is_singular(&self) -> bool {
        matches!(self.0, SolverErrorKind::SingularMatrix { .. })
    }

    /// Returns true when a Cholesky factorisation broke down.
    pub fn is_not_positive_definite(&self) -> bool {
        matches!(self.0, SolverErrorKind::NotPositiveDefinite { .. })
    }

    /// Returns true when operand dimensions were incompatible.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self.0, SolverErrorKind::DimensionMismatch { .. })
    }
}

impl PartialEq for SolverError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
