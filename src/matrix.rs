//! Dense and structured square matrices.
//!
//! Dense matrices are plain [`faer::Mat`]s. The finite-difference system and the
//! factorisations built on top of it have a lot of structure, so this module
//! adds compact storage for the shapes the direct solvers work with:
//!
//! * [`UpperTriangular`] and [`LowerTriangular`]: packed row-major triangles,
//!   consumed by back and forward substitution;
//! * [`Symmetric`]: the packed lower half, consumed by Cholesky;
//! * [`Tridiagonal`]: three diagonals, consumed by the Thomas algorithm;
//! * [`Diagonal`]: the main diagonal alone, solved by elementwise division.
//!
//! Every type implements [`StructuredMatrix`], which exposes element reads and
//! the matrix-vector product. Reads outside the stored band return zero (or the
//! mirrored entry for [`Symmetric`]); writes outside it are rejected.

use crate::error::{SolverError, SolverErrorKind};
use faer::{Mat, MatMut, MatRef, prelude::Reborrow};

/// Read access shared by dense and structured matrices.
///
/// The solvers only need element reads and the matrix-vector product, so they
/// are written against this trait and work for dense input as well.
pub trait StructuredMatrix {
    /// Returns the number of rows.
    fn nrows(&self) -> usize;

    /// Returns the number of columns.
    fn ncols(&self) -> usize;

    /// Returns the entry at `(row, col)`, including implicit zeros.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    fn entry(&self, row: usize, col: usize) -> f64;

    /// Computes `A * rhs`.
    ///
    /// # Panics
    ///
    /// Panics if the number of columns of `A` does not match the rows of `rhs`.
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        assert_eq!(
            self.ncols(),
            rhs.nrows(),
            "Dimension mismatch: operator columns ({}) do not match vector rows ({}).",
            self.ncols(),
            rhs.nrows(),
        );
        Mat::from_fn(self.nrows(), rhs.ncols(), |i, k| {
            (0..self.ncols())
                .map(|j| self.entry(i, j) * rhs[(j, k)])
                .sum()
        })
    }

    /// Expands the matrix into dense storage.
    fn to_dense(&self) -> Mat<f64> {
        Mat::from_fn(self.nrows(), self.ncols(), |i, j| self.entry(i, j))
    }
}

impl<'a> StructuredMatrix for MatRef<'a, f64> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols()
    }

    #[inline]
    fn entry(&self, row: usize, col: usize) -> f64 {
        self[(row, col)]
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        assert_eq!(
            self.ncols(),
            rhs.nrows(),
            "Dimension mismatch: operator columns ({}) do not match vector rows ({}).",
            self.ncols(),
            rhs.nrows(),
        );
        // Dense products go through faer's matmul kernels.
        *self * rhs
    }
}

impl<'a> StructuredMatrix for MatMut<'a, f64> {
    #[inline]
    fn nrows(&self) -> usize {
        self.rb().nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.rb().ncols()
    }

    #[inline]
    fn entry(&self, row: usize, col: usize) -> f64 {
        self.rb().entry(row, col)
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        self.rb().apply(rhs)
    }
}

impl StructuredMatrix for Mat<f64> {
    #[inline]
    fn nrows(&self) -> usize {
        self.as_ref().nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.as_ref().ncols()
    }

    #[inline]
    fn entry(&self, row: usize, col: usize) -> f64 {
        self.as_ref().entry(row, col)
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        self.as_ref().apply(rhs)
    }

    fn to_dense(&self) -> Mat<f64> {
        self.clone()
    }
}

fn check_bounds(n: usize, row: usize, col: usize) {
    assert!(
        row < n && col < n,
        "Index ({row}, {col}) is out of bounds for a {n}x{n} matrix."
    );
}

fn ensure_square(a: MatRef<'_, f64>) -> Result<usize, SolverError> {
    if a.nrows() != a.ncols() {
        return Err(SolverErrorKind::DimensionMismatch {
            expected: a.nrows(),
            actual: a.ncols(),
        }
        .into());
    }
    Ok(a.nrows())
}

/// Square upper triangular matrix, packed row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct UpperTriangular {
    n: usize,
    data: Vec<f64>,
}

impl UpperTriangular {
    /// Creates an `n x n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * (n + 1) / 2],
        }
    }

    // Row `i` stores columns `i..n`.
    fn index(&self, row: usize, col: usize) -> usize {
        row * (2 * self.n - row + 1) / 2 + (col - row)
    }

    /// Sets the entry at `(row, col)`. Only `col >= row` is stored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), SolverError> {
        check_bounds(self.n, row, col);
        if col < row {
            return Err(SolverErrorKind::OutsideBand {
                row,
                col,
                structure: "upper triangular",
            }
            .into());
        }
        let idx = self.index(row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Copies the upper triangle of `a`, failing if `a` has non-zeros below the diagonal.
    pub fn try_from_dense(a: MatRef<'_, f64>) -> Result<Self, SolverError> {
        ensure_square(a)?;
        if !is_upper_triangular(a) {
            return Err(SolverErrorKind::StructureMismatch("upper triangular").into());
        }
        let n = a.nrows();
        let mut upper = Self::zeros(n);
        for i in 0..n {
            for j in i..n {
                upper.set(i, j, a[(i, j)])?;
            }
        }
        Ok(upper)
    }

    /// Returns `Uᵀ` as a lower triangular matrix.
    pub fn transpose(&self) -> LowerTriangular {
        let mut lower = LowerTriangular::zeros(self.n);
        for i in 0..self.n {
            for j in i..self.n {
                let idx = lower.index(j, i);
                lower.data[idx] = self.entry(i, j);
            }
        }
        lower
    }
}

impl StructuredMatrix for UpperTriangular {
    fn nrows(&self) -> usize {
        self.n
    }

    fn ncols(&self) -> usize {
        self.n
    }

    fn entry(&self, row: usize, col: usize) -> f64 {
        check_bounds(self.n, row, col);
        if col < row {
            0.0
        } else {
            self.data[self.index(row, col)]
        }
    }
}

/// Square lower triangular matrix, packed row by row.
#[derive(Clone, Debug, PartialEq)]
pub struct LowerTriangular {
    n: usize,
    data: Vec<f64>,
}

impl LowerTriangular {
    /// Creates an `n x n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * (n + 1) / 2],
        }
    }

    // Row `i` stores columns `0..=i`.
    fn index(&self, row: usize, col: usize) -> usize {
        row * (row + 1) / 2 + col
    }

    /// Sets the entry at `(row, col)`. Only `col <= row` is stored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), SolverError> {
        check_bounds(self.n, row, col);
        if col > row {
            return Err(SolverErrorKind::OutsideBand {
                row,
                col,
                structure: "lower triangular",
            }
            .into());
        }
        let idx = self.index(row, col);
        self.data[idx] = value;
        Ok(())
    }

    /// Copies the lower triangle of `a`, failing if `a` has non-zeros above the diagonal.
    pub fn try_from_dense(a: MatRef<'_, f64>) -> Result<Self, SolverError> {
        ensure_square(a)?;
        if !is_lower_triangular(a) {
            return Err(SolverErrorKind::StructureMismatch("lower triangular").into());
        }
        let n = a.nrows();
        let mut lower = Self::zeros(n);
        for i in 0..n {
            for j in 0..=i {
                lower.set(i, j, a[(i, j)])?;
            }
        }
        Ok(lower)
    }

    /// Returns `Lᵀ` as an upper triangular matrix.
    pub fn transpose(&self) -> UpperTriangular {
        let mut upper = UpperTriangular::zeros(self.n);
        for i in 0..self.n {
            for j in 0..=i {
                let idx = upper.index(j, i);
                upper.data[idx] = self.entry(i, j);
            }
        }
        upper
    }
}

impl StructuredMatrix for LowerTriangular {
    fn nrows(&self) -> usize {
        self.n
    }

    fn ncols(&self) -> usize {
        self.n
    }

    fn entry(&self, row: usize, col: usize) -> f64 {
        check_bounds(self.n, row, col);
        if col > row {
            0.0
        } else {
            self.data[self.index(row, col)]
        }
    }
}

/// Square symmetric matrix. Only the lower half is stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Symmetric {
    lower: LowerTriangular,
}

impl Symmetric {
    /// Creates an `n x n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            lower: LowerTriangular::zeros(n),
        }
    }

    /// Sets both `(row, col)` and `(col, row)`.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), SolverError> {
        if row >= col {
            self.lower.set(row, col, value)
        } else {
            self.lower.set(col, row, value)
        }
    }

    /// Copies the lower half of `a` without checking the upper half.
    pub fn from_dense_lower(a: MatRef<'_, f64>) -> Result<Self, SolverError> {
        let n = ensure_square(a)?;
        let mut sym = Self::zeros(n);
        for i in 0..n {
            for j in 0..=i {
                sym.set(i, j, a[(i, j)])?;
            }
        }
        Ok(sym)
    }

    /// Copies `a`, failing if it is not exactly symmetric.
    pub fn try_from_dense(a: MatRef<'_, f64>) -> Result<Self, SolverError> {
        ensure_square(a)?;
        if !is_symmetric(a) {
            return Err(SolverErrorKind::StructureMismatch("symmetric").into());
        }
        Self::from_dense_lower(a)
    }
}

impl StructuredMatrix for Symmetric {
    fn nrows(&self) -> usize {
        self.lower.n
    }

    fn ncols(&self) -> usize {
        self.lower.n
    }

    fn entry(&self, row: usize, col: usize) -> f64 {
        if row >= col {
            self.lower.entry(row, col)
        } else {
            self.lower.entry(col, row)
        }
    }
}

/// Square tridiagonal matrix stored as its three diagonals.
#[derive(Clone, Debug, PartialEq)]
pub struct Tridiagonal {
    /// `sub[i]` is the entry at `(i + 1, i)`.
    pub(crate) sub: Vec<f64>,
    pub(crate) diag: Vec<f64>,
    /// `sup[i]` is the entry at `(i, i + 1)`.
    pub(crate) sup: Vec<f64>,
}

impl Tridiagonal {
    /// Creates an `n x n` zero matrix.
    pub fn zeros(n: usize) -> Self {
        let off = n.saturating_sub(1);
        Self {
            sub: vec![0.0; off],
            diag: vec![0.0; n],
            sup: vec![0.0; off],
        }
    }

    /// Builds a matrix from its diagonals.
    ///
    /// `sub` and `sup` must be exactly one shorter than `diag`.
    pub fn from_diagonals(sub: Vec<f64>, diag: Vec<f64>, sup: Vec<f64>) -> Result<Self, SolverError> {
        let off = diag.len().saturating_sub(1);
        for len in [sub.len(), sup.len()] {
            if len != off {
                return Err(SolverErrorKind::DimensionMismatch {
                    expected: off,
                    actual: len,
                }
                .into());
            }
        }
        Ok(Self { sub, diag, sup })
    }

    /// Sets the entry at `(row, col)`. Only `|row - col| <= 1` is stored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), SolverError> {
        let n = self.diag.len();
        check_bounds(n, row, col);
        if row == col {
            self.diag[row] = value;
        } else if row == col + 1 {
            self.sub[col] = value;
        } else if col == row + 1 {
            self.sup[row] = value;
        } else {
            return Err(SolverErrorKind::OutsideBand {
                row,
                col,
                structure: "tridiagonal",
            }
            .into());
        }
        Ok(())
    }

    /// Copies the three diagonals of `a`, failing if anything else is non-zero.
    pub fn try_from_dense(a: MatRef<'_, f64>) -> Result<Self, SolverError> {
        let n = ensure_square(a)?;
        if !is_tridiagonal(a) {
            return Err(SolverErrorKind::StructureMismatch("tridiagonal").into());
        }
        let mut tri = Self::zeros(n);
        for i in 0..n {
            tri.diag[i] = a[(i, i)];
            if i + 1 < n {
                tri.sub[i] = a[(i + 1, i)];
                tri.sup[i] = a[(i, i + 1)];
            }
        }
        Ok(tri)
    }
}

impl StructuredMatrix for Tridiagonal {
    fn nrows(&self) -> usize {
        self.diag.len()
    }

    fn ncols(&self) -> usize {
        self.diag.len()
    }

    fn entry(&self, row: usize, col: usize) -> f64 {
        check_bounds(self.diag.len(), row, col);
        if row == col {
            self.diag[row]
        } else if row == col + 1 {
            self.sub[col]
        } else if col == row + 1 {
            self.sup[row]
        } else {
            0.0
        }
    }

    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        let n = self.diag.len();
        assert_eq!(
            n,
            rhs.nrows(),
            "Dimension mismatch: operator columns ({}) do not match vector rows ({}).",
            n,
            rhs.nrows(),
        );
        Mat::from_fn(n, rhs.ncols(), |i, k| {
            let mut acc = self.diag[i] * rhs[(i, k)];
            if i > 0 {
                acc += self.sub[i - 1] * rhs[(i - 1, k)];
            }
            if i + 1 < n {
                acc += self.sup[i] * rhs[(i + 1, k)];
            }
            acc
        })
    }
}

/// Square diagonal matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagonal {
    pub(crate) diag: Vec<f64>,
}

impl Diagonal {
    pub fn zeros(n: usize) -> Self {
        Self { diag: vec![0.0; n] }
    }

    pub fn from_diagonal(diag: Vec<f64>) -> Self {
        Self { diag }
    }

    /// Sets the entry at `(row, col)`. Only `row == col` is stored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), SolverError> {
        check_bounds(self.diag.len(), row, col);
        if row != col {
            return Err(SolverErrorKind::OutsideBand {
                row,
                col,
                structure: "diagonal",
            }
            .into());
        }
        self.diag[row] = value;
        Ok(())
    }

    /// Copies the diagonal of `a`, failing if any off-diagonal entry is non-zero.
    pub fn try_from_dense(a: MatRef<'_, f64>) -> Result<Self, SolverError> {
        let n = ensure_square(a)?;
        if !is_diagonal(a) {
            return Err(SolverErrorKind::StructureMismatch("diagonal").into());
        }
        Ok(Self::from_diagonal((0..n).map(|i| a[(i, i)]).collect()))
    }
}

impl StructuredMatrix for Diagonal {
    fn nrows(&self) -> usize {
        self.diag.len()
    }

    fn ncols(&self) -> usize {
        self.diag.len()
    }

    fn entry(&self, row: usize, col: usize) -> f64 {
        check_bounds(self.diag.len(), row, col);
        if row == col { self.diag[row] } else { 0.0 }
    }

    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        let n = self.diag.len();
        assert_eq!(
            n,
            rhs.nrows(),
            "Dimension mismatch: operator columns ({}) do not match vector rows ({}).",
            n,
            rhs.nrows(),
        );
        Mat::from_fn(n, rhs.ncols(), |i, k| self.diag[i] * rhs[(i, k)])
    }
}

/// Returns true if `a` is square with non-zeros only on the main diagonal.
pub fn is_diagonal(a: MatRef<'_, f64>) -> bool {
    a.nrows() == a.ncols()
        && (0..a.nrows()).all(|i| (0..a.ncols()).all(|j| i == j || a[(i, j)] == 0.0))
}

/// Returns true if `a` is square with only zeros below the diagonal.
pub fn is_upper_triangular(a: MatRef<'_, f64>) -> bool {
    a.nrows() == a.ncols()
        && (0..a.nrows()).all(|i| (0..i).all(|j| a[(i, j)] == 0.0))
}

/// Returns true if `a` is square with only zeros above the diagonal.
pub fn is_lower_triangular(a: MatRef<'_, f64>) -> bool {
    a.nrows() == a.ncols()
        && (0..a.nrows()).all(|i| (i + 1..a.ncols()).all(|j| a[(i, j)] == 0.0))
}

/// Returns true if `a` is square and equal to its transpose.
pub fn is_symmetric(a: MatRef<'_, f64>) -> bool {
    a.nrows() == a.ncols() && (0..a.nrows()).all(|i| (0..i).all(|j| a[(i, j)] == a[(j, i)]))
}

/// Returns true if `a` is square with non-zeros only on the three central diagonals.
pub fn is_tridiagonal(a: MatRef<'_, f64>) -> bool {
    a.nrows() == a.ncols()
        && (0..a.nrows()).all(|i| (0..a.ncols()).all(|j| i.abs_diff(j) <= 1 || a[(i, j)] == 0.0))
}

/// Builds the augmented matrix `[A | b]`.
pub fn augment(a: MatRef<'_, f64>, b: MatRef<'_, f64>) -> Result<Mat<f64>, SolverError> {
    if b.nrows() != a.nrows() {
        return Err(SolverErrorKind::DimensionMismatch {
            expected: a.nrows(),
            actual: b.nrows(),
        }
        .into());
    }
    let n = a.ncols();
    Ok(Mat::from_fn(a.nrows(), n + b.ncols(), |i, j| {
        if j < n { a[(i, j)] } else { b[(i, j - n)] }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_structured_matrix_for_mat() {
        let matrix: Mat<f64> = mat![[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0],];
        let vector: Mat<f64> = mat![[1.0], [2.0], [3.0]];

        let expected = &matrix * &vector;

        let operator: &dyn StructuredMatrix = &matrix;
        assert_eq!(operator.apply(vector.as_ref()), expected);
        assert_eq!(operator.nrows(), 3);
        assert_eq!(operator.entry(1, 2), -1.0);

        let operator_ref: &dyn StructuredMatrix = &matrix.as_ref();
        assert_eq!(operator_ref.apply(vector.as_ref()), expected);
    }

    #[test]
    #[should_panic(
        expected = "Dimension mismatch: operator columns (2) do not match vector rows (3)."
    )]
    fn test_dimension_mismatch_panic() {
        let matrix: Mat<f64> = mat![[1.0, 0.0], [0.0, 1.0]];
        let vector: Mat<f64> = mat![[1.0], [2.0], [3.0]];
        let operator: &dyn StructuredMatrix = &matrix;
        operator.apply(vector.as_ref());
    }

    #[test]
    fn test_upper_triangular_packing() {
        let dense: Mat<f64> = mat![[1.0, 2.0, 3.0], [0.0, 4.0, 5.0], [0.0, 0.0, 6.0]];
        let upper = UpperTriangular::try_from_dense(dense.as_ref()).unwrap();
        assert_eq!(upper.to_dense(), dense);
        assert_eq!(upper.entry(2, 0), 0.0);

        let lower = upper.transpose();
        assert_eq!(lower.entry(2, 1), 5.0);
        assert_eq!(lower.entry(0, 2), 0.0);
        assert_eq!(lower.transpose(), upper);
    }

    #[test]
    fn test_lower_triangular_rejects_upper_entries() {
        let dense: Mat<f64> = mat![[1.0, 0.5], [2.0, 3.0]];
        assert!(LowerTriangular::try_from_dense(dense.as_ref()).is_err());

        let mut lower = LowerTriangular::zeros(2);
        assert!(lower.set(0, 1, 1.0).is_err());
        lower.set(1, 0, 2.0).unwrap();
        assert_eq!(lower.entry(1, 0), 2.0);
    }

    #[test]
    fn test_symmetric_mirrors_entries() {
        let mut sym = Symmetric::zeros(3);
        sym.set(0, 2, 7.0).unwrap();
        assert_eq!(sym.entry(2, 0), 7.0);
        assert_eq!(sym.entry(0, 2), 7.0);
        assert!(is_symmetric(sym.to_dense().as_ref()));

        let skew: Mat<f64> = mat![[1.0, 2.0], [3.0, 1.0]];
        assert!(Symmetric::try_from_dense(skew.as_ref()).is_err());
    }

    #[test]
    fn test_tridiagonal_apply_matches_dense() {
        let dense: Mat<f64> = mat![
            [4.0, 1.0, 0.0, 0.0],
            [2.0, 5.0, 1.0, 0.0],
            [0.0, 2.0, 6.0, 1.0],
            [0.0, 0.0, 2.0, 7.0],
        ];
        let tri = Tridiagonal::try_from_dense(dense.as_ref()).unwrap();
        let x: Mat<f64> = mat![[1.0], [-1.0], [2.0], [0.5]];
        assert_eq!(tri.apply(x.as_ref()), &dense * &x);
        assert!(tri.clone().set(0, 3, 1.0).is_err());
    }

    #[test]
    fn test_diagonal_storage() {
        let dense: Mat<f64> = mat![[2.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 4.0]];
        let d = Diagonal::try_from_dense(dense.as_ref()).unwrap();
        assert_eq!(d.to_dense(), dense);
        let x: Mat<f64> = mat![[1.0], [2.0], [3.0]];
        assert_eq!(d.apply(x.as_ref()), &dense * &x);

        let mut d = Diagonal::zeros(2);
        assert!(d.set(0, 1, 1.0).is_err());
        d.set(1, 1, 5.0).unwrap();
        assert_eq!(d.entry(1, 1), 5.0);

        let tri: Mat<f64> = mat![[1.0, 2.0], [0.0, 1.0]];
        assert_eq!(
            Diagonal::try_from_dense(tri.as_ref()).unwrap_err().to_string(),
            "Structure mismatch: matrix is not diagonal."
        );
    }

    #[test]
    fn test_structure_queries() {
        let diag: Mat<f64> = mat![[1.0, 0.0], [0.0, 2.0]];
        assert!(is_upper_triangular(diag.as_ref()));
        assert!(is_lower_triangular(diag.as_ref()));
        assert!(is_symmetric(diag.as_ref()));
        assert!(is_tridiagonal(diag.as_ref()));
        assert!(is_diagonal(diag.as_ref()));

        let full: Mat<f64> = mat![[1.0, 0.0, 3.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        assert!(is_upper_triangular(full.as_ref()));
        assert!(!is_lower_triangular(full.as_ref()));
        assert!(!is_tridiagonal(full.as_ref()));
        assert!(!is_diagonal(full.as_ref()));

        let rect = Mat::<f64>::zeros(2, 3);
        assert!(!is_symmetric(rect.as_ref()));
    }

    #[test]
    fn test_augment() {
        let a: Mat<f64> = mat![[1.0, 2.0], [3.0, 4.0]];
        let b: Mat<f64> = mat![[5.0], [6.0]];
        let aug = augment(a.as_ref(), b.as_ref()).unwrap();
        assert_eq!(aug, mat![[1.0, 2.0, 5.0], [3.0, 4.0, 6.0]]);

        let short: Mat<f64> = mat![[1.0]];
        assert!(augment(a.as_ref(), short.as_ref()).is_err());
    }
}
