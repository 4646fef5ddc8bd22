//! Error metrics between two solution grids.

use crate::error::{SolverError, SolverErrorKind};
use faer::MatRef;

/// Root-mean-square difference of the leading `size × size` blocks of `a` and `b`:
///
/// ```text
/// sqrt( (1/size)² · Σ_{i<size, j<size} (a_ij − b_ij)² )
/// ```
///
/// Only the leading block is compared, so a grid with the trailing boundary row
/// and column (`size + 1` entries per side) can be passed as-is.
pub fn l2_error(a: MatRef<'_, f64>, b: MatRef<'_, f64>, size: usize) -> Result<f64, SolverError> {
    if size == 0 {
        return Err(SolverErrorKind::InputError("size must be positive".to_string()).into());
    }
    for m in [a, b] {
        let short = m.nrows().min(m.ncols());
        if short < size {
            return Err(SolverErrorKind::DimensionMismatch {
                expected: size,
                actual: short,
            }
            .into());
        }
    }

    let mut total = 0.0;
    for i in 0..size {
        for j in 0..size {
            total += (a[(i, j)] - b[(i, j)]).powi(2);
        }
    }
    let scale = 1.0 / size as f64;
    Ok((scale * scale * total).sqrt())
}
