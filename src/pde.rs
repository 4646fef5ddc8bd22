//! Five-point finite-difference discretisation of the Dirichlet problem
//!
//! ```text
//! −Δu = f   on (lower, upper)²,     u = g   on the boundary.
//! ```
//!
//! The square is split into `N` partitions per direction with step
//! `h = (upper − lower) / N`. The unknowns are the interior values
//! `u(x_j, y_k)` for `j, k ∈ 1..N`, numbered row by row:
//! `index = (k − 1)(N − 1) + (j − 1)`. Each unknown contributes one equation
//!
//! ```text
//! u_P − ¼ (u_E + u_W + u_N + u_S) = h²/4 · f(x_j, y_k)
//! ```
//!
//! where neighbours on the boundary are moved to the right-hand side. The
//! resulting `(N − 1)² × (N − 1)²` matrix is symmetric positive definite, so both
//! [`SolverKind::Gaussian`] and [`SolverKind::Cholesky`] apply.

use crate::{
    error::{SolverError, SolverErrorKind},
    solvers::{SolverKind, solve_dense},
};
use faer::Mat;
use std::f64::consts::PI;

/// Boundary data along one side of the square, as a function of the running coordinate.
pub type BoundaryFn = Box<dyn Fn(f64) -> f64>;

/// Right-hand side `f(x, y)` of `−Δu = f`.
pub type ForcingFn = Box<dyn Fn(f64, f64) -> f64>;

/// Values with a smaller magnitude are written as exact zeros by [`exact_grid`].
pub const EXACT_CLAMP: f64 = 1e-8;

/// The assembled system `A u = b`.
pub struct LinearSystem {
    pub a: Mat<f64>,
    pub b: Mat<f64>,
}

/// A Dirichlet problem for the Poisson equation on a square.
pub struct DirichletProblem {
    lower: f64,
    upper: f64,
    /// `u(x, lower)`
    bottom: BoundaryFn,
    /// `u(x, upper)`
    top: BoundaryFn,
    /// `u(lower, y)`
    left: BoundaryFn,
    /// `u(upper, y)`
    right: BoundaryFn,
    forcing: Option<ForcingFn>,
}

impl DirichletProblem {
    /// Creates a problem on `[lower, upper]²` with zero boundary data and no forcing.
    pub fn new(lower: f64, upper: f64) -> Result<Self, SolverError> {
        if !(upper > lower) {
            return Err(SolverErrorKind::InputError(format!(
                "invalid bounds, upper ({upper}) must be greater than lower ({lower})"
            ))
            .into());
        }
        Ok(Self {
            lower,
            upper,
            bottom: Box::new(|_: f64| 0.0),
            top: Box::new(|_: f64| 0.0),
            left: Box::new(|_: f64| 0.0),
            right: Box::new(|_: f64| 0.0),
            forcing: None,
        })
    }

    pub fn with_bottom(mut self, g: impl Fn(f64) -> f64 + 'static) -> Self {
        self.bottom = Box::new(g);
        self
    }

    pub fn with_top(mut self, g: impl Fn(f64) -> f64 + 'static) -> Self {
        self.top = Box::new(g);
        self
    }

    pub fn with_left(mut self, g: impl Fn(f64) -> f64 + 'static) -> Self {
        self.left = Box::new(g);
        self
    }

    pub fn with_right(mut self, g: impl Fn(f64) -> f64 + 'static) -> Self {
        self.right = Box::new(g);
        self
    }

    pub fn with_forcing(mut self, f: impl Fn(f64, f64) -> f64 + 'static) -> Self {
        self.forcing = Some(Box::new(f));
        self
    }

    /// Grid spacing for `partitions` intervals per direction.
    pub fn step(&self, partitions: usize) -> f64 {
        (self.upper - self.lower) / partitions as f64
    }

    fn coordinate(&self, i: usize, partitions: usize) -> f64 {
        if i == partitions {
            // Land exactly on the upper bound instead of accumulating rounding.
            self.upper
        } else {
            self.lower + i as f64 * self.step(partitions)
        }
    }

    /// Boundary value at grid node `(j, k)`, or `None` for interior nodes.
    ///
    /// Corners belong to the bottom and top rows.
    fn boundary_value(&self, j: usize, k: usize, partitions: usize) -> Option<f64> {
        let x = self.coordinate(j, partitions);
        let y = self.coordinate(k, partitions);
        if k == 0 {
            Some((self.bottom)(x))
        } else if k == partitions {
            Some((self.top)(x))
        } else if j == 0 {
            Some((self.left)(y))
        } else if j == partitions {
            Some((self.right)(y))
        } else {
            None
        }
    }

    fn check_partitions(partitions: usize) -> Result<(), SolverError> {
        if partitions < 2 {
            return Err(SolverErrorKind::InputError(format!(
                "at least 2 partitions are required, got {partitions}"
            ))
            .into());
        }
        Ok(())
    }

    /// Assembles the five-point system for `partitions` intervals per direction.
    pub fn assemble(&self, partitions: usize) -> Result<LinearSystem, SolverError> {
        Self::check_partitions(partitions)?;
        let m = partitions - 1;
        let size = m * m;
        let h = self.step(partitions);
        log::debug!("assembling {size}x{size} system (N = {partitions}, h = {h:.6})");

        let mut a = Mat::<f64>::zeros(size, size);
        let mut b = Mat::<f64>::zeros(size, 1);

        for k in 1..partitions {
            for j in 1..partitions {
                let row = (k - 1) * m + (j - 1);
                a[(row, row)] = 1.0;

                for (nj, nk) in [(j - 1, k), (j + 1, k), (j, k - 1), (j, k + 1)] {
                    match self.boundary_value(nj, nk, partitions) {
                        Some(g) => b[(row, 0)] += 0.25 * g,
                        None => a[(row, (nk - 1) * m + (nj - 1))] = -0.25,
                    }
                }

                if let Some(f) = &self.forcing {
                    let x = self.coordinate(j, partitions);
                    let y = self.coordinate(k, partitions);
                    b[(row, 0)] += 0.25 * h * h * f(x, y);
                }
            }
        }

        Ok(LinearSystem { a, b })
    }

    /// Solves for the `(N − 1)²` interior values, returned as a column.
    pub fn solve(&self, partitions: usize, kind: SolverKind) -> Result<Mat<f64>, SolverError> {
        let system = self.assemble(partitions)?;
        solve_dense(system.a.as_ref(), system.b.as_ref(), kind)
    }

    /// Solves and returns the full `(N + 1) × (N + 1)` grid, boundary included.
    ///
    /// Row `k` holds `y_k`, column `j` holds `x_j`.
    pub fn solve_grid(&self, partitions: usize, kind: SolverKind) -> Result<Mat<f64>, SolverError> {
        let interior = self.solve(partitions, kind)?;
        let m = partitions - 1;
        Ok(Mat::from_fn(partitions + 1, partitions + 1, |k, j| {
            self.boundary_value(j, k, partitions)
                .unwrap_or_else(|| interior[((k - 1) * m + (j - 1), 0)])
        }))
    }
}

/// The configuration solved by the `driver` binary: `[0, π]²`, `u = sin x` along
/// the bottom, `u = sin y` along the left side, zero elsewhere, no forcing.
pub fn reference_problem() -> DirichletProblem {
    DirichletProblem {
        lower: 0.0,
        upper: PI,
        bottom: Box::new(f64::sin),
        top: Box::new(|_: f64| 0.0),
        left: Box::new(f64::sin),
        right: Box::new(|_: f64| 0.0),
        forcing: None,
    }
}

/// Analytic solution of [`reference_problem`].
pub fn exact_solution(x: f64, y: f64) -> f64 {
    (x.sin() * (PI - y).sinh() + y.sin() * (PI - x).sinh()) / PI.sinh()
}

/// Samples [`exact_solution`] on the `(N + 1) × (N + 1)` grid of [`reference_problem`].
pub fn exact_grid(partitions: usize) -> Result<Mat<f64>, SolverError> {
    if partitions == 0 {
        return Err(SolverErrorKind::InputError("partitions must be positive".to_string()).into());
    }
    let problem = reference_problem();
    Ok(Mat::from_fn(partitions + 1, partitions + 1, |k, j| {
        let value = exact_solution(
            problem.coordinate(j, partitions),
            problem.coordinate(k, partitions),
        );
        if value.abs() < EXACT_CLAMP { 0.0 } else { value }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::is_symmetric;

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(DirichletProblem::new(1.0, 0.0).is_err());
        assert!(DirichletProblem::new(0.0, 0.0).is_err());
    }

    #[test]
    fn test_rejects_too_few_partitions() {
        let problem = reference_problem();
        assert!(problem.assemble(1).is_err());
        assert!(problem.assemble(0).is_err());
    }

    #[test]
    fn test_single_unknown_is_boundary_average() {
        let problem = DirichletProblem::new(0.0, 2.0)
            .unwrap()
            .with_bottom(|_| 1.0)
            .with_top(|_| 2.0)
            .with_left(|_| 3.0)
            .with_right(|_| 6.0);
        let system = problem.assemble(2).unwrap();
        assert_eq!(system.a.nrows(), 1);
        assert_eq!(system.a[(0, 0)], 1.0);
        assert_eq!(system.b[(0, 0)], 3.0);
    }

    #[test]
    fn test_assembled_matrix_structure() {
        let system = reference_problem().assemble(5).unwrap();
        let a = system.a.as_ref();
        assert_eq!(a.nrows(), 16);
        assert!(is_symmetric(a));
        for i in 0..16 {
            assert_eq!(a[(i, i)], 1.0);
            let off: usize = (0..16).filter(|&j| j != i && a[(i, j)] != 0.0).count();
            assert!((2..=4).contains(&off));
        }
        // Interior node (2, 2) has no boundary neighbour.
        assert_eq!(system.b[(5, 0)], 0.0);
    }

    #[test]
    fn test_quadratic_solutions_are_reproduced_exactly() {
        // The five-point stencil is exact for quadratics: u = x² + y² has −Δu = −4.
        let u = |x: f64, y: f64| x * x + y * y;
        let problem = DirichletProblem::new(0.0, 1.0)
            .unwrap()
            .with_bottom(move |x| u(x, 0.0))
            .with_top(move |x| u(x, 1.0))
            .with_left(move |y| u(0.0, y))
            .with_right(move |y| u(1.0, y))
            .with_forcing(|_, _| -4.0);

        let n = 6;
        for kind in [SolverKind::Gaussian, SolverKind::Cholesky] {
            let grid = problem.solve_grid(n, kind).unwrap();
            for k in 0..=n {
                for j in 0..=n {
                    let expected = u(j as f64 / n as f64, k as f64 / n as f64);
                    assert!((grid[(k, j)] - expected).abs() < 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_reference_grid_boundary_rows() {
        let n = 8;
        let grid = reference_problem()
            .solve_grid(n, SolverKind::Gaussian)
            .unwrap();
        for j in 0..=n {
            let x = j as f64 * PI / n as f64;
            assert!((grid[(0, j)] - x.sin()).abs() < 1e-15);
            assert_eq!(grid[(n, j)], 0.0);
        }
        for k in 1..n {
            let y = k as f64 * PI / n as f64;
            assert!((grid[(k, 0)] - y.sin()).abs() < 1e-15);
            assert_eq!(grid[(k, n)], 0.0);
        }
    }

    #[test]
    fn test_exact_grid_matches_boundary_data_and_clamps() {
        let n = 4;
        let grid = exact_grid(n).unwrap();
        assert_eq!(grid.nrows(), n + 1);
        // sin(π) is ~1.2e-16 and must be clamped.
        assert_eq!(grid[(0, n)], 0.0);
        assert_eq!(grid[(n, n)], 0.0);
        assert!((grid[(0, 2)] - 1.0).abs() < 1e-14);
        assert!((grid[(2, 0)] - 1.0).abs() < 1e-14);
        // Centre value is 1 / cosh(π/2).
        assert!((grid[(2, 2)] - 1.0 / (PI / 2.0).cosh()).abs() < 1e-14);
    }
}
