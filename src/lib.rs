//! Dense direct solvers for the five-point Laplace problem, plus the tooling
//! that sweeps external solver binaries and plots what they produce.
//!
//! The crate has two halves that meet at a plain-text matrix format:
//!
//! ## Numerical side
//!
//! [`pde::DirichletProblem`] discretises `-Δu = f` on a square with the
//! five-point stencil and assembles the dense `(N-1)² × (N-1)²` system. The
//! system is solved by one of the direct methods in [`algorithms`], selected
//! through [`solvers::SolverKind`]:
//!
//! - **Gaussian elimination** with scaled partial pivoting followed by back
//!   substitution.
//! - **Cholesky** factorisation `A = L Lᵀ` on packed symmetric storage, then a
//!   forward and a backward triangular solve.
//!
//! The packed storage types ([`matrix::UpperTriangular`],
//! [`matrix::LowerTriangular`], [`matrix::Symmetric`],
//! [`matrix::Tridiagonal`]) share the [`matrix::StructuredMatrix`] trait with
//! `faer` dense matrices, so the triangular solvers accept either.
//!
//! ## Sweep side
//!
//! The `error_study`, `runtime_study` and `surface` binaries treat the solver
//! programs as black boxes: they run them through [`utils::process`], parse the
//! matrices they leave behind with [`utils::grid_io`], reduce them with
//! [`metrics`], record the results through [`series`], and render PNG files with
//! [`plot`].
//!
//! ## Example
//!
//! ```rust
//! use laplace_grid::{SolverKind, exact_grid, l2_error, reference_problem};
//!
//! let n = 8;
//! let approx = reference_problem().solve_grid(n, SolverKind::Cholesky).unwrap();
//! let exact = exact_grid(n).unwrap();
//! let err = l2_error(approx.as_ref(), exact.as_ref(), n).unwrap();
//! assert!(err < 5e-2);
//! ```

pub mod algorithms;
pub mod error;
pub mod matrix;
pub mod metrics;
pub mod pde;
pub mod plot;
pub mod series;
pub mod solvers;
pub mod utils;

pub use error::SolverError;
pub use metrics::l2_error;
pub use pde::{DirichletProblem, exact_grid, reference_problem};
pub use solvers::{SolverKind, solve_auto, solve_dense};
