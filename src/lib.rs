//! `moore-solve` library crate.
//!
//! Two small numerical tools share one crate:
//!
//! - exponential least-squares fitting, `N = alpha * 10^(beta * x)`, with
//!   overflow-aware prediction (`fit`, `models`)
//! - dense linear-system solvers: Gaussian elimination with partial pivoting
//!   and Gauss-Seidel iteration (`math`, `solve`)
//!
//! The binary (`msolve`) is a thin wrapper around this library so that the
//! numerical core stays testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
pub mod solve;

pub use domain::{
    DirectSolution, FitMethod, FitResult, IterativeParams, IterativeSolution, LinearSystem, Sample,
};
pub use error::{Result, SolverError};
pub use fit::{fit, fit_with};
pub use math::{solve_direct, solve_iterative};
pub use models::predict;
