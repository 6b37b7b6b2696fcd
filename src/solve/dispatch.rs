//! Thin dispatch over the two linear solvers.
//!
//! Front-ends describe what they want with a plain `SolverOptions` value and
//! get back a `Solution`; they never call the solvers directly.

use serde::{Deserialize, Serialize};

use crate::domain::{DirectSolution, IterativeParams, IterativeSolution, LinearSystem, SolverKind};
use crate::error::{Result, SolverError};
use crate::math::{residual_inf_norm, solve_direct, solve_iterative};

/// Largest system the interactive front-end accepts by default.
pub const DEFAULT_MAX_SIZE: usize = 10;

/// How to solve a system.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub method: SolverKind,
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Upper bound on `n`, enforced here on behalf of the front-end.
    pub max_size: usize,
    pub x0: Option<Vec<f64>>,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            method: SolverKind::Direct,
            tolerance: 1e-4,
            max_iterations: 1000,
            max_size: DEFAULT_MAX_SIZE,
            x0: None,
        }
    }
}

/// Result of either solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum Solution {
    Direct(DirectSolution),
    GaussSeidel(IterativeSolution),
}

impl Solution {
    pub fn x(&self) -> &[f64] {
        match self {
            Solution::Direct(s) => &s.x,
            Solution::GaussSeidel(s) => &s.x,
        }
    }
}

/// Check the size bound, then run the selected solver.
pub fn solve(system: &LinearSystem, options: &SolverOptions) -> Result<Solution> {
    let n = system.size();
    if n > options.max_size {
        return Err(SolverError::invalid(format!(
            "System size {n} exceeds the limit of {}.",
            options.max_size
        )));
    }

    log::info!("solving {n}x{n} system with {}", options.method.display_name());
    match options.method {
        SolverKind::Direct => solve_direct(system).map(Solution::Direct),
        SolverKind::GaussSeidel => {
            let params = IterativeParams {
                tolerance: options.tolerance,
                max_iterations: options.max_iterations,
                x0: options.x0.clone(),
            };
            solve_iterative(system, &params).map(Solution::GaussSeidel)
        }
    }
}

/// `‖A·x − b‖∞` for a solution of `system`.
pub fn residual(system: &LinearSystem, solution: &Solution) -> f64 {
    residual_inf_norm(system.a(), solution.x(), system.b())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mines_system;

    #[test]
    fn dispatches_to_both_solvers() {
        let sys = mines_system();
        let direct = solve(&sys, &SolverOptions::default()).unwrap();
        assert!(matches!(direct, Solution::Direct(_)));
        assert!(residual(&sys, &direct) < 1e-9);

        let options = SolverOptions {
            method: SolverKind::GaussSeidel,
            ..SolverOptions::default()
        };
        let iterative = solve(&sys, &options).unwrap();
        match &iterative {
            Solution::GaussSeidel(s) => assert!(s.converged),
            other => panic!("unexpected solution {other:?}"),
        }
        for (a, b) in direct.x().iter().zip(iterative.x()) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn size_limit_is_enforced() {
        let options = SolverOptions {
            max_size: 2,
            ..SolverOptions::default()
        };
        assert!(matches!(
            solve(&mines_system(), &options),
            Err(SolverError::InvalidInput(_))
        ));
    }
}
