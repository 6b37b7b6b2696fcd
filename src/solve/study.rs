//! Convergence study: how many Gauss-Seidel sweeps each tolerance costs.
//!
//! Every tolerance is an independent `solve_iterative` call on its own copy
//! of the working vectors, so the runs are evaluated in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{IterativeParams, LinearSystem};
use crate::error::{Result, SolverError};
use crate::math::{residual_inf_norm, solve_iterative};

/// One line of the study table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyRow {
    pub tolerance: f64,
    pub iterations_used: usize,
    pub converged: bool,
    pub final_delta: f64,
    /// `‖A·x − b‖∞` of the returned iterate.
    pub residual: f64,
}

/// Run Gauss-Seidel once per tolerance; rows come back in input order.
pub fn convergence_study(
    system: &LinearSystem,
    tolerances: &[f64],
    max_iterations: usize,
) -> Result<Vec<StudyRow>> {
    if tolerances.is_empty() {
        return Err(SolverError::invalid("At least one tolerance is required."));
    }

    tolerances
        .par_iter()
        .map(|&tolerance| {
            let params = IterativeParams {
                tolerance,
                max_iterations,
                x0: None,
            };
            let sol = solve_iterative(system, &params)?;
            Ok(StudyRow {
                tolerance,
                iterations_used: sol.iterations_used,
                converged: sol.converged,
                final_delta: sol.final_delta,
                residual: residual_inf_norm(system.a(), &sol.x, system.b()),
            })
        })
        .collect()
}

/// `count` tolerances from `10^-1` down to `10^-count`.
pub fn decade_tolerances(count: usize) -> Vec<f64> {
    (1..=count as i32).map(|k| 10f64.powi(-k)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::mines_system;

    #[test]
    fn tighter_tolerance_never_needs_fewer_sweeps() {
        let tolerances = decade_tolerances(10);
        let rows = convergence_study(&mines_system(), &tolerances, 1000).unwrap();
        assert_eq!(rows.len(), 10);
        for (row, tol) in rows.iter().zip(&tolerances) {
            assert_eq!(row.tolerance, *tol);
            assert!(row.converged);
        }
        assert!(rows.windows(2).all(|w| w[0].iterations_used <= w[1].iterations_used));
        assert_eq!(rows[3].iterations_used, 17);
    }

    #[test]
    fn study_propagates_precondition_failure() {
        let sys = LinearSystem::from_rows(&[vec![0.0, 1.0], vec![1.0, 1.0]], &[1.0, 1.0]).unwrap();
        assert_eq!(
            convergence_study(&sys, &[1e-3], 10).unwrap_err(),
            SolverError::DegenerateDiagonal { row: 0 }
        );
        assert!(convergence_study(&mines_system(), &[], 10).is_err());
    }

    #[test]
    fn decade_tolerances_are_descending_powers_of_ten() {
        let tols = decade_tolerances(3);
        assert_eq!(tols.len(), 3);
        for (got, want) in tols.iter().zip([0.1, 0.01, 0.001]) {
            assert!((got / want - 1.0).abs() < 1e-12);
        }
    }
}
