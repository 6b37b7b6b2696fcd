//! Gauss-Seidel iteration for `A·x = b`.
//!
//! One sweep updates every unknown once, in increasing row order:
//!
//! ```text
//! x_i ← (b_i − Σ_{j<i} a_ij·x_j[new] − Σ_{j>i} a_ij·x_j[old]) / a_ii
//! ```
//!
//! Entries `j < i` were already overwritten during the current sweep; that is
//! what separates Gauss-Seidel from Jacobi. The previous iterate is copied
//! before each sweep so the stopping test can compare old and new.
//!
//! The only precondition checked is a nonzero diagonal. Diagonal dominance is
//! not required, so the method can diverge on unsuitable systems; the caller
//! sees that as `converged = false`.

use crate::domain::{IterativeParams, IterativeSolution, LinearSystem};
use crate::error::{Result, SolverError};
use crate::math::norms::max_abs_diff;

/// Run Gauss-Seidel sweeps until `‖x_new − x_old‖∞ < tolerance` or the
/// iteration budget is exhausted.
pub fn solve_iterative(system: &LinearSystem, params: &IterativeParams) -> Result<IterativeSolution> {
    let n = system.size();
    validate_params(n, params)?;
    check_diagonal(system)?;

    let a = system.a();
    let b = system.b();

    let mut x = match &params.x0 {
        Some(x0) => x0.clone(),
        None => vec![0.0; n],
    };
    let mut x_old = x.clone();
    let mut deltas = Vec::new();
    let mut warned_non_finite = false;

    for k in 0..params.max_iterations {
        x_old.copy_from_slice(&x);

        for i in 0..n {
            let mut s = b[i];
            for j in 0..i {
                s -= a[(i, j)] * x[j];
            }
            for j in (i + 1)..n {
                s -= a[(i, j)] * x_old[j];
            }
            x[i] = s / a[(i, i)];
        }

        let delta = max_abs_diff(&x, &x_old);
        deltas.push(delta);
        log::debug!("sweep {}: delta = {delta:e}", k + 1);

        if !warned_non_finite && x.iter().any(|v| !v.is_finite()) {
            log::warn!(
                "Gauss-Seidel iterate became non-finite at sweep {}; the system is likely not diagonally dominant",
                k + 1
            );
            warned_non_finite = true;
        }

        if delta < params.tolerance {
            log::info!("Gauss-Seidel converged after {} sweeps (delta {delta:e})", k + 1);
            return Ok(IterativeSolution {
                x,
                iterations_used: k + 1,
                converged: true,
                final_delta: delta,
                deltas,
            });
        }
    }

    let final_delta = deltas.last().copied().unwrap_or(f64::NAN);
    log::warn!(
        "Gauss-Seidel stopped after {} sweeps without reaching tolerance {:e} (last delta {final_delta:e})",
        params.max_iterations,
        params.tolerance
    );
    Ok(IterativeSolution {
        x,
        iterations_used: params.max_iterations,
        converged: false,
        final_delta,
        deltas,
    })
}

fn validate_params(n: usize, params: &IterativeParams) -> Result<()> {
    if !(params.tolerance.is_finite() && params.tolerance > 0.0) {
        return Err(SolverError::invalid(format!(
            "Tolerance must be finite and > 0, got {}.",
            params.tolerance
        )));
    }
    if params.max_iterations < 1 {
        return Err(SolverError::invalid("Max iterations must be >= 1."));
    }
    if let Some(x0) = &params.x0 {
        if x0.len() != n {
            return Err(SolverError::invalid(format!(
                "Initial guess has length {} but the system has {n} unknowns.",
                x0.len()
            )));
        }
        if x0.iter().any(|v| !v.is_finite()) {
            return Err(SolverError::invalid("Initial guess must be finite."));
        }
    }
    Ok(())
}

fn check_diagonal(system: &LinearSystem) -> Result<()> {
    let a = system.a();
    match (0..system.size()).find(|&i| a[(i, i)] == 0.0) {
        Some(row) => Err(SolverError::DegenerateDiagonal { row }),
        None => Ok(()),
    }
}
