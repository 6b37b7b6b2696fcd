//! Dense direct solver: Gaussian elimination with partial pivoting.
//!
//! For each column `k` we pick the row `p ≥ k` with the largest `|a_pk|`, swap
//! it into place, and eliminate below it. Back substitution then recovers `x`.
//!
//! Singularity test: a pivot is rejected when `|pivot| ≤ n·ε·‖A‖∞`. Tying the
//! threshold to the matrix norm makes the test invariant to uniform scaling of
//! the system. Both sides are divided by `max |a_ij|` so the comparison holds
//! for entries near `f64::MAX`, where `‖A‖∞` itself is not representable.
//!
//! A solution with a non-finite component is reported as `OverflowCondition`.
//! The determinant is informational and may saturate to `±inf`.

use crate::domain::{DirectSolution, LinearSystem};
use crate::error::{Result, SolverError};
use crate::math::norms::scaled_matrix_inf_norm;

/// Solve `A·x = b` exactly (up to rounding).
///
/// Works on copies of `A` and `b`; the caller's system is untouched.
pub fn solve_direct(system: &LinearSystem) -> Result<DirectSolution> {
    let n = system.size();
    let mut a = system.a().clone();
    let mut b = system.b().clone();

    let (scale, ratio) = scaled_matrix_inf_norm(&a);
    if scale == 0.0 {
        return Err(SolverError::SingularMatrix { row: 0 });
    }
    // Threshold on `|pivot| / scale`.
    let tol = n as f64 * f64::EPSILON * ratio;

    let mut row_swaps = 0usize;
    let mut determinant = 1.0;

    for k in 0..n {
        let mut p = k;
        let mut best = a[(k, k)].abs();
        for r in (k + 1)..n {
            let v = a[(r, k)].abs();
            if v > best {
                best = v;
                p = r;
            }
        }

        if !(best / scale > tol) {
            log::debug!(
                "column {k}: largest pivot candidate {best:e} <= tol {:e}",
                tol * scale
            );
            return Err(SolverError::SingularMatrix { row: k });
        }

        if p != k {
            log::debug!("column {k}: swapping rows {k} and {p} (pivot {best:e})");
            a.swap_rows(k, p);
            b.swap_rows(k, p);
            row_swaps += 1;
            determinant = -determinant;
        }

        let pivot = a[(k, k)];
        determinant *= pivot;

        for r in (k + 1)..n {
            let factor = a[(r, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            a[(r, k)] = 0.0;
            for c in (k + 1)..n {
                a[(r, c)] -= factor * a[(k, c)];
            }
            b[r] -= factor * b[k];
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut s = b[i];
        for j in (i + 1)..n {
            s -= a[(i, j)] * x[j];
        }
        x[i] = s / a[(i, i)];
    }

    if let Some(i) = x.iter().position(|v| !v.is_finite()) {
        return Err(SolverError::OverflowCondition(format!(
            "solution component x[{}] = {} is outside the f64 range",
            i + 1,
            x[i]
        )));
    }

    Ok(DirectSolution {
        x,
        row_swaps,
        determinant,
    })
}
