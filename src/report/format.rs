//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the solver code stays clean and testable
//! - output changes are localized

use crate::domain::{FitResult, LinearSystem};
use crate::io::ingest::RowError;
use crate::solve::{Solution, StudyRow, residual};

/// Format the fit summary: linearized model, exponential model, diagnostics.
pub fn format_fit_summary(fit: &FitResult, source: &str) -> String {
    let mut out = String::new();

    out.push_str("=== msolve - Exponential Least-Squares Fit ===\n");
    out.push_str(&format!("Data: {source} (n={})\n", fit.n));
    out.push_str(&format!("Method: {}\n", fit.method.display_name()));
    out.push('\n');

    out.push_str(&format!(
        "Linearized model : log10(N) = {:.5} * x + ({:.2})\n",
        fit.beta,
        fit.log_alpha()
    ));
    if fit.centering_offset != 0.0 {
        out.push_str(&format!(
            "Centered form    : log10(N) = {:.5} * (x - {:.4}) + {:.5}\n",
            fit.beta, fit.centering_offset, fit.intercept
        ));
    }
    out.push_str(&format!(
        "Exponential model: N = {:.2e} * 10^({:.5} * x)\n",
        fit.alpha, fit.beta
    ));
    out.push_str(&format!("R^2 (log space)  : {:.6}\n", fit.r_squared));

    out.push_str("\nDiagnostics:\n");
    for d in &fit.diagnostics {
        out.push_str(&format!("  {:<12} {:>22}\n", d.label, fmt_num(d.value)));
    }

    out
}

/// Format predictions as a small table.
pub fn format_predictions(predictions: &[(f64, f64)]) -> String {
    let mut out = String::new();
    out.push_str("Predictions:\n");
    for (x, y) in predictions {
        out.push_str(&format!("  x = {x:<10} -> {y:.3e}\n"));
    }
    out
}

/// Format skipped CSV rows.
pub fn format_row_errors(errors: &[RowError]) -> String {
    let mut out = String::new();
    if errors.is_empty() {
        return out;
    }
    out.push_str(&format!("Skipped rows ({}):\n", errors.len()));
    for e in errors {
        out.push_str(&format!("  line {}: {}\n", e.line, e.message));
    }
    out
}

/// Format a solution vector plus convergence information.
pub fn format_solution(system: &LinearSystem, solution: &Solution) -> String {
    let mut out = String::new();
    let n = system.size();

    match solution {
        Solution::Direct(s) => {
            out.push_str(&format!("Direct solve ({n}x{n}), {} row swap(s)\n", s.row_swaps));
            out.push_str(&format!("det(A) = {}\n", fmt_num(s.determinant)));
        }
        Solution::GaussSeidel(s) => {
            if s.converged {
                out.push_str(&format!(
                    "Convergence reached in {} iterations.\n",
                    s.iterations_used
                ));
            } else {
                out.push_str(&format!(
                    "Warning: maximum of {} iterations reached.\n",
                    s.iterations_used
                ));
                out.push_str("The solution may not have converged to the requested tolerance.\n");
            }
            out.push_str(&format!("Last update (max-norm): {:.3e}\n", s.final_delta));
        }
    }

    out.push_str("\nSolution (vector x):\n\n");
    for (i, v) in solution.x().iter().enumerate() {
        out.push_str(&format!("  x[{}] = {v:.6}\n", i + 1));
    }
    out.push_str(&format!("\nResidual ||Ax - b||inf = {:.3e}\n", residual(system, solution)));

    out
}

/// Format the convergence study table.
pub fn format_study(rows: &[StudyRow]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:>10} {:>10} {:>10} {:>12} {:>12}\n",
            "tolerance", "sweeps", "converged", "last_delta", "residual"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!("{:-<10} {:-<10} {:-<10} {:-<12} {:-<12}\n", "", "", "", "", "").trim_end(),
    );
    out.push('\n');

    for r in rows {
        out.push_str(
            format!(
                "{:>10.1e} {:>10} {:>10} {:>12.3e} {:>12.3e}\n",
                r.tolerance,
                r.iterations_used,
                if r.converged { "yes" } else { "no" },
                r.final_delta,
                r.residual
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_num(v: f64) -> String {
    if v != 0.0 && (v.abs() >= 1e6 || v.abs() < 1e-3) {
        format!("{v:.6e}")
    } else {
        format!("{v:.6}")
    }
}
