//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed between the solver layer and the front-end by value
//! - exported to JSON/CSV
//! - reloaded later for predictions

use clap::ValueEnum;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};

/// One observation `(x, y)` of an exponential process. `y` must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// How the two-parameter log-linear fit is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitMethod {
    /// Work in `t = x - mean(x)`; well conditioned for large x such as calendar years.
    Centered,
    /// Solve the raw 2×2 normal equations.
    Uncentered,
}

impl FitMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            FitMethod::Centered => "centered",
            FitMethod::Uncentered => "uncentered",
        }
    }
}

/// A labeled intermediate quantity, kept for explanatory output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub label: String,
    pub value: f64,
}

impl Diagnostic {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Fitted model `N = alpha * 10^(beta * x)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub alpha: f64,
    pub beta: f64,
    /// Log-space intercept in the working coordinate: `mean(log10 y)` for a
    /// centered fit, `log10(alpha)` for an uncentered one.
    pub intercept: f64,
    /// `mean(x)` for a centered fit, `0` otherwise.
    pub centering_offset: f64,
    pub method: FitMethod,
    pub n: usize,
    /// Coefficient of determination of the linearized fit.
    pub r_squared: f64,
    pub diagnostics: Vec<Diagnostic>,
}

impl FitResult {
    /// `log10(alpha)` in original x coordinates.
    pub fn log_alpha(&self) -> f64 {
        self.intercept - self.beta * self.centering_offset
    }

    /// Evaluate the fitted curve at `x`.
    pub fn predict(&self, x: f64) -> Result<f64> {
        crate::models::predict(x, self.alpha, self.beta)
    }

    /// Look up a diagnostic by label.
    pub fn diagnostic(&self, label: &str) -> Option<f64> {
        self.diagnostics
            .iter()
            .find(|d| d.label == label)
            .map(|d| d.value)
    }
}

/// A square system `A·x = b`.
///
/// Construction validates the shape and rejects non-finite entries, so the
/// solvers can assume a well-formed system.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    a: DMatrix<f64>,
    b: DVector<f64>,
}

impl LinearSystem {
    pub fn new(a: DMatrix<f64>, b: DVector<f64>) -> Result<Self> {
        let n = a.nrows();
        if n == 0 {
            return Err(SolverError::invalid("System must have at least one equation."));
        }
        if a.ncols() != n {
            return Err(SolverError::invalid(format!(
                "Matrix A must be square, got {}x{}.",
                n,
                a.ncols()
            )));
        }
        if b.len() != n {
            return Err(SolverError::invalid(format!(
                "Vector b has length {} but A is {n}x{n}.",
                b.len()
            )));
        }
        for i in 0..n {
            for j in 0..n {
                let v = a[(i, j)];
                if !v.is_finite() {
                    return Err(SolverError::invalid(format!(
                        "A[{}][{}] = {v} is not finite.",
                        i + 1,
                        j + 1
                    )));
                }
            }
        }
        if let Some((i, v)) = b.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SolverError::invalid(format!("b[{}] = {v} is not finite.", i + 1)));
        }
        Ok(Self { a, b })
    }

    /// Build a system from row-major nested vectors.
    pub fn from_rows(rows: &[Vec<f64>], b: &[f64]) -> Result<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n) {
            return Err(SolverError::invalid(format!(
                "Row {} has {} entries, expected {n}.",
                i + 1,
                row.len()
            )));
        }
        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Self::new(
            DMatrix::from_row_slice(n, n, &flat),
            DVector::from_column_slice(b),
        )
    }

    pub fn size(&self) -> usize {
        self.b.len()
    }

    pub fn a(&self) -> &DMatrix<f64> {
        &self.a
    }

    pub fn b(&self) -> &DVector<f64> {
        &self.b
    }

    /// Row-major copy of `A`, for serialization.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        self.a
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect()
    }
}

/// Output of the direct solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectSolution {
    pub x: Vec<f64>,
    /// Number of row interchanges performed by partial pivoting.
    pub row_swaps: usize,
    pub determinant: f64,
}

/// Output of the Gauss-Seidel solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterativeSolution {
    pub x: Vec<f64>,
    pub iterations_used: usize,
    pub converged: bool,
    /// Max-norm of the last sweep's update.
    pub final_delta: f64,
    /// Max-norm update of every sweep, in order.
    pub deltas: Vec<f64>,
}

/// Tuning for `solve_iterative`.
#[derive(Debug, Clone, PartialEq)]
pub struct IterativeParams {
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Initial guess; the zero vector when `None`.
    pub x0: Option<Vec<f64>>,
}

impl Default for IterativeParams {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 1000,
            x0: None,
        }
    }
}

/// Which linear solver the front-end dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Gaussian elimination with partial pivoting.
    Direct,
    /// Gauss-Seidel iteration.
    GaussSeidel,
}

impl SolverKind {
    pub fn display_name(self) -> &'static str {
        match self {
            SolverKind::Direct => "Direct method (Gauss)",
            SolverKind::GaussSeidel => "Iterative method (Gauss-Seidel)",
        }
    }
}

/// A saved fit file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub fit: FitResult,
}

/// A linear system file (JSON): `{"a": [[...]], "b": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemFile {
    pub a: Vec<Vec<f64>>,
    pub b: Vec<f64>,
}
