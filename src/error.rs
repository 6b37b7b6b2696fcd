//! Error types.
//!
//! - `SolverError` is what the numerical core returns. Every failure mode of the
//!   fitter, the predictor and the linear solvers is an explicit variant.
//! - `AppError` is what the `msolve` binary reports: a message plus a process
//!   exit code. Solver errors are mapped onto it at the boundary.

/// Failure modes of the solver layer.
///
/// Running out of Gauss-Seidel iterations is *not* an error: the iterative
/// solver returns a best-effort result with `converged = false`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    /// Malformed input: non-positive y, degenerate x spread, size mismatch,
    /// non-finite entries or out-of-range parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The direct solver found no usable pivot in column `row`.
    #[error("Singular matrix: no unique solution (no usable pivot at row {row})")]
    SingularMatrix { row: usize },

    /// Gauss-Seidel cannot run because `a[row][row] == 0`.
    #[error("Zero on the main diagonal at row {row}; reorder the equations before using Gauss-Seidel")]
    DegenerateDiagonal { row: usize },

    /// A prediction or intermediate value is outside the representable range.
    #[error("Overflow: {0}")]
    OverflowCondition(String),
}

impl SolverError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SolverError::InvalidInput(message.into())
    }
}

/// Result alias for the solver layer.
pub type Result<T> = std::result::Result<T, SolverError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<SolverError> for AppError {
    fn from(err: SolverError) -> Self {
        let exit_code = match err {
            SolverError::InvalidInput(_) => 2,
            SolverError::SingularMatrix { .. } | SolverError::DegenerateDiagonal { .. } => 3,
            SolverError::OverflowCondition(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
