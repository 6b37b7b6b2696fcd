//! Reporting utilities: prediction tables and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::FitResult;
use crate::error::Result;

/// Evaluate the fit at each query point, pairing inputs with predictions.
pub fn prediction_table(fit: &FitResult, xs: &[f64]) -> Result<Vec<(f64, f64)>> {
    xs.iter().map(|&x| Ok((x, fit.predict(x)?))).collect()
}
