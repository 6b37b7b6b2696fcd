//! Read/write fit JSON files.
//!
//! Fit JSON is the portable representation of a fitted exponential model:
//! - alpha, beta and the log-space intercept
//! - the method and its intermediate sums
//! - a generation timestamp
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{FitFile, FitResult};
use crate::error::AppError;

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, fit: &FitResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    let out = FitFile {
        tool: "msolve".to_string(),
        generated_at: chrono::Utc::now(),
        fit: fit.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;
    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open fit JSON '{}': {e}", path.display())))?;
    let fit: FitFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid fit JSON: {e}")))?;
    if !(fit.fit.alpha.is_finite() && fit.fit.alpha > 0.0 && fit.fit.beta.is_finite()) {
        return Err(AppError::new(2, "Fit JSON holds an invalid alpha/beta pair."));
    }
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::moore_samples;
    use crate::fit::fit;

    #[test]
    fn fit_file_round_trip_preserves_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fit.json");
        let result = fit(&moore_samples()).unwrap();

        write_fit_json(&path, &result).unwrap();
        let loaded = read_fit_json(&path).unwrap();

        assert_eq!(loaded.tool, "msolve");
        assert_eq!(loaded.fit.method, result.method);
        assert_eq!(loaded.fit.diagnostics.len(), result.diagnostics.len());
        assert!((loaded.fit.beta - result.beta).abs() <= 1e-15 * result.beta.abs());
    }

    #[test]
    fn invalid_fit_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "[]").unwrap();
        assert_eq!(read_fit_json(&path).unwrap_err().exit_code(), 2);
    }
}
