//! Export predictions to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::error::AppError;

/// Write `x,y_pred` rows.
pub fn write_predictions_csv(path: &Path, predictions: &[(f64, f64)]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| {
        AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writer
        .write_record(["x", "y_pred"])
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for (x, y) in predictions {
        writer
            .write_record([format!("{x}"), format!("{y:.6e}")])
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
