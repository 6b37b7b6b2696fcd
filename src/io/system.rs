//! Linear systems as JSON files.
//!
//! Schema (`domain::SystemFile`):
//!
//! ```json
//! { "a": [[0.55, 0.25], [0.30, 0.45]], "b": [4800, 5800] }
//! ```

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::domain::{LinearSystem, SystemFile};
use crate::error::AppError;
use crate::solve::Solution;

/// Read and validate a system file.
pub fn read_system_json(path: &Path) -> Result<LinearSystem, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open system JSON '{}': {e}", path.display())))?;
    let raw: SystemFile = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid system JSON: {e}")))?;
    Ok(LinearSystem::from_rows(&raw.a, &raw.b)?)
}

/// Parse a system from a JSON string.
pub fn parse_system_json(text: &str) -> Result<LinearSystem, AppError> {
    let raw: SystemFile =
        serde_json::from_str(text).map_err(|e| AppError::new(2, format!("Invalid system JSON: {e}")))?;
    Ok(LinearSystem::from_rows(&raw.a, &raw.b)?)
}

#[derive(Serialize)]
struct SolutionFile<'a> {
    tool: &'static str,
    generated_at: chrono::DateTime<chrono::Utc>,
    system: SystemFile,
    solution: &'a Solution,
    residual: f64,
}

/// Write the system together with its solution.
pub fn write_solution_json(
    path: &Path,
    system: &LinearSystem,
    solution: &Solution,
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(2, format!("Failed to create solution JSON '{}': {e}", path.display()))
    })?;

    let out = SolutionFile {
        tool: "msolve",
        generated_at: chrono::Utc::now(),
        system: SystemFile {
            a: system.rows(),
            b: system.b().iter().copied().collect(),
        },
        solution,
        residual: crate::solve::residual(system, solution),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write solution JSON: {e}")))?;
    Ok(())
}
