//! Shared workflow used by the front-end commands.
//!
//! Keeping this in one place avoids duplicating the core steps:
//! load data -> fit -> predict, and load system -> solve.
//!
//! The command handlers can then focus on presentation (printing and exports).

use std::path::PathBuf;

use crate::data::{
    MOORE_PREDICTION_YEARS, SyntheticConfig, generate_exponential, mines_system, moore_samples,
    random_dominant_system,
};
use crate::domain::{FitMethod, FitResult, LinearSystem, Sample};
use crate::error::AppError;
use crate::fit::fit_with;
use crate::io::ingest::{RowError, load_samples};
use crate::io::system::read_system_json;
use crate::report::prediction_table;

/// Where fit samples come from.
#[derive(Debug, Clone)]
pub enum SampleSource {
    Moore,
    Csv(PathBuf),
    Synthetic(SyntheticConfig),
}

/// Where a linear system comes from.
#[derive(Debug, Clone)]
pub enum SystemSource {
    Mines,
    File(PathBuf),
    Random { n: usize, seed: u64 },
}

/// All computed outputs of a single `msolve fit` run.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub source_label: String,
    pub samples: Vec<Sample>,
    pub row_errors: Vec<RowError>,
    pub fit: FitResult,
    pub predictions: Vec<(f64, f64)>,
}

/// Load samples, fit them, and evaluate the requested predictions.
///
/// With no explicit query points the Moore's-law dataset predicts its
/// classic years; other sources predict nothing.
pub fn run_fit(source: &SampleSource, method: FitMethod, predict_at: &[f64]) -> Result<FitRun, AppError> {
    let (samples, row_errors, source_label) = load_fit_samples(source)?;

    let fit = fit_with(&samples, method)?;

    let query: &[f64] = match (predict_at.is_empty(), source) {
        (true, SampleSource::Moore) => &MOORE_PREDICTION_YEARS,
        _ => predict_at,
    };
    let predictions = prediction_table(&fit, query)?;

    Ok(FitRun {
        source_label,
        samples,
        row_errors,
        fit,
        predictions,
    })
}

fn load_fit_samples(source: &SampleSource) -> Result<(Vec<Sample>, Vec<RowError>, String), AppError> {
    match source {
        SampleSource::Moore => Ok((
            moore_samples(),
            Vec::new(),
            "built-in Moore's law transistor counts".to_string(),
        )),
        SampleSource::Csv(path) => {
            let ingested = load_samples(path)?;
            let label = format!(
                "{} ({} of {} rows used)",
                path.display(),
                ingested.samples.len(),
                ingested.rows_read
            );
            Ok((ingested.samples, ingested.row_errors, label))
        }
        SampleSource::Synthetic(config) => {
            let samples = generate_exponential(config)?;
            let label = format!(
                "synthetic alpha={} beta={} noise={} seed={}",
                config.alpha, config.beta, config.noise_log10, config.seed
            );
            Ok((samples, Vec::new(), label))
        }
    }
}

/// Materialize a linear system.
pub fn load_system(source: &SystemSource) -> Result<LinearSystem, AppError> {
    match source {
        SystemSource::Mines => Ok(mines_system()),
        SystemSource::File(path) => read_system_json(path),
        SystemSource::Random { n, seed } => Ok(random_dominant_system(*n, *seed)?),
    }
}
