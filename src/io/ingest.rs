//! CSV ingest of sample sets.
//!
//! This module turns a two-column CSV into a clean `Vec<Sample>` that is safe
//! to fit.
//!
//! Design goals:
//! - **Strict schema** for the two required columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::Sample;
use crate::error::AppError;

/// Accepted header names for the independent variable.
const X_COLUMNS: [&str; 4] = ["x", "year", "ano", "t"];
/// Accepted header names for the positive dependent variable.
const Y_COLUMNS: [&str; 5] = ["y", "count", "transistors", "n", "value"];

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: usable samples plus what was skipped.
#[derive(Debug, Clone)]
pub struct IngestedSamples {
    pub samples: Vec<Sample>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load samples from a CSV file.
pub fn load_samples(path: &Path) -> Result<IngestedSamples, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_samples(file)
}

/// Read samples from any CSV source.
pub fn read_samples<R: Read>(source: R) -> Result<IngestedSamples, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let x_idx = find_column(&header_map, &X_COLUMNS)?;
    let y_idx = find_column(&header_map, &Y_COLUMNS)?;

    let mut samples = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (i, record) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Unreadable row: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, x_idx, y_idx) {
            Ok(sample) => samples.push(sample),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    if !row_errors.is_empty() {
        log::warn!("skipped {} of {rows_read} CSV rows", row_errors.len());
    }

    Ok(IngestedSamples {
        samples,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect()
}

fn find_column(header_map: &HashMap<String, usize>, names: &[&str]) -> Result<usize, AppError> {
    names
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| {
            AppError::new(
                2,
                format!("CSV is missing a required column (one of: {}).", names.join(", ")),
            )
        })
}

fn parse_row(record: &StringRecord, x_idx: usize, y_idx: usize) -> Result<Sample, String> {
    let x = parse_field(record, x_idx, "x")?;
    let y = parse_field(record, y_idx, "y")?;
    if y <= 0.0 {
        return Err(format!("y={y} must be > 0 for the log transform"));
    }
    Ok(Sample::new(x, y))
}

fn parse_field(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing {name}"))?;
    let v: f64 = raw
        .replace('_', "")
        .parse()
        .map_err(|_| format!("{name}='{raw}' is not a number"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{name}='{raw}' is not finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_aliased_headers() {
        let csv = "Year,Transistors\n1971,2250\n1972, 3300\n";
        let ingested = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 2);
        assert_eq!(
            ingested.samples,
            vec![Sample::new(1971.0, 2250.0), Sample::new(1972.0, 3300.0)]
        );
        assert!(ingested.row_errors.is_empty());
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "x,y\n1,10\n2,0\n3,abc\n4,-5\n5,\n6,1_000\n";
        let ingested = read_samples(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 6);
        assert_eq!(
            ingested.samples,
            vec![Sample::new(1.0, 10.0), Sample::new(6.0, 1000.0)]
        );
        let lines: Vec<usize> = ingested.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 5, 6]);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = read_samples("a,b\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn load_samples_reports_missing_file() {
        let err = load_samples(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to open CSV"));
    }
}
