//! CSV ingest for `(x, y)` samples.
//!
//! Design goals:
//! - **Strict schema** for the required `y` column (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Order preserving**: rows are fitted in file order, no sorting
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::warn;

use crate::domain::{DatasetStats, Samples};
use crate::error::AppError;

/// A row-level error encountered during ingest.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: validated samples + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub samples: Samples,
    pub stats: DatasetStats,
    /// `true` when x was synthesized as `0..n-1`.
    pub x_synthesized: bool,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl IngestedData {
    /// Wrap in-memory samples (e.g. synthetic data) in the ingest shape.
    pub fn from_samples(samples: Samples, x_synthesized: bool) -> Self {
        let stats = samples.stats();
        let n = samples.len();
        Self {
            samples,
            stats,
            x_synthesized,
            row_errors: Vec::new(),
            rows_read: n,
            rows_used: n,
        }
    }
}

/// Load samples from a CSV file.
///
/// `x_column = None` ignores any x data and uses `0..n-1`.
pub fn load_samples(path: &Path, x_column: Option<&str>, y_column: &str) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_samples(file, x_column, y_column)
}

/// Parse samples from any CSV reader.
pub fn read_samples<R: Read>(input: R, x_column: Option<&str>, y_column: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let y_key = normalize_header_name(y_column);
    if !header_map.contains_key(&y_key) {
        return Err(AppError::new(2, format!("Missing required column: `{y_column}`")));
    }
    let x_key = x_column.map(normalize_header_name);
    if let Some(key) = &x_key {
        if !header_map.contains_key(key) {
            return Err(AppError::new(2, format!("Missing x column: `{key}`")));
        }
    }

    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let parsed = parse_value(&record, &header_map, &y_key).and_then(|y| match &x_key {
            Some(key) => parse_value(&record, &header_map, key).map(|x| (Some(x), y)),
            None => Ok((None, y)),
        });

        match parsed {
            Ok((x, y)) => {
                if let Some(x) = x {
                    xs.push(x);
                }
                ys.push(y);
            }
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for e in &row_errors {
        warn!(line = e.line, "skipping row: {}", e.message);
    }

    let rows_used = ys.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid rows remain after validation."));
    }

    let x_synthesized = x_key.is_none();
    let samples = Samples::new(ys, if x_synthesized { None } else { Some(xs) })?;
    let stats = samples.stats();

    Ok(IngestedData {
        samples,
        stats,
        x_synthesized,
        row_errors,
        rows_read,
        rows_used,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_value(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Result<f64, String> {
    let raw = header_map
        .get(name)
        .and_then(|&idx| record.get(idx))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing value: `{name}`"))?;
    let v = raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid number for `{name}`: '{raw}'"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite value for `{name}`: '{raw}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_x_and_y_in_file_order() {
        let csv = "\u{feff}X,Y\n-5,0.2388\n-4,1.2529\n6,5.8686\n7,6.0383\n8,6.1825\n";
        let data = read_samples(csv.as_bytes(), Some("x"), "y").unwrap();
        assert_eq!(data.samples.x(), &[-5.0, -4.0, 6.0, 7.0, 8.0]);
        assert_eq!(data.samples.y()[2], 5.8686);
        assert!(!data.x_synthesized);
        assert_eq!(data.rows_used, 5);
    }

    #[test]
    fn synthesizes_x_when_no_column_given() {
        let csv = "y\n1\n2.7\n7.4\n";
        let data = read_samples(csv.as_bytes(), None, "y").unwrap();
        assert_eq!(data.samples.x(), &[0.0, 1.0, 2.0]);
        assert!(data.x_synthesized);
    }

    #[test]
    fn bad_rows_are_skipped_and_reported() {
        let csv = "x,y\n0,1\n1,oops\n2,\n3,20\n4,nan\n5,148\n";
        let data = read_samples(csv.as_bytes(), Some("x"), "y").unwrap();
        assert_eq!(data.rows_read, 6);
        assert_eq!(data.rows_used, 3);
        let lines: Vec<usize> = data.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![3, 4, 6]);
    }

    #[test]
    fn missing_columns_are_schema_errors() {
        let err = read_samples("a,b\n1,2\n".as_bytes(), None, "y").unwrap_err();
        assert_eq!(err.exit_code(), 2);

        let err = read_samples("y\n1\n2\n3\n".as_bytes(), Some("x"), "y").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn too_few_rows_is_a_data_error() {
        let err = read_samples("y\n1\n2\n".as_bytes(), None, "y").unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
