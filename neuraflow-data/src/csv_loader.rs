//! Loading numeric tables from CSV files.

use neuraflow_core::{NeuraFlowError, Tensor};
use std::path::Path;

fn csv_error(path: &Path, err: csv::Error) -> NeuraFlowError {
    if err.is_io_error() {
        NeuraFlowError::Io(format!("{}: {}", path.display(), err))
    } else {
        NeuraFlowError::DataError(format!("{}: {}", path.display(), err))
    }
}

/// Reads `feature_columns` and `target_column` (0-based) of a CSV file with a
/// header row into a `[rows, features]` and a `[rows, 1]` tensor.
///
/// # Errors
/// * `Io` if the file cannot be read.
/// * `DataError` for malformed CSV, a missing column, a non-numeric cell or
///   a file without data rows.
pub fn load_csv<P: AsRef<Path>>(
    path: P,
    feature_columns: &[usize],
    target_column: usize,
) -> Result<(Tensor, Tensor), NeuraFlowError> {
    let path = path.as_ref();
    if feature_columns.is_empty() {
        return Err(NeuraFlowError::DataError("no feature columns selected".to_string()));
    }
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let mut features = Vec::new();
    let mut targets = Vec::new();
    let mut rows = 0;
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let line = record.position().map_or(0, |p| p.line());
        let cell = |column: usize| -> Result<f64, NeuraFlowError> {
            let raw = record.get(column).ok_or_else(|| {
                NeuraFlowError::DataError(format!(
                    "{}:{}: missing column {}",
                    path.display(),
                    line,
                    column
                ))
            })?;
            raw.parse::<f64>().map_err(|e| {
                NeuraFlowError::DataError(format!(
                    "{}:{}: column {}: cannot parse {:?} ({})",
                    path.display(),
                    line,
                    column,
                    raw,
                    e
                ))
            })
        };
        for &column in feature_columns {
            features.push(cell(column)?);
        }
        targets.push(cell(target_column)?);
        rows += 1;
    }
    if rows == 0 {
        return Err(NeuraFlowError::DataError(format!("{}: no data rows", path.display())));
    }
    log::info!(
        "Loaded {} row(s) with {} feature(s) from {}",
        rows,
        feature_columns.len(),
        path.display()
    );
    Ok((
        Tensor::new(features, vec![rows, feature_columns.len()])?,
        Tensor::new(targets, vec![rows, 1])?,
    ))
}
