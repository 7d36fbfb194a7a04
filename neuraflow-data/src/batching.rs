//! Fixed, sequential batching and the tail train/validation split.

use neuraflow_core::model::Batch;
use neuraflow_core::{NeuraFlowError, Tensor};

/// Cuts row-aligned `x` and `y` into consecutive batches of `batch_size`
/// rows. The last batch holds the remainder and may be shorter.
///
/// # Errors
/// * `DataError` if `batch_size` is zero or the tensors are empty.
/// * `ShapeMismatch` if `x` and `y` are not 2-D with the same row count.
pub fn get_batches(x: &Tensor, y: &Tensor, batch_size: usize) -> Result<Vec<Batch>, NeuraFlowError> {
    if batch_size == 0 {
        return Err(NeuraFlowError::DataError("batch_size must be at least 1".to_string()));
    }
    let rows = x.rows()?;
    if y.rows()? != rows {
        return Err(NeuraFlowError::ShapeMismatch {
            expected: vec![rows],
            actual: vec![y.rows()?],
            operation: "get_batches (row count)".to_string(),
        });
    }
    if rows == 0 {
        return Err(NeuraFlowError::DataError("no rows to batch".to_string()));
    }
    (0..rows)
        .step_by(batch_size)
        .map(|start| {
            let end = (start + batch_size).min(rows);
            Ok((x.slice_rows(start, end)?, y.slice_rows(start, end)?))
        })
        .collect()
}

/// Splits batches into `(train, valid)`, taking `int(fraction · n)` batches
/// from the tail for validation.
///
/// When that count rounds down to zero but at least two batches exist, one
/// batch is held out anyway so validation is never empty.
///
/// # Errors
/// * `DataError` if `fraction` is outside `[0, 1)` or fewer than two batches are given.
pub fn train_validation_split(
    mut batches: Vec<Batch>,
    fraction: f64,
) -> Result<(Vec<Batch>, Vec<Batch>), NeuraFlowError> {
    if !(0.0..1.0).contains(&fraction) {
        return Err(NeuraFlowError::DataError(format!(
            "validation fraction must be in [0, 1), got {}",
            fraction
        )));
    }
    let n = batches.len();
    if n < 2 {
        return Err(NeuraFlowError::DataError(format!(
            "need at least 2 batches to hold out validation data, got {}",
            n
        )));
    }
    let mut n_valid = (fraction * n as f64) as usize;
    if n_valid == 0 {
        log::warn!(
            "Validation fraction {} of {} batch(es) rounds to zero; holding out one batch",
            fraction,
            n
        );
        n_valid = 1;
    }
    let valid = batches.split_off(n - n_valid);
    log::debug!("Split {} batch(es) into {} train / {} valid", n, batches.len(), valid.len());
    Ok((batches, valid))
}
