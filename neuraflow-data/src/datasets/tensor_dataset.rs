use super::traits::Dataset;
use neuraflow_core::{NeuraFlowError, Tensor};

/// A dataset over a 2-D feature tensor and a row-aligned 2-D target tensor.
///
/// `get(i)` returns row `i` of each as a `[1, cols]` tensor.
#[derive(Debug, Clone)]
pub struct TensorDataset {
    features: Tensor,
    targets: Tensor,
    length: usize,
}

impl TensorDataset {
    /// # Errors
    /// * `ShapeMismatch` if either tensor is not 2-D or their row counts differ.
    pub fn new(features: Tensor, targets: Tensor) -> Result<Self, NeuraFlowError> {
        let length = features.rows()?;
        let target_rows = targets.rows()?;
        if target_rows != length {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![length],
                actual: vec![target_rows],
                operation: "TensorDataset::new (row count)".to_string(),
            });
        }
        Ok(TensorDataset {
            features,
            targets,
            length,
        })
    }

    pub fn features(&self) -> &Tensor {
        &self.features
    }

    pub fn targets(&self) -> &Tensor {
        &self.targets
    }

    pub fn into_tensors(self) -> (Tensor, Tensor) {
        (self.features, self.targets)
    }
}

impl Dataset for TensorDataset {
    type Item = (Tensor, Tensor);

    fn get(&self, index: usize) -> Result<Self::Item, NeuraFlowError> {
        if index >= self.length {
            return Err(NeuraFlowError::DataError(format!(
                "index {} out of bounds for dataset of length {}",
                index, self.length
            )));
        }
        Ok((
            self.features.slice_rows(index, index + 1)?,
            self.targets.slice_rows(index, index + 1)?,
        ))
    }

    fn len(&self) -> usize {
        self.length
    }
}

#[cfg(test)]
#[path = "tensor_dataset_test.rs"]
mod tests;
