// neuraflow-data/src/dataloader.rs
//! # DataLoader
//!
//! Groups the samples of a [`Dataset`] into `(features, targets)` batches in
//! the order chosen by a [`Sampler`].
//!
//! ```rust
//! use neuraflow_core::Tensor;
//! use neuraflow_data::{DataLoader, SequentialSampler, TensorDataset};
//!
//! let x = Tensor::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![3, 2]).unwrap();
//! let y = Tensor::new(vec![0.1, 0.2, 0.3], vec![3, 1]).unwrap();
//! let dataset = TensorDataset::new(x, y).unwrap();
//! let loader = DataLoader::new(dataset, 2, SequentialSampler::new(), false);
//! for batch in loader {
//!     let (x, y) = batch.unwrap();
//!     assert_eq!(x.rows().unwrap(), y.rows().unwrap());
//! }
//! ```

use crate::datasets::Dataset;
use crate::samplers::Sampler;
use neuraflow_core::model::Batch;
use neuraflow_core::{NeuraFlowError, Tensor};

/// Batching and sampling over a dataset of `(features, targets)` rows.
///
/// The loader is an iterator over one epoch; [`DataLoader::reset`] starts the
/// next one with fresh indices from the sampler.
pub struct DataLoader<D: Dataset<Item = Batch>, S: Sampler> {
    pub dataset: D,
    pub batch_size: usize,
    pub sampler: S,
    /// If true, the last batch is dropped when it is incomplete.
    pub drop_last: bool,
    indices_iter: Box<dyn Iterator<Item = usize> + Send + Sync>,
}

impl<D: Dataset<Item = Batch>, S: Sampler> DataLoader<D, S> {
    pub fn new(dataset: D, batch_size: usize, sampler: S, drop_last: bool) -> Self {
        let indices_iter = sampler.iter(dataset.len());
        Self {
            dataset,
            batch_size,
            sampler,
            drop_last,
            indices_iter,
        }
    }

    /// Number of batches one epoch yields.
    pub fn num_batches(&self) -> usize {
        if self.batch_size == 0 {
            return 0;
        }
        let samples = self.sampler.len(self.dataset.len());
        if self.drop_last {
            samples / self.batch_size
        } else {
            samples.div_ceil(self.batch_size)
        }
    }

    /// Starts a new epoch.
    pub fn reset(&mut self) {
        self.indices_iter = self.sampler.iter(self.dataset.len());
    }

    /// Collects the remaining batches of the current epoch and resets.
    pub fn epoch(&mut self) -> Result<Vec<Batch>, NeuraFlowError> {
        let batches = self.by_ref().collect::<Result<Vec<_>, _>>();
        self.reset();
        batches
    }
}

impl<D: Dataset<Item = Batch>, S: Sampler> Iterator for DataLoader<D, S> {
    type Item = Result<Batch, NeuraFlowError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.batch_size == 0 {
            return None;
        }
        let mut samples = Vec::with_capacity(self.batch_size);
        for _ in 0..self.batch_size {
            let Some(idx) = self.indices_iter.next() else {
                break;
            };
            match self.dataset.get(idx) {
                Ok(item) => samples.push(item),
                Err(e) => return Some(Err(e)),
            }
        }
        if samples.is_empty() || (self.drop_last && samples.len() < self.batch_size) {
            return None;
        }
        Some(collate(samples))
    }
}

/// Stacks single-row samples into one `(features, targets)` batch.
pub fn collate(samples: Vec<Batch>) -> Result<Batch, NeuraFlowError> {
    let (xs, ys): (Vec<Tensor>, Vec<Tensor>) = samples.into_iter().unzip();
    Ok((stack_rows(&xs)?, stack_rows(&ys)?))
}

fn stack_rows(parts: &[Tensor]) -> Result<Tensor, NeuraFlowError> {
    let Some(first) = parts.first() else {
        return Err(NeuraFlowError::DataError("cannot collate an empty batch".to_string()));
    };
    let cols = first.shape().get(1).copied().unwrap_or(0);
    let mut rows = 0;
    let mut data = Vec::with_capacity(parts.len() * cols);
    for part in parts {
        part.rows()?;
        if part.shape()[1] != cols {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![part.shape()[0], cols],
                actual: part.shape().to_vec(),
                operation: "DataLoader collate".to_string(),
            });
        }
        rows += part.shape()[0];
        data.extend_from_slice(part.data());
    }
    Tensor::new(data, vec![rows, cols])
}

#[cfg(test)]
#[path = "dataloader_test.rs"]
mod tests;
