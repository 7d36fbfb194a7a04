//! Dense numeric storage used for node states and gradients.
//!
//! A [`Tensor`] is a contiguous, row-major `Vec<f64>` paired with its shape.
//! Ranks 0 (scalar), 1 and 2 are what the engine's operators produce; the
//! kernels in [`crate::ops`] validate shapes and report [`NeuraFlowError`]s
//! instead of panicking.

use crate::error::NeuraFlowError;
use std::fmt;

pub mod broadcast_utils;
pub mod create;

pub use create::{full, randn, zeros, zeros_like};

/// An n-dimensional array of `f64` values.
#[derive(Clone, PartialEq)]
pub struct Tensor {
    data: Vec<f64>,
    shape: Vec<usize>,
}

impl Tensor {
    /// Creates a tensor from raw row-major data.
    ///
    /// # Errors
    /// Returns `TensorCreationError` if `data.len()` does not match the product of `shape`.
    pub fn new(data: Vec<f64>, shape: Vec<usize>) -> Result<Self, NeuraFlowError> {
        let numel: usize = shape.iter().product();
        if data.len() != numel {
            return Err(NeuraFlowError::TensorCreationError {
                data_len: data.len(),
                shape,
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Creates a rank-0 tensor holding `value`.
    pub fn scalar(value: f64) -> Self {
        Tensor {
            data: vec![value],
            shape: vec![],
        }
    }

    /// Builds a 2-D tensor from equally sized rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, NeuraFlowError> {
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            if row.len() != cols {
                return Err(NeuraFlowError::ShapeMismatch {
                    expected: vec![cols],
                    actual: vec![row.len()],
                    operation: "Tensor::from_rows".to_string(),
                });
            }
            data.extend_from_slice(row);
        }
        Tensor::new(data, vec![rows.len(), cols])
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn numel(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<f64> {
        self.data
    }

    /// Extracts the single value of a one-element tensor.
    pub fn item(&self) -> Result<f64, NeuraFlowError> {
        if self.data.len() != 1 {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![],
                actual: self.shape.clone(),
                operation: "item".to_string(),
            });
        }
        Ok(self.data[0])
    }

    /// Number of rows of a 2-D tensor (the batch dimension).
    pub fn rows(&self) -> Result<usize, NeuraFlowError> {
        self.expect_rank(2, "rows")?;
        Ok(self.shape[0])
    }

    /// Copies rows `[start, end)` of a 2-D tensor.
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<Tensor, NeuraFlowError> {
        self.expect_rank(2, "slice_rows")?;
        let (rows, cols) = (self.shape[0], self.shape[1]);
        if start > end || end > rows {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![rows, cols],
                actual: vec![end, cols],
                operation: format!("slice_rows({}..{})", start, end),
            });
        }
        Tensor::new(self.data[start * cols..end * cols].to_vec(), vec![end - start, cols])
    }

    /// Applies `f` to every element, producing a new tensor of the same shape.
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Tensor {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
        }
    }

    pub(crate) fn expect_rank(&self, rank: usize, operation: &str) -> Result<(), NeuraFlowError> {
        if self.rank() != rank {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![0; rank],
                actual: self.shape.clone(),
                operation: format!("{} (requires rank {})", operation, rank),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW: usize = 8;
        write!(f, "Tensor(shape={:?}, data=", self.shape)?;
        if self.data.len() <= PREVIEW {
            write!(f, "{:?})", self.data)
        } else {
            write!(f, "{:?}.. +{} more)", &self.data[..PREVIEW], self.data.len() - PREVIEW)
        }
    }
}
