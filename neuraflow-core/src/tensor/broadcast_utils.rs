//! Bias-style broadcasting over the leading (batch) dimension, and its inverse.
//!
//! Only the pattern an affine layer needs is supported: a right-hand operand
//! whose shape equals the left-hand shape, equals the left-hand shape without
//! its leading dimension (`[n, k] + [k]`), or has a leading dimension of one
//! (`[n, k] + [1, k]`). Anything else is a `BroadcastError`.

use super::Tensor;
use crate::error::NeuraFlowError;

/// How `rhs` lines up against `lhs` for a broadcast add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BroadcastPlan {
    Elementwise,
    /// `rhs` repeats once per leading slice of `lhs`, each slice `width` long.
    OverLeading { width: usize },
}

fn plan(lhs: &[usize], rhs: &[usize]) -> Option<BroadcastPlan> {
    if lhs == rhs {
        return Some(BroadcastPlan::Elementwise);
    }
    let (_, trailing) = lhs.split_first()?;
    let width: usize = trailing.iter().product();
    if rhs == trailing {
        return Some(BroadcastPlan::OverLeading { width });
    }
    match rhs.split_first() {
        Some((&1, rest)) if rest == trailing => Some(BroadcastPlan::OverLeading { width }),
        _ => None,
    }
}

impl Tensor {
    /// Adds `bias` to `self`, repeating it over the leading dimension if needed.
    pub fn add_broadcast(&self, bias: &Tensor) -> Result<Tensor, NeuraFlowError> {
        let plan = plan(self.shape(), bias.shape()).ok_or_else(|| NeuraFlowError::BroadcastError {
            shape1: self.shape().to_vec(),
            shape2: bias.shape().to_vec(),
        })?;
        let data = match plan {
            BroadcastPlan::Elementwise => self
                .data()
                .iter()
                .zip(bias.data())
                .map(|(a, b)| a + b)
                .collect(),
            BroadcastPlan::OverLeading { width } => self
                .data()
                .iter()
                .enumerate()
                .map(|(i, a)| a + bias.data()[i % width])
                .collect(),
        };
        Tensor::new(data, self.shape().to_vec())
    }

    /// Reduces a gradient of the broadcast result back to `target_shape`
    /// by summing over the leading dimension.
    ///
    /// Crucial for the backward pass of [`Tensor::add_broadcast`].
    pub fn reduce_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, NeuraFlowError> {
        let plan = plan(self.shape(), target_shape).ok_or_else(|| NeuraFlowError::BroadcastError {
            shape1: self.shape().to_vec(),
            shape2: target_shape.to_vec(),
        })?;
        match plan {
            BroadcastPlan::Elementwise => Ok(self.clone()),
            BroadcastPlan::OverLeading { width } => {
                let mut reduced = vec![0.0; width];
                for chunk in self.data().chunks(width) {
                    for (acc, v) in reduced.iter_mut().zip(chunk) {
                        *acc += v;
                    }
                }
                Tensor::new(reduced, target_shape.to_vec())
            }
        }
    }
}
