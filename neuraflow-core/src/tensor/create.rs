//! Tensor creation helpers.

use super::Tensor;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub fn zeros(shape: &[usize]) -> Tensor {
    full(shape, 0.0)
}

pub fn zeros_like(tensor: &Tensor) -> Tensor {
    zeros(tensor.shape())
}

pub fn full(shape: &[usize], value: f64) -> Tensor {
    let numel = shape.iter().product();
    Tensor {
        data: vec![value; numel],
        shape: shape.to_vec(),
    }
}

/// Samples from the standard normal distribution.
///
/// The generator is supplied by the caller so weight initialisation is
/// reproducible with a seeded `StdRng`.
pub fn randn<R: Rng + ?Sized>(shape: &[usize], rng: &mut R) -> Tensor {
    let numel = shape.iter().product();
    let data: Vec<f64> = (0..numel).map(|_| StandardNormal.sample(rng)).collect();
    Tensor {
        data,
        shape: shape.to_vec(),
    }
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
