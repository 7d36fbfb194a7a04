// neuraflow-data/src/samplers/random_sampler.rs

use super::traits::Sampler;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// A sampler that visits indices in a seeded random order.
///
/// Each call to `iter` continues the same random stream, so successive
/// epochs are shuffled differently while a given seed always reproduces the
/// same sequence of epochs.
#[derive(Debug)]
pub struct RandomSampler {
    replacement: bool,
    num_samples: Option<usize>,
    rng: Mutex<StdRng>,
}

impl RandomSampler {
    /// Creates a new `RandomSampler`.
    ///
    /// # Arguments
    ///
    /// * `replacement`: If `true`, an index can be selected multiple times.
    /// * `num_samples`: The number of samples to draw per epoch. Defaults to the dataset size.
    /// * `seed`: Seed of the shuffling stream.
    pub fn new(replacement: bool, num_samples: Option<usize>, seed: u64) -> Self {
        RandomSampler {
            replacement,
            num_samples,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Sampler for RandomSampler {
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync> {
        if dataset_len == 0 {
            return Box::new(std::iter::empty());
        }
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let actual_num_samples = self.num_samples.unwrap_or(dataset_len);

        if self.replacement {
            let indices: Vec<usize> = (0..actual_num_samples)
                .map(|_| rng.gen_range(0..dataset_len))
                .collect();
            return Box::new(indices.into_iter());
        }
        if actual_num_samples > dataset_len {
            log::warn!(
                "RandomSampler: num_samples ({}) > dataset_len ({}) without replacement; yielding no indices",
                actual_num_samples,
                dataset_len
            );
            return Box::new(std::iter::empty());
        }
        let mut indices: Vec<usize> = (0..dataset_len).collect();
        indices.shuffle(&mut *rng);
        indices.truncate(actual_num_samples);
        Box::new(indices.into_iter())
    }

    fn len(&self, dataset_len: usize) -> usize {
        self.num_samples.unwrap_or(dataset_len)
    }
}

#[cfg(test)]
#[path = "random_sampler_test.rs"]
mod tests;
