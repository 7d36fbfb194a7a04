// neuraflow-data/src/samplers/traits.rs

use std::fmt::Debug;

/// Defines the order in which a `DataLoader` visits the samples of a dataset.
pub trait Sampler: Debug + Send + Sync {
    /// Returns an iterator over dataset indices for one epoch.
    fn iter(&self, dataset_len: usize) -> Box<dyn Iterator<Item = usize> + Send + Sync>;

    /// Number of indices one epoch yields.
    fn len(&self, dataset_len: usize) -> usize;
}
