// neuraflow-data/src/datasets/traits.rs

use neuraflow_core::NeuraFlowError;

/// Trait representing a dataset.
///
/// A dataset provides access to individual samples (e.g. a row of features
/// and its target) via an index.
pub trait Dataset {
    /// The type of a single item returned by the dataset.
    type Item;

    /// Returns the sample at the given index.
    ///
    /// # Errors
    /// Returns `DataError` if `index` is out of bounds.
    fn get(&self, index: usize) -> Result<Self::Item, NeuraFlowError>;

    /// Returns the total number of samples in the dataset.
    fn len(&self) -> usize;

    /// Returns true if the dataset contains no samples.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
