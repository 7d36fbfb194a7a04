//! Data collaborators for neuraflow models: datasets, samplers, batching,
//! feature scaling and CSV loading.

pub mod batching;
pub mod csv_loader;
pub mod dataloader;
pub mod datasets;
pub mod samplers;
pub mod scaler;

pub use batching::{get_batches, train_validation_split};
pub use csv_loader::load_csv;
pub use dataloader::DataLoader;
pub use datasets::{Dataset, TensorDataset};
pub use samplers::{RandomSampler, Sampler, SequentialSampler};
pub use scaler::{scale, StandardScaler};
