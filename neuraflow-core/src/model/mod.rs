//! Ready-made models assembled on a [`Graph`](crate::graph::Graph).

pub mod feedforward;
pub mod reporter;

pub use feedforward::{Batch, FeedforwardModel};
pub use reporter::{LogReporter, NullReporter, Reporter, TrainingHistory};
