//! NeuraFlow: a small dataflow-graph execution engine.
//!
//! A model is a [`Graph`] of nodes (placeholders, variables and operators).
//! [`build_schedule`] orders the part of the graph reachable from a set of
//! leaves, [`forward`] and [`backward`] evaluate it, and an [`Optimizer`]
//! updates the variables from their accumulated gradients.

pub mod autograd;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod nn;
pub mod nodes;
pub mod ops;
pub mod optim;
pub mod tensor;

pub use autograd::{backward, build_schedule, check_gradients, forward, Schedule};
pub use config::TrainingConfig;
pub use error::NeuraFlowError;
pub use graph::{Graph, Node, NodeId};
pub use model::FeedforwardModel;
pub use nn::parameters;
pub use nodes::Op;
pub use optim::{Optimizer, SgdMomentum};
pub use tensor::Tensor;
