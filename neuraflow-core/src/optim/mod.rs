// neuraflow-core/src/optim/mod.rs

//! Optimizers for training networks assembled on a [`Graph`](crate::graph::Graph).
//!
//! This module provides the `Optimizer` trait and the heavy-ball
//! `SgdMomentum` implementation.

pub mod optimizer_trait;
pub mod sgd;

pub use optimizer_trait::Optimizer;
pub use sgd::{SgdMomentum, DEFAULT_MOMENTUM};
