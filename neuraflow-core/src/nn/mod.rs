// src/nn/mod.rs
// Building blocks for assembling networks on a Graph.

pub mod layers;
pub mod parameter;

pub use layers::Dense;
pub use parameter::parameters;
