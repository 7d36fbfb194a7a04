use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};

/// Trait defining the common interface for all optimizers.
///
/// Optimizers own their per-parameter state and are the only component
/// allowed to write a Variable's state.
pub trait Optimizer {
    /// Synchronization point after the backward pass: asserts that every
    /// tracked parameter holds a gradient matching its shape.
    fn update_gradients(&mut self, graph: &Graph) -> Result<(), NeuraFlowError>;

    /// Applies one update to every tracked parameter using its current gradient.
    fn apply_gradients(&mut self, graph: &mut Graph) -> Result<(), NeuraFlowError>;

    /// Resets the gradients of all tracked parameters to zero.
    fn zero_grad(&mut self, graph: &mut Graph) -> Result<(), NeuraFlowError>;

    /// The parameters this optimizer updates, in order.
    fn parameters(&self) -> &[NodeId];
}
