//! Operator node kinds and their forward/backward rules.
//!
//! The set of kinds is closed: [`Op`] tags every node in a
//! [`Graph`](crate::graph::Graph), and dispatches to the [`OperatorRule`]
//! implementation of each differentiable operator.

use crate::error::NeuraFlowError;
use crate::tensor::Tensor;
use std::fmt;

pub mod add;
pub mod linear;
pub mod mse;
pub mod relu;

pub use add::AddRule;
pub use linear::LinearRule;
pub use mse::MseRule;
pub use relu::ReluRule;

/// Forward and backward rules of a differentiable operator.
///
/// Rules are pure: they read the states of the node's inputs (and the
/// gradient flowing into the node) and return new tensors. Writing results
/// back into the graph is the executors' job.
pub trait OperatorRule {
    /// Number of inputs the operator reads.
    const ARITY: usize;

    /// Computes the node's state from its inputs' states.
    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NeuraFlowError>;

    /// Computes the gradient contribution for each input.
    ///
    /// `upstream` is dLoss/dOutput. The returned `Vec` has exactly one entry
    /// per input, in declaration order; `None` means no gradient flows to
    /// that input.
    fn backward(
        &self,
        inputs: &[&Tensor],
        upstream: &Tensor,
    ) -> Result<Vec<Option<Tensor>>, NeuraFlowError>;
}

/// The kind of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Leaf whose state is injected externally (data). Not trainable.
    Placeholder,
    /// Leaf holding a learnable array. The only kind that is a parameter.
    Variable,
    /// Matrix product `X · W`.
    Linear,
    /// Feature plus bias, broadcast over the batch dimension.
    Add,
    /// Element-wise `max(0, x)`.
    Relu,
    /// Mean squared error between target and prediction (scalar).
    Mse,
}

impl Op {
    pub fn arity(self) -> usize {
        match self {
            Op::Placeholder | Op::Variable => 0,
            Op::Relu => ReluRule::ARITY,
            Op::Linear => LinearRule::ARITY,
            Op::Add => AddRule::ARITY,
            Op::Mse => MseRule::ARITY,
        }
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, Op::Placeholder | Op::Variable)
    }

    pub fn is_parameter(self) -> bool {
        self == Op::Variable
    }

    /// Loss nodes seed the backward pass with a gradient of one.
    pub fn is_loss(self) -> bool {
        self == Op::Mse
    }

    pub fn name(self) -> &'static str {
        match self {
            Op::Placeholder => "Placeholder",
            Op::Variable => "Variable",
            Op::Linear => "Linear",
            Op::Add => "Add",
            Op::Relu => "ReLU",
            Op::Mse => "MSE",
        }
    }

    /// Runs the forward rule. Leaves have none and report an internal error.
    pub fn forward(self, inputs: &[&Tensor]) -> Result<Tensor, NeuraFlowError> {
        check_arity(self, inputs.len())?;
        match self {
            Op::Linear => LinearRule.forward(inputs),
            Op::Add => AddRule.forward(inputs),
            Op::Relu => ReluRule.forward(inputs),
            Op::Mse => MseRule.forward(inputs),
            Op::Placeholder | Op::Variable => Err(NeuraFlowError::InternalError(format!(
                "{} has no forward rule",
                self.name()
            ))),
        }
    }

    /// Runs the backward rule. Leaves propagate nothing.
    pub fn backward(
        self,
        inputs: &[&Tensor],
        upstream: &Tensor,
    ) -> Result<Vec<Option<Tensor>>, NeuraFlowError> {
        check_arity(self, inputs.len())?;
        match self {
            Op::Linear => LinearRule.backward(inputs, upstream),
            Op::Add => AddRule.backward(inputs, upstream),
            Op::Relu => ReluRule.backward(inputs, upstream),
            Op::Mse => MseRule.backward(inputs, upstream),
            Op::Placeholder | Op::Variable => Ok(Vec::new()),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn check_arity(op: Op, actual: usize) -> Result<(), NeuraFlowError> {
    if actual != op.arity() {
        return Err(NeuraFlowError::InternalError(format!(
            "{} rule called with {} input(s), expected {}",
            op.name(),
            actual,
            op.arity()
        )));
    }
    Ok(())
}
