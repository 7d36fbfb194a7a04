//! The computation graph: an arena of [`Node`]s addressed by [`NodeId`].
//!
//! Nodes are constructed once when a model is assembled. Each node records
//! its ordered `inputs` and, when wired, registers itself as a consumer of
//! every input, so the graph holds both directions of the relation. Links are
//! immutable once set; only `state` and `gradient` change afterwards.

use crate::error::NeuraFlowError;
use crate::nodes::Op;
use crate::tensor::{zeros_like, Tensor};
use std::fmt;

mod node;

pub use node::Node;

/// Stable identity of a node inside its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Owner of every node of a model. Its lifetime is the model's lifetime.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: Vec<Node>,
}

impl Graph {
    pub fn new() -> Self {
        Graph { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `#id` followed by the node's label when it has one, for log messages.
    pub fn describe(&self, id: NodeId) -> String {
        match self.nodes.get(id.0).and_then(|node| node.name()) {
            Some(name) => format!("{} ({})", id, name),
            None => id.to_string(),
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, NeuraFlowError> {
        self.nodes.get(id.0).ok_or(NeuraFlowError::UnknownNode(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, NeuraFlowError> {
        self.nodes.get_mut(id.0).ok_or(NeuraFlowError::UnknownNode(id))
    }

    pub fn op(&self, id: NodeId) -> Result<Op, NeuraFlowError> {
        Ok(self.node(id)?.op())
    }

    pub fn inputs(&self, id: NodeId) -> Result<&[NodeId], NeuraFlowError> {
        Ok(self.node(id)?.inputs())
    }

    pub fn consumers(&self, id: NodeId) -> Result<&[NodeId], NeuraFlowError> {
        Ok(self.node(id)?.consumers())
    }

    // --- Construction ---

    /// Allocates a node without wiring its inputs.
    ///
    /// Leaves (Placeholder, Variable) are complete as soon as they are
    /// declared. Operator nodes must be completed with [`Graph::wire`]; this
    /// two-phase form allows forward references.
    pub fn declare(&mut self, op: Op) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(op));
        id
    }

    /// Sets the inputs of a declared node and registers it as their consumer.
    ///
    /// # Errors
    /// * `UnknownNode` if `id` or one of `inputs` does not exist.
    /// * `AlreadyWired` if the node's inputs were already set (leaves are born wired).
    /// * `ArityMismatch` if `inputs.len()` differs from the operator's arity.
    pub fn wire(&mut self, id: NodeId, inputs: &[NodeId]) -> Result<(), NeuraFlowError> {
        let node = self.node(id)?;
        if node.is_wired() {
            return Err(NeuraFlowError::AlreadyWired(id));
        }
        let op = node.op();
        if inputs.len() != op.arity() {
            return Err(NeuraFlowError::ArityMismatch {
                node: id,
                op: op.name(),
                expected: op.arity(),
                actual: inputs.len(),
            });
        }
        for &input in inputs {
            self.node(input)?;
        }

        for &input in inputs {
            self.nodes[input.0].push_consumer(id);
        }
        self.nodes[id.0].set_inputs(inputs.to_vec());
        log::debug!("Wired {} ({}) <- {:?}", id, op.name(), inputs);
        Ok(())
    }

    /// Declares and wires a node in one step.
    ///
    /// Validation happens before anything is allocated, so a failed call
    /// leaves the graph untouched.
    pub fn add_node(&mut self, op: Op, inputs: &[NodeId]) -> Result<NodeId, NeuraFlowError> {
        let next = NodeId(self.nodes.len());
        if inputs.len() != op.arity() {
            return Err(NeuraFlowError::ArityMismatch {
                node: next,
                op: op.name(),
                expected: op.arity(),
                actual: inputs.len(),
            });
        }
        for &input in inputs {
            self.node(input)?;
        }
        let id = self.declare(op);
        if !op.is_leaf() {
            self.wire(id, inputs)?;
        }
        Ok(id)
    }

    /// A leaf whose state is injected before each forward pass.
    pub fn placeholder(&mut self) -> NodeId {
        self.declare(Op::Placeholder)
    }

    /// A learnable leaf initialised with `value`; its gradient buffer starts at zero.
    pub fn variable(&mut self, value: Tensor) -> NodeId {
        let id = self.declare(Op::Variable);
        let node = &mut self.nodes[id.0];
        node.gradient = Some(zeros_like(&value));
        node.state = Some(value);
        id
    }

    /// `x · w`.
    pub fn linear(&mut self, x: NodeId, w: NodeId) -> Result<NodeId, NeuraFlowError> {
        self.add_node(Op::Linear, &[x, w])
    }

    /// `x + b`, with `b` broadcast over the batch dimension.
    pub fn add(&mut self, x: NodeId, b: NodeId) -> Result<NodeId, NeuraFlowError> {
        self.add_node(Op::Add, &[x, b])
    }

    pub fn relu(&mut self, x: NodeId) -> Result<NodeId, NeuraFlowError> {
        self.add_node(Op::Relu, &[x])
    }

    /// Mean squared error between `target` (data) and `prediction`.
    pub fn mse(&mut self, target: NodeId, prediction: NodeId) -> Result<NodeId, NeuraFlowError> {
        self.add_node(Op::Mse, &[target, prediction])
    }

    /// Attaches a human-readable label used in logs.
    pub fn set_name(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), NeuraFlowError> {
        self.node_mut(id)?.name = Some(name.into());
        Ok(())
    }

    // --- State access ---

    /// Injects the value of a placeholder.
    pub fn set_value(&mut self, id: NodeId, value: Tensor) -> Result<(), NeuraFlowError> {
        let node = self.node_mut(id)?;
        if node.op() != Op::Placeholder {
            return Err(NeuraFlowError::NotAPlaceholder(id));
        }
        node.state = Some(value);
        Ok(())
    }

    /// The cached forward output of a node.
    pub fn state(&self, id: NodeId) -> Result<&Tensor, NeuraFlowError> {
        self.node(id)?
            .state()
            .ok_or(NeuraFlowError::MissingState { node: id })
    }

    /// The accumulated gradient of the loss with respect to a node.
    pub fn gradient(&self, id: NodeId) -> Result<&Tensor, NeuraFlowError> {
        self.node(id)?
            .gradient()
            .ok_or(NeuraFlowError::MissingGradient { node: id })
    }

    pub(crate) fn state_mut(&mut self, id: NodeId) -> Result<&mut Tensor, NeuraFlowError> {
        self.node_mut(id)?
            .state
            .as_mut()
            .ok_or(NeuraFlowError::MissingState { node: id })
    }

    pub(crate) fn set_state(&mut self, id: NodeId, value: Tensor) -> Result<(), NeuraFlowError> {
        self.node_mut(id)?.state = Some(value);
        Ok(())
    }

    pub(crate) fn set_gradient(&mut self, id: NodeId, value: Tensor) -> Result<(), NeuraFlowError> {
        self.node_mut(id)?.gradient = Some(value);
        Ok(())
    }

    /// States of a node's inputs, in declaration order.
    pub(crate) fn input_states(&self, id: NodeId) -> Result<Vec<&Tensor>, NeuraFlowError> {
        self.node(id)?
            .inputs()
            .iter()
            .map(|&input| self.state(input))
            .collect()
    }

    /// Adds `contribution` into a node's gradient accumulator.
    pub(crate) fn accumulate_gradient(
        &mut self,
        id: NodeId,
        contribution: &Tensor,
    ) -> Result<(), NeuraFlowError> {
        let node = self.node_mut(id)?;
        match node.gradient.as_mut() {
            Some(acc) => {
                if acc.shape() != contribution.shape() {
                    return Err(NeuraFlowError::GradientAccumulationShapeMismatch {
                        expected: acc.shape().to_vec(),
                        actual: contribution.shape().to_vec(),
                    });
                }
                acc.add_(contribution)
            }
            None => {
                node.gradient = Some(contribution.clone());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
