use super::NodeId;
use crate::nodes::Op;
use crate::tensor::Tensor;

/// A unit of computation: an operator, its links, and its cached value and gradient.
#[derive(Debug, Clone)]
pub struct Node {
    op: Op,
    inputs: Vec<NodeId>,
    consumers: Vec<NodeId>,
    wired: bool,
    pub(crate) name: Option<String>,
    pub(crate) state: Option<Tensor>,
    pub(crate) gradient: Option<Tensor>,
}

impl Node {
    pub(crate) fn new(op: Op) -> Self {
        Node {
            op,
            inputs: Vec::new(),
            consumers: Vec::new(),
            wired: op.is_leaf(),
            name: None,
            state: None,
            gradient: None,
        }
    }

    pub fn op(&self) -> Op {
        self.op
    }

    /// Nodes this node reads from, in order.
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Nodes reading from this node, in registration order.
    pub fn consumers(&self) -> &[NodeId] {
        &self.consumers
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn state(&self) -> Option<&Tensor> {
        self.state.as_ref()
    }

    pub fn gradient(&self) -> Option<&Tensor> {
        self.gradient.as_ref()
    }

    pub(super) fn set_inputs(&mut self, inputs: Vec<NodeId>) {
        self.inputs = inputs;
        self.wired = true;
    }

    pub(super) fn push_consumer(&mut self, consumer: NodeId) {
        // A node feeding the same consumer twice (e.g. x * x) is recorded once.
        if !self.consumers.contains(&consumer) {
            self.consumers.push(consumer);
        }
    }
}
