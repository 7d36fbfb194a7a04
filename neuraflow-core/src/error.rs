use crate::graph::NodeId;
use thiserror::Error;

/// Custom error type for the NeuraFlow engine.
///
/// Graph-construction errors (`CycleDetected`, `ArityMismatch`, `UnknownNode`,
/// `AlreadyWired`, `UnscheduledInput`) abort graph assembly. Numeric errors
/// (`ShapeMismatch`, `BroadcastError`, ...) abort the current pass and are
/// surfaced to the caller of the executor entry points.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum NeuraFlowError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Cannot broadcast shapes: {shape1:?} and {shape2:?}")]
    BroadcastError {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Shape mismatch during gradient accumulation: expected {expected:?}, got {actual:?}")]
    GradientAccumulationShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Cycle detected in the computation graph at node {node}.")]
    CycleDetected { node: NodeId },

    #[error("Node {node} ({op}) expects {expected} input(s), got {actual}")]
    ArityMismatch {
        node: NodeId,
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("Node {0} is already wired; inputs are immutable once set")]
    AlreadyWired(NodeId),

    #[error("Node {node} reads from {input}, which is neither scheduled nor a leaf")]
    UnscheduledInput { node: NodeId, input: NodeId },

    #[error("Node {0} is not a placeholder; only placeholders accept external values")]
    NotAPlaceholder(NodeId),

    #[error("Node {node} has no state; was the forward pass run (or the placeholder fed)?")]
    MissingState { node: NodeId },

    #[error("Node {node} has no gradient buffer; was the backward pass run?")]
    MissingGradient { node: NodeId },

    #[error("Node {0} is not a learnable parameter (Variable)")]
    NotAParameter(NodeId),

    #[error("Invalid hyperparameter {name}: {value}")]
    InvalidHyperparameter { name: &'static str, value: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Data error: {0}")]
    DataError(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for NeuraFlowError {
    fn from(err: std::io::Error) -> Self {
        NeuraFlowError::Io(err.to_string())
    }
}
