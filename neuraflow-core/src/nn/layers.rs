use crate::error::NeuraFlowError;
use crate::graph::{Graph, NodeId};
use crate::tensor::{randn, zeros, Tensor};
use rand::Rng;

/// A fully connected layer assembled on a [`Graph`]: `Add(Linear(input, W), B)`.
///
/// `W` is `[in_features, out_features]`, `B` is `[1, out_features]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dense {
    pub weight: NodeId,
    pub bias: NodeId,
    pub linear: NodeId,
    pub output: NodeId,
}

impl Dense {
    /// Adds the layer with standard-normal weights and a zero bias.
    pub fn new<R: Rng + ?Sized>(
        graph: &mut Graph,
        input: NodeId,
        in_features: usize,
        out_features: usize,
        rng: &mut R,
    ) -> Result<Self, NeuraFlowError> {
        let weight = randn(&[in_features, out_features], rng);
        let bias = zeros(&[1, out_features]);
        Self::with_values(graph, input, weight, bias)
    }

    /// Adds the layer with explicit initial values.
    pub fn with_values(
        graph: &mut Graph,
        input: NodeId,
        weight: Tensor,
        bias: Tensor,
    ) -> Result<Self, NeuraFlowError> {
        if weight.rank() != 2 || bias.shape() != [1, weight.shape()[1]] {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![1, weight.shape().get(1).copied().unwrap_or(0)],
                actual: bias.shape().to_vec(),
                operation: "Dense layer bias".to_string(),
            });
        }
        let weight = graph.variable(weight);
        let bias = graph.variable(bias);
        let linear = graph.linear(input, weight)?;
        let output = graph.add(linear, bias)?;
        Ok(Dense {
            weight,
            bias,
            linear,
            output,
        })
    }
}
