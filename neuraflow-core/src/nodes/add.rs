use super::OperatorRule;
use crate::error::NeuraFlowError;
use crate::tensor::Tensor;

/// Feature plus bias: `Y = X + B`, with `B` broadcast over the batch dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddRule;

impl OperatorRule for AddRule {
    const ARITY: usize = 2;

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NeuraFlowError> {
        inputs[0].add_broadcast(inputs[1])
    }

    /// The feature receives the upstream gradient unchanged; the bias receives
    /// it summed over the broadcast dimension.
    fn backward(
        &self,
        inputs: &[&Tensor],
        upstream: &Tensor,
    ) -> Result<Vec<Option<Tensor>>, NeuraFlowError> {
        let grad_bias = upstream.reduce_to_shape(inputs[1].shape())?;
        Ok(vec![Some(upstream.clone()), Some(grad_bias)])
    }
}
