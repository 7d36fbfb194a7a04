use super::OperatorRule;
use crate::error::NeuraFlowError;
use crate::ops::arithmetic::mul_op;
use crate::tensor::Tensor;

/// Rectified linear unit, `max(0, x)` element-wise.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReluRule;

impl OperatorRule for ReluRule {
    const ARITY: usize = 1;

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NeuraFlowError> {
        Ok(inputs[0].map(|x| if x > 0.0 { x } else { 0.0 }))
    }

    // grad = upstream * (input > 0)
    fn backward(
        &self,
        inputs: &[&Tensor],
        upstream: &Tensor,
    ) -> Result<Vec<Option<Tensor>>, NeuraFlowError> {
        let mask = inputs[0].map(|x| if x > 0.0 { 1.0 } else { 0.0 });
        Ok(vec![Some(mul_op(upstream, &mask)?)])
    }
}
