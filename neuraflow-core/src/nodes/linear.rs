use super::OperatorRule;
use crate::error::NeuraFlowError;
use crate::ops::linalg::{matmul_op, transpose_op};
use crate::tensor::Tensor;

/// Affine transform without bias: `Y = X · W`.
///
/// Inputs are `[X, W]` with `X: [batch, in]` and `W: [in, out]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearRule;

impl OperatorRule for LinearRule {
    const ARITY: usize = 2;

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NeuraFlowError> {
        matmul_op(inputs[0], inputs[1])
    }

    /// `dX = G · Wᵀ`, `dW = Xᵀ · G`.
    fn backward(
        &self,
        inputs: &[&Tensor],
        upstream: &Tensor,
    ) -> Result<Vec<Option<Tensor>>, NeuraFlowError> {
        let (x, w) = (inputs[0], inputs[1]);
        let grad_x = matmul_op(upstream, &transpose_op(w)?)?;
        let grad_w = matmul_op(&transpose_op(x)?, upstream)?;
        Ok(vec![Some(grad_x), Some(grad_w)])
    }
}
