use super::OperatorRule;
use crate::error::NeuraFlowError;
use crate::ops::arithmetic::sub_op;
use crate::ops::reduction::mean_op;
use crate::tensor::Tensor;

/// Mean squared error between a target and a prediction.
///
/// Inputs are `[target, prediction]`. The forward result is a scalar: the
/// mean of the squared element-wise differences over all elements. The
/// target is data, so no gradient flows back to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MseRule;

impl MseRule {
    fn check_shapes(target: &Tensor, prediction: &Tensor) -> Result<(), NeuraFlowError> {
        if target.shape() != prediction.shape() {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: target.shape().to_vec(),
                actual: prediction.shape().to_vec(),
                operation: "MSE".to_string(),
            });
        }
        Ok(())
    }
}

impl OperatorRule for MseRule {
    const ARITY: usize = 2;

    fn forward(&self, inputs: &[&Tensor]) -> Result<Tensor, NeuraFlowError> {
        let (target, prediction) = (inputs[0], inputs[1]);
        Self::check_shapes(target, prediction)?;
        let diff = sub_op(prediction, target)?;
        mean_op(&diff.map(|d| d * d))
    }

    /// dL/dprediction = upstream · 2 · (prediction − target) / numel.
    ///
    /// For a single-output model `numel` is the batch size.
    fn backward(
        &self,
        inputs: &[&Tensor],
        upstream: &Tensor,
    ) -> Result<Vec<Option<Tensor>>, NeuraFlowError> {
        let (target, prediction) = (inputs[0], inputs[1]);
        Self::check_shapes(target, prediction)?;
        let seed = upstream.item()?;
        let factor = 2.0 * seed / prediction.numel() as f64;
        let grad_prediction = sub_op(prediction, target)?.map(|d| d * factor);
        Ok(vec![None, Some(grad_prediction)])
    }
}

#[cfg(test)]
#[path = "mse_test.rs"]
mod tests;
