use crate::error::NeuraFlowError;
use crate::tensor::Tensor;

/// Mean of all elements as a scalar tensor.
///
/// # Errors
/// Returns `DataError` for an empty tensor, whose mean is undefined.
pub fn mean_op(a: &Tensor) -> Result<Tensor, NeuraFlowError> {
    if a.numel() == 0 {
        return Err(NeuraFlowError::DataError(
            "mean of an empty tensor".to_string(),
        ));
    }
    Ok(Tensor::scalar(a.data().iter().sum::<f64>() / a.numel() as f64))
}
