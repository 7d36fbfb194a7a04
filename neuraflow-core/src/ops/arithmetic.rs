use crate::error::NeuraFlowError;
use crate::tensor::Tensor;

fn check_same_shape(a: &Tensor, b: &Tensor, operation: &str) -> Result<(), NeuraFlowError> {
    if a.shape() != b.shape() {
        return Err(NeuraFlowError::ShapeMismatch {
            expected: a.shape().to_vec(),
            actual: b.shape().to_vec(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

fn zip_with<F: Fn(f64, f64) -> f64>(
    a: &Tensor,
    b: &Tensor,
    operation: &str,
    f: F,
) -> Result<Tensor, NeuraFlowError> {
    check_same_shape(a, b, operation)?;
    let data = a.data().iter().zip(b.data()).map(|(&x, &y)| f(x, y)).collect();
    Tensor::new(data, a.shape().to_vec())
}

/// Element-wise `a - b`.
pub fn sub_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraFlowError> {
    zip_with(a, b, "sub", |x, y| x - y)
}

/// Element-wise (Hadamard) product.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraFlowError> {
    zip_with(a, b, "mul", |x, y| x * y)
}

// --- In-place variants ---

impl Tensor {
    /// `self += other`, in place.
    pub fn add_(&mut self, other: &Tensor) -> Result<(), NeuraFlowError> {
        check_same_shape(self, other, "add_")?;
        for (x, y) in self.data_mut().iter_mut().zip(other.data()) {
            *x += y;
        }
        Ok(())
    }

    /// `self -= other`, in place.
    pub fn sub_(&mut self, other: &Tensor) -> Result<(), NeuraFlowError> {
        check_same_shape(self, other, "sub_")?;
        for (x, y) in self.data_mut().iter_mut().zip(other.data()) {
            *x -= y;
        }
        Ok(())
    }

    /// `self *= scalar`, in place.
    pub fn mul_scalar_(&mut self, scalar: f64) {
        for x in self.data_mut().iter_mut() {
            *x *= scalar;
        }
    }
}
