// Linear algebra kernels: 2-D matrix multiplication and transpose.

use crate::error::NeuraFlowError;
use crate::tensor::Tensor;

/// Matrix product of two 2-D tensors: `[m, k] x [k, n] -> [m, n]`.
pub fn matmul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, NeuraFlowError> {
    a.expect_rank(2, "matmul (lhs)")?;
    b.expect_rank(2, "matmul (rhs)")?;
    let (m, k) = (a.shape()[0], a.shape()[1]);
    let (k2, n) = (b.shape()[0], b.shape()[1]);
    if k != k2 {
        return Err(NeuraFlowError::ShapeMismatch {
            expected: vec![k, n],
            actual: b.shape().to_vec(),
            operation: format!("matmul {:?} x {:?}", a.shape(), b.shape()),
        });
    }

    let (a_data, b_data) = (a.data(), b.data());
    let mut out = vec![0.0; m * n];
    for i in 0..m {
        let row = &a_data[i * k..(i + 1) * k];
        let out_row = &mut out[i * n..(i + 1) * n];
        for (p, &a_ip) in row.iter().enumerate() {
            let b_row = &b_data[p * n..(p + 1) * n];
            for (o, &b_pj) in out_row.iter_mut().zip(b_row) {
                *o += a_ip * b_pj;
            }
        }
    }
    Tensor::new(out, vec![m, n])
}

/// Transpose of a 2-D tensor.
pub fn transpose_op(a: &Tensor) -> Result<Tensor, NeuraFlowError> {
    a.expect_rank(2, "transpose")?;
    let (rows, cols) = (a.shape()[0], a.shape()[1]);
    let data = a.data();
    let mut out = Vec::with_capacity(rows * cols);
    for j in 0..cols {
        for i in 0..rows {
            out.push(data[i * cols + j]);
        }
    }
    Tensor::new(out, vec![cols, rows])
}
