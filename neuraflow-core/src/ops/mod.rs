//! Numeric kernels over [`Tensor`](crate::tensor::Tensor).
//!
//! These are plain functions without any graph bookkeeping; the operator
//! nodes in [`crate::nodes`] compose them into forward and backward rules.

pub mod arithmetic;
pub mod linalg;
pub mod reduction;

pub use arithmetic::{mul_op, sub_op};
pub use linalg::{matmul_op, transpose_op};
pub use reduction::mean_op;
