//! Per-column standardisation of 2-D tensors.

use neuraflow_core::{NeuraFlowError, Tensor};

/// Zero mean and unit (population) variance per column.
///
/// Columns with zero variance are only centred.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Computes column statistics of `data`.
    ///
    /// # Errors
    /// * `ShapeMismatch` if `data` is not 2-D.
    /// * `DataError` if it has no rows.
    pub fn fit(data: &Tensor) -> Result<Self, NeuraFlowError> {
        let rows = data.rows()?;
        if rows == 0 {
            return Err(NeuraFlowError::DataError("cannot fit a scaler on zero rows".to_string()));
        }
        let cols = data.shape()[1];
        if cols == 0 {
            return Err(NeuraFlowError::DataError("cannot fit a scaler on zero columns".to_string()));
        }
        let values = data.data();
        let mut means = vec![0.0; cols];
        for row in values.chunks(cols) {
            for (mean, &v) in means.iter_mut().zip(row) {
                *mean += v;
            }
        }
        means.iter_mut().for_each(|m| *m /= rows as f64);

        let mut vars = vec![0.0; cols];
        for row in values.chunks(cols) {
            for ((var, &v), mean) in vars.iter_mut().zip(row).zip(&means) {
                *var += (v - mean).powi(2);
            }
        }
        let stds = vars
            .into_iter()
            .enumerate()
            .map(|(col, var)| {
                let std = (var / rows as f64).sqrt();
                if std > 0.0 {
                    std
                } else {
                    log::debug!("Column {} is constant; it will only be centred", col);
                    1.0
                }
            })
            .collect();
        Ok(StandardScaler { means, stds })
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn stds(&self) -> &[f64] {
        &self.stds
    }

    pub fn transform(&self, data: &Tensor) -> Result<Tensor, NeuraFlowError> {
        self.apply(data, |v, mean, std| (v - mean) / std)
    }

    /// Maps standardised values back to the original units.
    pub fn inverse_transform(&self, data: &Tensor) -> Result<Tensor, NeuraFlowError> {
        self.apply(data, |v, mean, std| v * std + mean)
    }

    fn apply<F: Fn(f64, f64, f64) -> f64>(&self, data: &Tensor, f: F) -> Result<Tensor, NeuraFlowError> {
        let rows = data.rows()?;
        let cols = self.means.len();
        if data.shape()[1] != cols {
            return Err(NeuraFlowError::ShapeMismatch {
                expected: vec![rows, cols],
                actual: data.shape().to_vec(),
                operation: "StandardScaler".to_string(),
            });
        }
        let mut out = data.clone();
        for row in out.data_mut().chunks_mut(cols) {
            for ((v, mean), std) in row.iter_mut().zip(&self.means).zip(&self.stds) {
                *v = f(*v, *mean, *std);
            }
        }
        Ok(out)
    }
}

/// Fits a [`StandardScaler`] on `data` and returns the standardised copy.
pub fn scale(data: &Tensor) -> Result<Tensor, NeuraFlowError> {
    StandardScaler::fit(data)?.transform(data)
}
