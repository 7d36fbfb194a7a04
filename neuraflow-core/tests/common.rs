use neuraflow_core::tensor::{randn, Tensor};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Column-wise standardisation (population variance).
fn standardise(rows: usize, cols: usize, data: &mut [f64]) {
    for c in 0..cols {
        let mean = (0..rows).map(|r| data[r * cols + c]).sum::<f64>() / rows as f64;
        let var = (0..rows)
            .map(|r| (data[r * cols + c] - mean).powi(2))
            .sum::<f64>()
            / rows as f64;
        let std = if var > 0.0 { var.sqrt() } else { 1.0 };
        for r in 0..rows {
            data[r * cols + c] = (data[r * cols + c] - mean) / std;
        }
    }
}

/// `n` samples of three standard-normal features with a mildly non-linear
/// target, both standardised.
#[allow(dead_code)]
pub fn synthetic_regression(n: usize, seed: u64) -> (Tensor, Tensor) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut x = randn(&[n, 3], &mut rng).into_data();
    let noise = randn(&[n], &mut rng).into_data();
    let mut y: Vec<f64> = x
        .chunks(3)
        .zip(&noise)
        .map(|(r, e)| 0.8 * r[0] - 0.5 * r[1] + 0.3 * r[2] * r[2] + 0.1 * e)
        .collect();
    standardise(n, 3, &mut x);
    standardise(n, 1, &mut y);
    (
        Tensor::new(x, vec![n, 3]).unwrap(),
        Tensor::new(y, vec![n, 1]).unwrap(),
    )
}

/// Consecutive row batches; the last one may be short.
#[allow(dead_code)]
pub fn batches(x: &Tensor, y: &Tensor, batch_size: usize) -> Vec<(Tensor, Tensor)> {
    let n = x.rows().unwrap();
    (0..n)
        .step_by(batch_size)
        .map(|start| {
            let end = (start + batch_size).min(n);
            (
                x.slice_rows(start, end).unwrap(),
                y.slice_rows(start, end).unwrap(),
            )
        })
        .collect()
}
