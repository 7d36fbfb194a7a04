//! # Housing price regression
//!
//! Trains the one-hidden-layer feed-forward model on a four-column CSV table
//! (three features, then the price), the way the classic Boston housing
//! subset is laid out:
//!
//! 1. Load the table with `load_csv` (or generate a synthetic one).
//! 2. Standardise features and targets with `scale`.
//! 3. Cut fixed batches and hold out the tail for validation.
//! 4. Train for the configured number of epochs, logging the validation loss.
//!
//! ## Running
//! `RUST_LOG=info cargo run --example housing_regression -- data/boston_housing.txt`
//!
//! Hyperparameters can be overridden with `NEURAFLOW_*` environment variables
//! (e.g. `NEURAFLOW_NUM_EPOCHS=10`).

use neuraflow_core::config;
use neuraflow_core::model::{FeedforwardModel, LogReporter};
use neuraflow_core::tensor::randn;
use neuraflow_core::{NeuraFlowError, Tensor};
use neuraflow_data::{get_batches, load_csv, scale, train_validation_split};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn synthetic_table(rows: usize, seed: u64) -> Result<(Tensor, Tensor), NeuraFlowError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = randn(&[rows, 3], &mut rng);
    let noise = randn(&[rows], &mut rng);
    let y: Vec<f64> = x
        .data()
        .chunks(3)
        .zip(noise.data())
        .map(|(r, e)| 22.0 + 4.0 * r[0] - 3.0 * r[1] + 1.5 * r[2] * r[2] + e)
        .collect();
    Ok((x, Tensor::new(y, vec![rows, 1])?))
}

fn main() -> Result<(), NeuraFlowError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = config::from_env()?;

    let (x, y) = match std::env::args().nth(1) {
        Some(path) => load_csv(&path, &[0, 1, 2], 3)?,
        None => {
            log::info!("No CSV path given; using a synthetic table of 506 rows");
            synthetic_table(506, config.seed)?
        }
    };
    let (x, y) = (scale(&x)?, scale(&y)?);

    let batches = get_batches(&x, &y, config.batch_size)?;
    let (train, valid) = train_validation_split(batches, config.validation_fraction)?;

    let mut model = FeedforwardModel::new(config, x.shape()[1], 1)?;
    let history = model.train(&train, &valid, &mut LogReporter)?;

    if let Some(best) = history.best_epoch() {
        log::info!(
            "Best validation loss {:.4} at epoch {}",
            history.valid_losses[best],
            best + 1
        );
    }
    let predictions = model.infer(&valid[0].0)?;
    for (pred, target) in predictions.data().iter().zip(valid[0].1.data()).take(5) {
        log::info!("predicted {:+.3}, expected {:+.3}", pred, target);
    }
    Ok(())
}
