use neuraflow_core::config::TrainingConfig;
use neuraflow_core::model::{FeedforwardModel, LogReporter};

mod common;

#[test]
fn test_feedforward_training_reduces_validation_loss() {
    common::init_logger();
    let config = TrainingConfig::default();
    let (x, y) = common::synthetic_regression(320, config.seed);
    let mut batches = common::batches(&x, &y, config.batch_size);
    let n_valid = (config.validation_fraction * batches.len() as f64) as usize;
    let valid = batches.split_off(batches.len() - n_valid);
    assert_eq!(valid.len(), 2);

    let mut model = FeedforwardModel::new(config.clone(), 3, 1).unwrap();
    let history = model.train(&batches, &valid, &mut LogReporter).unwrap();

    assert_eq!(history.epochs(), config.num_epochs);
    let first = history.valid_losses[0];
    let last = *history.valid_losses.last().unwrap();
    assert!(last.is_finite());
    assert!(last < first, "validation loss went from {} to {}", first, last);
}

#[test]
fn test_inference_after_training_is_idempotent() {
    let config = TrainingConfig {
        num_epochs: 2,
        ..TrainingConfig::default()
    };
    let (x, y) = common::synthetic_regression(64, 5);
    let batches = common::batches(&x, &y, config.batch_size);
    let mut model = FeedforwardModel::new(config, 3, 1).unwrap();
    model.train(&batches[..3], &batches[3..], &mut LogReporter).unwrap();

    let first = model.infer(&x).unwrap();
    let second = model.infer(&x).unwrap();
    assert_eq!(first.shape(), &[64, 1]);
    assert_eq!(first, second);
}
