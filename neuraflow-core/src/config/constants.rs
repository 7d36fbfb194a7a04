//! Default hyperparameters and environment variable key names used by the config builder.

/// Environment variable prefix (e.g. `NEURAFLOW_LEARNING_RATE`).
pub(crate) const ENV_PREFIX: &str = "NEURAFLOW_";

// --- Env key suffixes (full key = ENV_PREFIX + suffix) ---

pub(crate) const ENV_LEARNING_RATE: &str = "LEARNING_RATE";
pub(crate) const ENV_MOMENTUM: &str = "MOMENTUM";
pub(crate) const ENV_NUM_EPOCHS: &str = "NUM_EPOCHS";
pub(crate) const ENV_BATCH_SIZE: &str = "BATCH_SIZE";
pub(crate) const ENV_HIDDEN_UNITS: &str = "HIDDEN_UNITS";
pub(crate) const ENV_VALIDATION_FRACTION: &str = "VALIDATION_FRACTION";
pub(crate) const ENV_SEED: &str = "SEED";

// --- Default values ---

pub(crate) const DEFAULT_LEARNING_RATE: f64 = 0.001;
pub(crate) const DEFAULT_MOMENTUM: f64 = 0.9;
pub(crate) const DEFAULT_NUM_EPOCHS: usize = 40;
pub(crate) const DEFAULT_BATCH_SIZE: usize = 16;
pub(crate) const DEFAULT_HIDDEN_UNITS: usize = 20;
pub(crate) const DEFAULT_VALIDATION_FRACTION: f64 = 0.1;
pub(crate) const DEFAULT_SEED: u64 = 42;
