//! Training hyperparameters.
//!
//! Load from the environment with [`from_env`] and check with
//! [`TrainingConfig::validate`]. Defaults and env key names live in the
//! `constants` submodule.

mod builder;
mod constants;

pub use builder::{env_key, env_parsed, from_env};

use crate::error::NeuraFlowError;
use constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_HIDDEN_UNITS, DEFAULT_LEARNING_RATE, DEFAULT_MOMENTUM,
    DEFAULT_NUM_EPOCHS, DEFAULT_SEED, DEFAULT_VALIDATION_FRACTION,
};
use thiserror::Error;

/// Errors produced when building or validating a [`TrainingConfig`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("config validation: {0}")]
    Validation(String),

    #[error("env var {key}: {message}")]
    EnvVar { key: String, message: String },

    #[error("env var {key}={value:?}: {message}")]
    Parse {
        key: String,
        value: String,
        message: String,
    },
}

impl From<ConfigError> for NeuraFlowError {
    fn from(err: ConfigError) -> Self {
        NeuraFlowError::InvalidConfig(err.to_string())
    }
}

/// Hyperparameters of the feed-forward training loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub momentum: f64,
    pub num_epochs: usize,
    pub batch_size: usize,
    pub hidden_units: usize,
    /// Share of batches, taken from the tail, held out for validation.
    pub validation_fraction: f64,
    /// Seed for weight initialisation and shuffling.
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            momentum: DEFAULT_MOMENTUM,
            num_epochs: DEFAULT_NUM_EPOCHS,
            batch_size: DEFAULT_BATCH_SIZE,
            hidden_units: DEFAULT_HIDDEN_UNITS,
            validation_fraction: DEFAULT_VALIDATION_FRACTION,
            seed: DEFAULT_SEED,
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::Validation(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..1.0).contains(&self.momentum) {
            return Err(ConfigError::Validation(format!(
                "momentum must be in [0, 1), got {}",
                self.momentum
            )));
        }
        if self.num_epochs == 0 {
            return Err(ConfigError::Validation("num_epochs must be at least 1".into()));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Validation("batch_size must be at least 1".into()));
        }
        if self.hidden_units == 0 {
            return Err(ConfigError::Validation("hidden_units must be at least 1".into()));
        }
        if !(0.0..1.0).contains(&self.validation_fraction) {
            return Err(ConfigError::Validation(format!(
                "validation_fraction must be in [0, 1), got {}",
                self.validation_fraction
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_setup() {
        let config = TrainingConfig::default();
        assert_eq!(config.learning_rate, 0.001);
        assert_eq!(config.momentum, 0.9);
        assert_eq!(config.num_epochs, 40);
        assert_eq!(config.batch_size, 16);
        assert_eq!(config.hidden_units, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let bad = [
            TrainingConfig { learning_rate: 0.0, ..Default::default() },
            TrainingConfig { momentum: 1.0, ..Default::default() },
            TrainingConfig { num_epochs: 0, ..Default::default() },
            TrainingConfig { batch_size: 0, ..Default::default() },
            TrainingConfig { hidden_units: 0, ..Default::default() },
            TrainingConfig { validation_fraction: 1.5, ..Default::default() },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_env_key_uses_prefix() {
        assert_eq!(env_key("SEED"), "NEURAFLOW_SEED");
    }

    #[test]
    fn test_env_parsed_reports_bad_values() {
        // Key unique to this test so parallel tests do not interfere.
        let key = env_key("TEST_ONLY_BATCH");
        std::env::set_var(&key, "sixteen");
        let err = env_parsed::<usize>(&key).unwrap_err();
        std::env::remove_var(&key);
        assert!(matches!(err, ConfigError::Parse { ref value, .. } if value == "sixteen"));
        assert_eq!(env_parsed::<usize>(&key).unwrap(), None);
    }

    #[test]
    fn test_config_error_converts_into_crate_error() {
        let err: NeuraFlowError = ConfigError::Validation("x".into()).into();
        assert!(matches!(err, NeuraFlowError::InvalidConfig(_)));
    }
}
