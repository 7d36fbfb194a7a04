//! Build [`TrainingConfig`] from environment variables.

use super::constants::{
    ENV_BATCH_SIZE, ENV_HIDDEN_UNITS, ENV_LEARNING_RATE, ENV_MOMENTUM, ENV_NUM_EPOCHS, ENV_PREFIX,
    ENV_SEED, ENV_VALIDATION_FRACTION,
};
use super::{ConfigError, TrainingConfig};

/// Returns the full environment variable key for a given suffix (e.g. `SEED` → `NEURAFLOW_SEED`).
#[must_use]
pub fn env_key(suffix: &str) -> String {
    format!("{ENV_PREFIX}{suffix}")
}

/// Reads an environment variable and parses it into type `T`.
///
/// Returns `Ok(None)` if the variable is unset and `Err(ConfigError::Parse)`
/// if it is set but does not parse.
pub fn env_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let s = match std::env::var(key) {
        Ok(s) => s,
        Err(std::env::VarError::NotPresent) => return Ok(None),
        Err(e) => {
            return Err(ConfigError::EnvVar {
                key: key.to_string(),
                message: e.to_string(),
            })
        }
    };
    s.trim().parse().map(Some).map_err(|e: T::Err| ConfigError::Parse {
        key: key.to_string(),
        value: s.clone(),
        message: e.to_string(),
    })
}

/// Builds a [`TrainingConfig`] from `NEURAFLOW_*` variables, falling back to
/// [`TrainingConfig::default`] for unset values, then validates it.
pub fn from_env() -> Result<TrainingConfig, ConfigError> {
    let default = TrainingConfig::default();
    let config = TrainingConfig {
        learning_rate: env_parsed(&env_key(ENV_LEARNING_RATE))?.unwrap_or(default.learning_rate),
        momentum: env_parsed(&env_key(ENV_MOMENTUM))?.unwrap_or(default.momentum),
        num_epochs: env_parsed(&env_key(ENV_NUM_EPOCHS))?.unwrap_or(default.num_epochs),
        batch_size: env_parsed(&env_key(ENV_BATCH_SIZE))?.unwrap_or(default.batch_size),
        hidden_units: env_parsed(&env_key(ENV_HIDDEN_UNITS))?.unwrap_or(default.hidden_units),
        validation_fraction: env_parsed(&env_key(ENV_VALIDATION_FRACTION))?
            .unwrap_or(default.validation_fraction),
        seed: env_parsed(&env_key(ENV_SEED))?.unwrap_or(default.seed),
    };
    config.validate()?;
    log::debug!("Loaded training config from environment: {:?}", config);
    Ok(config)
}
