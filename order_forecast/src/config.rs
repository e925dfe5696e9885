//! Environment-derived run configuration.

use shared_utils::env::get_env_var_or;
use thiserror::Error;

/// Errors related to application configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment hint is set but not numeric.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidHint { name: String, value: String },
}

/// CPU/memory sizing hints forwarded by the scheduler. They do not change the
/// pipeline's behavior; they are logged so a run can be correlated with the
/// resources it was granted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceHints {
    pub cpu: f64,
    pub memory_mb: u64,
}

impl ResourceHints {
    /// Reads `CPU` and `MEMORY` from the environment, with the scheduler's
    /// defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cpu_raw = get_env_var_or("CPU", "0.25");
        let memory_raw = get_env_var_or("MEMORY", "256");

        let cpu = cpu_raw.parse::<f64>().map_err(|_| ConfigError::InvalidHint {
            name: "CPU".to_string(),
            value: cpu_raw.clone(),
        })?;
        let memory_mb = memory_raw
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidHint {
                name: "MEMORY".to_string(),
                value: memory_raw.clone(),
            })?;

        Ok(Self { cpu, memory_mb })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_unset() {
        // CPU/MEMORY are not set in the test environment.
        let hints = ResourceHints::from_env().unwrap();
        assert_eq!(hints.cpu, 0.25);
        assert_eq!(hints.memory_mb, 256);
    }
}
