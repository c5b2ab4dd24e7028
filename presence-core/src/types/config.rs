//! Registry configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS, ENV_SWEEP_INTERVAL_SECS, ENV_TIMEOUT_SECS,
};
use crate::error::{PresenceError, Result};

/// Expiry parameters, fixed for the lifetime of a registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum age of `last_seen` before an entry is evicted
    pub timeout: Duration,
    /// Period between sweeps
    pub sweep_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

impl RegistryConfig {
    /// Creates a validated configuration.
    pub fn new(timeout: Duration, sweep_interval: Duration) -> Result<Self> {
        let config = Self {
            timeout,
            sweep_interval,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builds a configuration from raw variable values.
    ///
    /// `lookup` maps a variable name to its value; unset variables keep the
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            Some(raw) => parse_secs(ENV_TIMEOUT_SECS, &raw)?,
            None => defaults.timeout,
        };
        let sweep_interval = match lookup(ENV_SWEEP_INTERVAL_SECS) {
            Some(raw) => parse_secs(ENV_SWEEP_INTERVAL_SECS, &raw)?,
            None => defaults.sweep_interval,
        };
        Self::new(timeout, sweep_interval)
    }

    /// Rejects zero durations.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(PresenceError::ConfigError("timeout must be positive".into()));
        }
        if self.sweep_interval.is_zero() {
            return Err(PresenceError::ConfigError(
                "sweep interval must be positive".into(),
            ));
        }
        Ok(())
    }
}

fn parse_secs(name: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| PresenceError::ConfigError(format!("{name}={raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(90));
        assert_eq!(config.sweep_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_from_lookup_unset_keeps_defaults() {
        let config = RegistryConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RegistryConfig::default());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = RegistryConfig::from_lookup(lookup(&[
            (ENV_TIMEOUT_SECS, "30"),
            (ENV_SWEEP_INTERVAL_SECS, " 5 "),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.sweep_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = RegistryConfig::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, PresenceError::ConfigError(_)));
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }

    #[test]
    fn test_zero_rejected() {
        assert!(RegistryConfig::new(Duration::ZERO, Duration::from_secs(1)).is_err());
        assert!(RegistryConfig::new(Duration::from_secs(1), Duration::ZERO).is_err());
    }
}
