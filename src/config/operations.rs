//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::MAX_WIDTH;
use crate::context::DataContext;
use crate::error::{Result, SeqError};
use log::debug;
use std::path::Path;
use std::time::Duration;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SeqError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SeqError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `config.yaml` from the data directory, or defaults when absent.
    pub fn load_for(ctx: &DataContext) -> Result<Self> {
        let path = ctx.config_path();
        if path.exists() {
            debug!("loading config from '{}'", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as null; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SeqError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `lock_stale_secs` must be positive
    /// - `lock_retry_ms` must be positive
    /// - `default_width` must not exceed 20
    pub fn validate(&self) -> Result<()> {
        if self.lock_stale_secs == 0 {
            return Err(SeqError::UserError(
                "config validation failed: lock_stale_secs must be greater than 0".to_string(),
            ));
        }

        if self.lock_retry_ms == 0 {
            return Err(SeqError::UserError(
                "config validation failed: lock_retry_ms must be greater than 0".to_string(),
            ));
        }

        if self.default_width > MAX_WIDTH {
            return Err(SeqError::UserError(format!(
                "config validation failed: default_width must be at most {} (found {})",
                MAX_WIDTH, self.default_width
            )));
        }

        Ok(())
    }

    /// Lock wait budget.
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    /// Lock staleness threshold.
    pub fn lock_stale_after(&self) -> Duration {
        Duration::from_secs(self.lock_stale_secs)
    }

    /// Sleep between lock attempts.
    pub fn lock_retry_interval(&self) -> Duration {
        Duration::from_millis(self.lock_retry_ms)
    }
}
