//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "processing.concurrency must be > 0".into(),
            ));
        }
        if self
            .processing
            .supported_formats
            .iter()
            .all(|f| f.trim_start_matches('.').is_empty())
        {
            return Err(ConfigError::ValidationError(
                "processing.supported_formats must list at least one extension".into(),
            ));
        }
        if self.limits.request_timeout_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "limits.request_timeout_ms must be > 0 when set".into(),
            ));
        }
        if self.gemini.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini.endpoint must not be empty".into(),
            ));
        }
        if self.gemini.model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "gemini.model must not be empty".into(),
            ));
        }
        Ok(())
    }
}
