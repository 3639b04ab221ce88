//! Configuration validation.
//!
//! Serde handles syntax; this module checks values. Every problem is
//! reported, not just the first one.

use std::fmt;

use crate::config::schema::ApiConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rpc_url.trim().is_empty() {
        errors.push(ValidationError::new("rpc_url", "must not be empty"));
    } else if let Err(e) = config.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "rpc_url",
            format!("invalid URL '{}': {}", config.rpc_url, e),
        ));
    }

    if config.chain_id == 0 {
        errors.push(ValidationError::new("chain_id", "must be greater than 0"));
    }

    if config.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("rpc_timeout_secs", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
