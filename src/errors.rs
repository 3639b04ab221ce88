//! Error types shared by the factory, the API surface and config loading.

use thiserror::Error;

use crate::config::ConfigError;

/// Package name carried by [`ApiError::NotConfigured`].
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Errors that can occur while creating or using an [`Api`](crate::api::Api).
#[derive(Debug, Error)]
pub enum ApiError {
    /// `create` was called before any configuration was stored.
    #[error("{package} must be configured")]
    NotConfigured { package: &'static str },

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider URL could not be parsed.
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// The provider answered with an error.
    #[error("RPC error in {method}: {message}")]
    Rpc { method: &'static str, message: String },

    /// The provider did not answer within the configured timeout.
    #[error("RPC {method} timed out after {secs} seconds")]
    Timeout { method: &'static str, secs: u64 },

    /// The provider serves a different chain than configured.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl ApiError {
    pub(crate) fn not_configured() -> Self {
        Self::NotConfigured {
            package: PACKAGE_NAME,
        }
    }

    /// Whether retrying the same call could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Rpc { .. } | Self::Timeout { .. })
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_names_package() {
        let err = ApiError::not_configured();
        assert_eq!(err.to_string(), "chain-api must be configured");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Timeout {
            method: "eth_blockNumber",
            secs: 10,
        };
        assert_eq!(err.to_string(), "RPC eth_blockNumber timed out after 10 seconds");

        let err = ApiError::ChainMismatch {
            expected: 1,
            actual: 31337,
        };
        assert!(err.to_string().contains("31337"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(ApiError::Rpc {
            method: "eth_chainId",
            message: "connection refused".into()
        }
        .is_transient());
        assert!(!ApiError::not_configured().is_transient());
        assert!(!ApiError::InvalidUrl("x".into()).is_transient());
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ApiError = ConfigError::Validation(Vec::new()).into();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
