//! Provider construction helpers.

use alloy::providers::{Provider, ProviderBuilder};

use crate::errors::{ApiError, ApiResult};

/// Build an HTTP JSON-RPC provider for `rpc_url`.
///
/// No request is made; an unreachable endpoint only surfaces on the first call.
pub fn http_provider(rpc_url: &str) -> ApiResult<impl Provider + Clone> {
    let url: url::Url = rpc_url
        .parse()
        .map_err(|e| ApiError::InvalidUrl(format!("'{}': {}", rpc_url, e)))?;

    Ok(ProviderBuilder::new().connect_http(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url() {
        let err = http_provider("localhost 8545").err().unwrap();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        assert!(err.to_string().contains("localhost 8545"));
    }

    #[test]
    fn test_valid_url() {
        assert!(http_provider("http://127.0.0.1:8545").is_ok());
    }
}
