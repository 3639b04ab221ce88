//! Process-wide `configure` / `create`.
//!
//! The global factory is shared by every test in this binary, so the whole
//! lifecycle is exercised in a single test.

use chain_api::config::ApiConfig;
use chain_api::entrypoint;
use chain_api::errors::ApiError;

#[test]
fn test_global_configure_then_create() {
    assert!(!entrypoint::global().is_configured());

    let err = entrypoint::create("provider").unwrap_err();
    assert!(matches!(err, ApiError::NotConfigured { .. }));
    assert_eq!(err.to_string(), "chain-api must be configured");

    let first = ApiConfig {
        chain_id: 31337,
        ..ApiConfig::default()
    };
    chain_api::configure(first.clone());

    let api = chain_api::create("provider").unwrap();
    assert_eq!(**api.config(), first);
    assert_eq!(*api.provider(), "provider");

    let second = ApiConfig {
        rpc_url: "http://10.0.0.2:8545".to_string(),
        ..first
    };
    entrypoint::configure(second.clone());

    let api = entrypoint::create("other").unwrap();
    assert_eq!(**api.config(), second);
    assert_eq!(*api.provider(), "other");
    assert!(entrypoint::global().is_configured());
}

#[test]
fn test_errors_reexport_is_the_same_module() {
    fn takes_root_error(err: chain_api::errors::ApiError) -> String {
        err.to_string()
    }

    let via_entrypoint: entrypoint::errors::ApiError = entrypoint::errors::ApiError::InvalidUrl("x".into());
    assert_eq!(takes_root_error(via_entrypoint), "Invalid RPC URL: x");
    assert_eq!(entrypoint::errors::PACKAGE_NAME, chain_api::errors::PACKAGE_NAME);
}
