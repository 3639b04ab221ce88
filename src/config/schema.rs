//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! carry defaults so a minimal file (or none at all) is enough.

use serde::{Deserialize, Serialize};

/// Environment variable overriding [`ApiConfig::rpc_url`].
pub const RPC_URL_ENV_VAR: &str = "CHAIN_API_RPC_URL";

/// Environment variable overriding [`ApiConfig::chain_id`].
pub const CHAIN_ID_ENV_VAR: &str = "CHAIN_API_CHAIN_ID";

/// Environment variable overriding [`ObservabilityConfig::log_level`].
pub const LOG_LEVEL_ENV_VAR: &str = "CHAIN_API_LOG_LEVEL";

/// Root configuration an [`Api`](crate::api::Api) is bound to.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID the endpoint is expected to serve (31337 for local Anvil).
    pub chain_id: u64,

    /// Per-call RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required for finality.
    pub confirmation_blocks: u32,

    /// Check the provider's chain ID when the CLI starts.
    pub verify_chain_id: bool,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 1,
            rpc_timeout_secs: 10,
            confirmation_blocks: 3,
            verify_chain_id: false,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Replace file values with overrides found through `lookup`.
    ///
    /// Unparsable numeric overrides are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(RPC_URL_ENV_VAR) {
            self.rpc_url = url;
        }

        if let Some(raw) = lookup(CHAIN_ID_ENV_VAR) {
            match raw.trim().parse() {
                Ok(id) => self.chain_id = id,
                Err(_) => tracing::warn!(value = %raw, "Ignoring invalid {}", CHAIN_ID_ENV_VAR),
            }
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV_VAR) {
            self.observability.log_level = level;
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
