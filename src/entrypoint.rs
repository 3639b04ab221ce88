//! Configure-then-create entrypoint.
//!
//! An [`ApiFactory`] holds the most recently stored [`ApiConfig`] and builds
//! an [`Api`] from it for every provider handed to [`ApiFactory::create`].
//! The free functions [`configure`] and [`create`] drive one process-wide
//! factory for callers that don't want to pass a factory around.
//!
//! ```no_run
//! use chain_api::{api::http_provider, config::ApiConfig, entrypoint};
//!
//! # fn main() -> Result<(), chain_api::errors::ApiError> {
//! entrypoint::configure(ApiConfig::default());
//! let api = entrypoint::create(http_provider("http://localhost:8545")?)?;
//! # let _ = api;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::Api;
use crate::config::ApiConfig;
use crate::errors::{ApiError, ApiResult};
use crate::observability::metrics;

pub use crate::errors;

static GLOBAL: ApiFactory = ApiFactory::new();

/// Holds the last stored configuration and creates [`Api`] instances from it.
///
/// Reads and writes are lock-free; a `create` racing a `configure` sees
/// either the old or the new configuration, never a mix.
pub struct ApiFactory {
    config: ArcSwapOption<ApiConfig>,
}

impl ApiFactory {
    /// Create an unconfigured factory.
    pub const fn new() -> Self {
        Self {
            config: ArcSwapOption::const_empty(),
        }
    }

    /// Create a factory that is already configured.
    pub fn with_config(config: ApiConfig) -> Self {
        let factory = Self::new();
        factory.configure(config);
        factory
    }

    /// Store `config`, replacing any previous configuration.
    ///
    /// Existing `Api` instances keep the configuration they were created with.
    pub fn configure(&self, config: ApiConfig) {
        tracing::info!(
            rpc_url = %config.rpc_url,
            chain_id = config.chain_id,
            "Configuration stored"
        );
        self.config.store(Some(Arc::new(config)));
        metrics::record_configure();
    }

    pub fn is_configured(&self) -> bool {
        self.config.load().is_some()
    }

    /// The currently stored configuration, if any.
    pub fn config(&self) -> Option<Arc<ApiConfig>> {
        self.config.load_full()
    }

    /// Build a new [`Api`] from the stored configuration and `provider`.
    ///
    /// Fails with [`ApiError::NotConfigured`] until `configure` has been called.
    pub fn create<P>(&self, provider: P) -> ApiResult<Api<P>> {
        let Some(config) = self.config.load_full() else {
            metrics::record_create("not_configured");
            return Err(ApiError::not_configured());
        };

        metrics::record_create("ok");
        Ok(Api::new(config, provider))
    }

    /// Apply every configuration received on `updates` until the channel closes.
    pub fn follow(self: &Arc<Self>, mut updates: mpsc::UnboundedReceiver<ApiConfig>) -> JoinHandle<()> {
        let factory = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(config) = updates.recv().await {
                factory.configure(config);
            }
            tracing::debug!("Configuration update channel closed");
        })
    }
}

impl Default for ApiFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ApiFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiFactory")
            .field("config", &self.config.load().as_deref())
            .finish()
    }
}

/// The process-wide factory behind [`configure`] and [`create`].
pub fn global() -> &'static ApiFactory {
    &GLOBAL
}

/// Store `config` in the process-wide factory. Last call wins.
pub fn configure(config: ApiConfig) {
    GLOBAL.configure(config);
}

/// Create an [`Api`] from the process-wide configuration.
pub fn create<P>(provider: P) -> ApiResult<Api<P>> {
    GLOBAL.create(provider)
}
