//! Configuration file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::{finalize_config, load_config, ConfigError};
use crate::config::schema::ApiConfig;

type Overrides = Arc<dyn Fn(&mut ApiConfig) + Send + Sync>;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    overrides: Overrides,
    update_tx: mpsc::UnboundedSender<ApiConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates, suitable
    /// for [`ApiFactory::follow`](crate::entrypoint::ApiFactory::follow).
    /// Reloaded files get the `CHAIN_API_*` environment overrides.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ApiConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                overrides: Arc::new(ApiConfig::apply_env),
                update_tx,
            },
            update_rx,
        )
    }

    /// Replace the overrides applied to every reloaded file.
    pub fn with_overrides<F>(mut self, overrides: F) -> Self
    where
        F: Fn(&mut ApiConfig) + Send + Sync + 'static,
    {
        self.overrides = Arc::new(overrides);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the file, apply overrides and validate the result.
    pub fn reload(&self) -> Result<ApiConfig, ConfigError> {
        reload(&self.path, &self.overrides)
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for updates to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let path = self.path.clone();
        let overrides = self.overrides.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Config file change detected, reloading...");
                        match reload(&path, &overrides) {
                            Ok(new_config) => {
                                let _ = tx.send(new_config);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to reload config: {}. Keeping current configuration.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, overrides: &Overrides) -> Result<ApiConfig, ConfigError> {
    let config = load_config(path)?;
    finalize_config(config, |c| overrides(c))
}
