//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → schema.rs overrides (CHAIN_API_* environment, CLI flags)
//!     → loader.rs finalize_config (re-validate)
//!     → ApiFactory::configure (atomic swap)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → channel → ApiFactory::follow → configure
//! ```
//!
//! # Design Decisions
//! - Config is immutable once stored; changes replace it whole
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{finalize_config, load_config, parse_config, ConfigError};
pub use schema::{ApiConfig, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
