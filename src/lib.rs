//! Configured chain API factory.
//!
//! Store an [`ApiConfig`] once with [`configure`], then [`create`] an [`Api`]
//! for each provider that needs it.

pub mod api;
pub mod config;
pub mod entrypoint;
pub mod errors;
pub mod observability;

pub use api::Api;
pub use config::ApiConfig;
pub use entrypoint::{configure, create, ApiFactory};
pub use errors::{ApiError, ApiResult};
