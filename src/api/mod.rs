//! Chain query surface bound to a configuration and a provider.
//!
//! # Data Flow
//! ```text
//! ApiFactory::create(provider)
//!     → client.rs (Api<P>: config snapshot + provider)
//!     → provider.rs (HTTP provider construction)
//!     → alloy Provider (JSON-RPC, per-call timeout)
//! ```
//!
//! # Design Decisions
//! - `Api` accepts any provider; chain queries need `alloy::providers::Provider`
//! - Each `Api` keeps the configuration it was created with
//! - All RPC calls are bounded by `rpc_timeout_secs`

pub mod client;
pub mod provider;
pub mod types;

pub use client::Api;
pub use provider::http_provider;
pub use types::ConfirmationStatus;
