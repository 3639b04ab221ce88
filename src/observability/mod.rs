//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//! ```
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured log level
//! - Metrics are no-ops until the embedding application installs a recorder

pub mod logging;
pub mod metrics;
