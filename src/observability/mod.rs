//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing / templates produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log output (stderr)
//!     → Any `metrics` recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured logging for machine parsing
//! - Rejection reasons are logged, never returned to callers
//! - Metrics are cheap (no-op without a recorder)

pub mod logging;
pub mod metrics;
