//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! tus header decoding and the echo server produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (per-header decode counters)
//!
//! Consumers:
//!     → stdout (plain or JSON lines)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured fields, never interpolated strings, for anything machine-read
//! - RUST_LOG overrides the configured level
//! - Counters are no-ops until an exporter is installed

pub mod logging;
pub mod metrics;
