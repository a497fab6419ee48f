//! Lifecycle management.
//!
//! # Data Flow
//! ```text
//! Ctrl+C (or Shutdown::trigger)
//!     → watch channel flips to true
//!     → every Shutdown::signal() future resolves
//!     → axum graceful shutdown drains in-flight requests
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
