//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, trace + timeout layers)
//!     → middleware/tus_headers.rs (decode tus headers into extensions)
//!     → echo handler (serialize TusHeaders back as JSON)
//! ```

pub mod middleware;
pub mod server;

pub use middleware::tus_headers_middleware;
pub use server::HttpServer;
