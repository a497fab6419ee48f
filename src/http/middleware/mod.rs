//! Request middleware.

pub mod tus_headers;

pub use tus_headers::tus_headers_middleware;
