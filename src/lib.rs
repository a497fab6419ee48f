//! tus resumable-upload header interpreter.
//!
//! Decodes the tus request headers (`Tus-Resumable`, `Upload-Offset`,
//! `Upload-Defer-Length`, `Upload-Length`, `Upload-Metadata`,
//! `Upload-Checksum`, `Upload-Concat`) into typed values, and provides an axum
//! middleware that attaches the valid ones to every request without ever
//! rejecting it.
//!
//! ```
//! use tus_header_parser::tus::{decode, HeaderName, TusHeaderValue};
//!
//! assert_eq!(
//!     decode(HeaderName::UploadOffset, "1000"),
//!     Ok(TusHeaderValue::UploadOffset(1000)),
//! );
//! assert!(decode(HeaderName::UploadOffset, "01").is_err());
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod tus;

pub use config::ServerConfig;
pub use error::{DecodeError, GrammarError, InvalidHeader, UnknownHeader};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use tus::{decode, decode_named, HeaderName, HeaderParser, TusHeaderValue, TusHeaders};
