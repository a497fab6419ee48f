//! tus protocol header interpretation.
//!
//! # Data Flow
//! ```text
//! raw header value
//!     → registry.rs (pick grammar by HeaderName)
//!     → grammar.rs (anchored match + base64 decode)
//!     → TusHeaderValue | InvalidHeader
//!
//! request headers
//!     → headers.rs (canonical-order loop over the registry)
//!     → TusHeaders
//! ```
//!
//! # Design Decisions
//! - Closed enums for names and values; consumers match exhaustively
//! - Invalid is a value, not a panic; nothing here can fail a request
//! - Metadata drops bad entries individually; every other header is all-or-nothing

mod grammar;
pub mod header_name;
pub mod headers;
pub mod metadata;
pub mod registry;
pub mod value;

pub use header_name::HeaderName;
pub use headers::{HeaderLookup, TusHeaders};
pub use metadata::UploadMetadata;
pub use registry::{decode, decode_named, HeaderParser, TUS_RESUMABLE};
pub use value::{TusHeaderValue, UploadChecksum, UploadConcat};
