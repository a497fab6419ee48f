//! Error types for header decoding.
//!
//! None of these are fatal. An `InvalidHeader` means "omit this header",
//! and the decorator treats it exactly like an absent header.

use thiserror::Error;

use crate::tus::HeaderName;

/// Why a raw value did not match its header's grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// Value is not one of the accepted protocol versions.
    #[error("unsupported protocol version")]
    UnsupportedVersion,

    /// Value (or a required part of it) is empty.
    #[error("value is empty")]
    Empty,

    /// Decimal integer with a redundant leading zero.
    #[error("leading zero in integer")]
    LeadingZero,

    /// Something other than an ASCII digit where an integer was expected.
    #[error("non-digit character in integer")]
    NonDigit,

    /// Integer does not fit in 64 bits.
    #[error("integer exceeds {}", u64::MAX)]
    Overflow,

    /// Defer flag must be exactly `1`.
    #[error("expected the literal 1")]
    NotDeferFlag,

    /// Missing the single space separating the two parts of a pair.
    #[error("expected `<token> <base64>`")]
    MissingSeparator,

    /// Checksum algorithm is empty or contains whitespace.
    #[error("invalid checksum algorithm token")]
    InvalidAlgorithm,

    /// Characters outside `A-Z a-z 0-9 + / =`.
    #[error("character outside the base64 alphabet")]
    NotBase64Alphabet,

    /// Neither `partial` nor `final;...`.
    #[error("unknown concat type")]
    UnknownConcatType,

    /// `final;` not followed by single-space separated URLs.
    #[error("malformed URL list")]
    MalformedUrlList,
}

/// A header was present but its value is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {header} value: {reason}")]
pub struct InvalidHeader {
    /// Header the value was offered for.
    pub header: HeaderName,
    /// What went wrong.
    pub reason: GrammarError,
}

impl InvalidHeader {
    pub fn new(header: HeaderName, reason: GrammarError) -> Self {
        Self { header, reason }
    }
}

/// Header name outside the recognised set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tus header: {0}")]
pub struct UnknownHeader(pub String);

/// Failure of the name-based decode entry point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(transparent)]
    UnknownHeader(#[from] UnknownHeader),

    #[error(transparent)]
    Invalid(#[from] InvalidHeader),
}
