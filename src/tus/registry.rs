//! Header grammar registry.
//!
//! Maps each [`HeaderName`] to its grammar and turns a raw value into either
//! a [`TusHeaderValue`] or an [`InvalidHeader`]. Decoding is pure; a
//! [`HeaderParser`] holds nothing but the protocol-version policy and is
//! shared freely between requests.

use crate::error::{DecodeError, InvalidHeader};

use super::grammar;
use super::header_name::HeaderName;
use super::value::TusHeaderValue;

/// The protocol version accepted by default.
pub const TUS_RESUMABLE: &str = "1.0.0";

/// Decodes raw header values against the tus grammars.
#[derive(Debug, Clone)]
pub struct HeaderParser {
    supported_versions: Vec<String>,
}

impl HeaderParser {
    /// Create a parser accepting exactly the given `Tus-Resumable` literals.
    pub fn new<I, S>(supported_versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported_versions: supported_versions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn supported_versions(&self) -> &[String] {
        &self.supported_versions
    }

    /// Decode `raw` as a value of header `name`.
    pub fn decode(&self, name: HeaderName, raw: &str) -> Result<TusHeaderValue, InvalidHeader> {
        let invalid = |reason| InvalidHeader::new(name, reason);
        match name {
            HeaderName::TusResumable => grammar::parse_version(raw, &self.supported_versions)
                .map(TusHeaderValue::TusResumable)
                .map_err(invalid),
            HeaderName::UploadOffset => grammar::parse_non_negative(raw)
                .map(TusHeaderValue::UploadOffset)
                .map_err(invalid),
            HeaderName::UploadDeferLength => grammar::parse_defer_length(raw)
                .map(|()| TusHeaderValue::UploadDeferLength)
                .map_err(invalid),
            HeaderName::UploadLength => grammar::parse_non_negative(raw)
                .map(TusHeaderValue::UploadLength)
                .map_err(invalid),
            HeaderName::UploadMetadata => {
                Ok(TusHeaderValue::UploadMetadata(grammar::parse_metadata(raw)))
            }
            HeaderName::UploadChecksum => grammar::parse_checksum(raw)
                .map(TusHeaderValue::UploadChecksum)
                .map_err(invalid),
            HeaderName::UploadConcat => grammar::parse_concat(raw)
                .map(TusHeaderValue::UploadConcat)
                .map_err(invalid),
        }
    }

    /// Like [`HeaderParser::decode`], with the header given by name (any ASCII case).
    pub fn decode_named(&self, name: &str, raw: &str) -> Result<TusHeaderValue, DecodeError> {
        let name: HeaderName = name.parse()?;
        Ok(self.decode(name, raw)?)
    }
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new([TUS_RESUMABLE])
    }
}

/// Decode a single header value with the default version policy.
pub fn decode(name: HeaderName, raw: &str) -> Result<TusHeaderValue, InvalidHeader> {
    HeaderParser::default().decode(name, raw)
}

/// Decode a single header value, looking the header up by name.
pub fn decode_named(name: &str, raw: &str) -> Result<TusHeaderValue, DecodeError> {
    HeaderParser::default().decode_named(name, raw)
}
