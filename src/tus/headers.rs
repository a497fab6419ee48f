//! Request-level header extraction.
//!
//! # Data Flow
//! ```text
//! request headers (case-insensitive lookup)
//!     → for each HeaderName in canonical order
//!         absent  → skip
//!         present → registry decode
//!                     invalid → skip (debug log)
//!                     valid   → insert
//!     → TusHeaders (attached to the request by the middleware)
//! ```

use std::collections::BTreeMap;

use axum::http::HeaderMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::observability::metrics;

use super::header_name::HeaderName;
use super::metadata::UploadMetadata;
use super::registry::HeaderParser;
use super::value::{TusHeaderValue, UploadChecksum, UploadConcat};

/// Read-only, case-insensitive access to request headers.
pub trait HeaderLookup {
    /// Value of the header named `name`, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderLookup for HeaderMap {
    // `HeaderValue::to_str` stops at visible ASCII; metadata keys may be any UTF-8.
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }
}

impl<'a> HeaderLookup for [(&'a str, &'a str)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v)
    }
}

/// Decoded tus headers of one request.
///
/// Holds only headers that were present and valid, and always iterates in
/// canonical [`HeaderName`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TusHeaders {
    values: BTreeMap<HeaderName, TusHeaderValue>,
}

impl TusHeaders {
    pub fn get(&self, name: HeaderName) -> Option<&TusHeaderValue> {
        self.values.get(&name)
    }

    pub fn contains(&self, name: HeaderName) -> bool {
        self.values.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, &TusHeaderValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Output keys (`tusResumable`, `uploadOffset`, ...) in order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().map(|k| k.camel_key())
    }

    pub fn tus_resumable(&self) -> Option<&str> {
        match self.get(HeaderName::TusResumable) {
            Some(TusHeaderValue::TusResumable(v)) => Some(v),
            _ => None,
        }
    }

    pub fn upload_offset(&self) -> Option<u64> {
        match self.get(HeaderName::UploadOffset) {
            Some(TusHeaderValue::UploadOffset(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn upload_defer_length(&self) -> bool {
        self.contains(HeaderName::UploadDeferLength)
    }

    pub fn upload_length(&self) -> Option<u64> {
        match self.get(HeaderName::UploadLength) {
            Some(TusHeaderValue::UploadLength(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn upload_metadata(&self) -> Option<&UploadMetadata> {
        match self.get(HeaderName::UploadMetadata) {
            Some(TusHeaderValue::UploadMetadata(m)) => Some(m),
            _ => None,
        }
    }

    pub fn upload_checksum(&self) -> Option<&UploadChecksum> {
        match self.get(HeaderName::UploadChecksum) {
            Some(TusHeaderValue::UploadChecksum(c)) => Some(c),
            _ => None,
        }
    }

    pub fn upload_concat(&self) -> Option<&UploadConcat> {
        match self.get(HeaderName::UploadConcat) {
            Some(TusHeaderValue::UploadConcat(c)) => Some(c),
            _ => None,
        }
    }

    // Keyed by the value's own header so a value can never sit under the wrong name.
    fn insert(&mut self, value: TusHeaderValue) {
        self.values.insert(value.header(), value);
    }
}

impl Serialize for TusHeaders {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name.camel_key(), value)?;
        }
        map.end()
    }
}

impl HeaderParser {
    /// Decode every recognised header present in `lookup`.
    ///
    /// Never fails: absent and invalid headers are simply left out.
    pub fn parse_headers<L: HeaderLookup + ?Sized>(&self, lookup: &L) -> TusHeaders {
        let mut headers = TusHeaders::default();
        for name in HeaderName::ALL {
            let Some(raw) = lookup.header(name.as_str()) else {
                continue;
            };
            match self.decode(name, raw) {
                Ok(value) => {
                    metrics::record_header(name, true);
                    headers.insert(value);
                }
                Err(err) => {
                    metrics::record_header(name, false);
                    tracing::debug!(header = %name, raw = %raw, error = %err, "Ignoring invalid tus header");
                }
            }
        }
        headers
    }
}
