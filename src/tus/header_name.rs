//! The closed set of recognised tus headers.

use std::fmt;
use std::str::FromStr;

use crate::error::UnknownHeader;

/// A recognised tus request header.
///
/// Variants are declared in canonical processing order; `Ord` and
/// [`HeaderName::ALL`] both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderName {
    /// Protocol version (`Tus-Resumable`).
    TusResumable,
    UploadOffset,
    UploadDeferLength,
    UploadLength,
    UploadMetadata,
    UploadChecksum,
    UploadConcat,
}

impl HeaderName {
    /// Every header, in canonical order.
    pub const ALL: [HeaderName; 7] = [
        HeaderName::TusResumable,
        HeaderName::UploadOffset,
        HeaderName::UploadDeferLength,
        HeaderName::UploadLength,
        HeaderName::UploadMetadata,
        HeaderName::UploadChecksum,
        HeaderName::UploadConcat,
    ];

    /// Lowercase wire name, as used for header lookup.
    pub const fn as_str(self) -> &'static str {
        match self {
            HeaderName::TusResumable => "tus-resumable",
            HeaderName::UploadOffset => "upload-offset",
            HeaderName::UploadDeferLength => "upload-defer-length",
            HeaderName::UploadLength => "upload-length",
            HeaderName::UploadMetadata => "upload-metadata",
            HeaderName::UploadChecksum => "upload-checksum",
            HeaderName::UploadConcat => "upload-concat",
        }
    }

    /// Key under which the decoded value is exposed to handlers.
    pub const fn camel_key(self) -> &'static str {
        match self {
            HeaderName::TusResumable => "tusResumable",
            HeaderName::UploadOffset => "uploadOffset",
            HeaderName::UploadDeferLength => "uploadDeferLength",
            HeaderName::UploadLength => "uploadLength",
            HeaderName::UploadMetadata => "uploadMetadata",
            HeaderName::UploadChecksum => "uploadChecksum",
            HeaderName::UploadConcat => "uploadConcat",
        }
    }

    const fn canonical(self) -> &'static str {
        match self {
            HeaderName::TusResumable => "Tus-Resumable",
            HeaderName::UploadOffset => "Upload-Offset",
            HeaderName::UploadDeferLength => "Upload-Defer-Length",
            HeaderName::UploadLength => "Upload-Length",
            HeaderName::UploadMetadata => "Upload-Metadata",
            HeaderName::UploadChecksum => "Upload-Checksum",
            HeaderName::UploadConcat => "Upload-Concat",
        }
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical())
    }
}

impl FromStr for HeaderName {
    type Err = UnknownHeader;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HeaderName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownHeader(s.to_string()))
    }
}
