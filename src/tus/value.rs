//! Typed values decoded from tus headers.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::header_name::HeaderName;
use super::metadata::UploadMetadata;

/// Decoded `Upload-Checksum`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadChecksum {
    /// Algorithm token, verbatim.
    pub algorithm: String,
    /// Raw digest bytes.
    pub checksum: Vec<u8>,
}

impl Serialize for UploadChecksum {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("algorithm", &self.algorithm)?;
        map.serialize_entry("checksum", &BASE64_STANDARD.encode(&self.checksum))?;
        map.end()
    }
}

/// Decoded `Upload-Concat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadConcat {
    /// This upload is one part of a later concatenation.
    Partial,
    /// This upload is the concatenation of the listed partial uploads.
    Final { urls: Vec<String> },
}

impl Serialize for UploadConcat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UploadConcat::Partial => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("partial", &true)?;
                map.end()
            }
            UploadConcat::Final { urls } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("final", &true)?;
                map.serialize_entry("urls", urls)?;
                map.end()
            }
        }
    }
}

/// A successfully decoded header value, one variant per [`HeaderName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TusHeaderValue {
    TusResumable(String),
    UploadOffset(u64),
    /// Presence flag; the only accepted wire value is `1`.
    UploadDeferLength,
    UploadLength(u64),
    UploadMetadata(UploadMetadata),
    UploadChecksum(UploadChecksum),
    UploadConcat(UploadConcat),
}

impl TusHeaderValue {
    /// Numeric value of the defer-length flag.
    pub const DEFER_LENGTH: u8 = 1;

    /// Header this value was decoded from.
    pub fn header(&self) -> HeaderName {
        match self {
            TusHeaderValue::TusResumable(_) => HeaderName::TusResumable,
            TusHeaderValue::UploadOffset(_) => HeaderName::UploadOffset,
            TusHeaderValue::UploadDeferLength => HeaderName::UploadDeferLength,
            TusHeaderValue::UploadLength(_) => HeaderName::UploadLength,
            TusHeaderValue::UploadMetadata(_) => HeaderName::UploadMetadata,
            TusHeaderValue::UploadChecksum(_) => HeaderName::UploadChecksum,
            TusHeaderValue::UploadConcat(_) => HeaderName::UploadConcat,
        }
    }
}

impl Serialize for TusHeaderValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TusHeaderValue::TusResumable(version) => serializer.serialize_str(version),
            TusHeaderValue::UploadOffset(n) | TusHeaderValue::UploadLength(n) => {
                serializer.serialize_u64(*n)
            }
            TusHeaderValue::UploadDeferLength => serializer.serialize_u8(Self::DEFER_LENGTH),
            TusHeaderValue::UploadMetadata(metadata) => metadata.serialize(serializer),
            TusHeaderValue::UploadChecksum(checksum) => checksum.serialize(serializer),
            TusHeaderValue::UploadConcat(concat) => concat.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_of_value() {
        assert_eq!(TusHeaderValue::UploadDeferLength.header(), HeaderName::UploadDeferLength);
        assert_eq!(TusHeaderValue::UploadLength(3).header(), HeaderName::UploadLength);
        assert_eq!(
            TusHeaderValue::UploadConcat(UploadConcat::Partial).header(),
            HeaderName::UploadConcat
        );
    }

    #[test]
    fn test_json_shapes() {
        assert_eq!(serde_json::to_value(TusHeaderValue::UploadDeferLength).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(TusHeaderValue::UploadOffset(1000)).unwrap(), json!(1000));
        assert_eq!(
            serde_json::to_value(TusHeaderValue::TusResumable("1.0.0".into())).unwrap(),
            json!("1.0.0")
        );
        assert_eq!(
            serde_json::to_value(UploadConcat::Partial).unwrap(),
            json!({ "partial": true })
        );
        assert_eq!(
            serde_json::to_value(UploadConcat::Final { urls: vec!["/files/a".into()] }).unwrap(),
            json!({ "final": true, "urls": ["/files/a"] })
        );
        let checksum = UploadChecksum {
            algorithm: "sha1".into(),
            checksum: b"bar".to_vec(),
        };
        assert_eq!(
            serde_json::to_value(checksum).unwrap(),
            json!({ "algorithm": "sha1", "checksum": "YmFy" })
        );
    }
}
