//! Per-header grammars.
//!
//! Every grammar is anchored at both ends: the whole raw value has to match,
//! and no surrounding whitespace is trimmed. Only `Upload-Metadata` tolerates
//! partial failure, and only at entry granularity.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::GrammarError;

use super::metadata::UploadMetadata;
use super::value::{UploadChecksum, UploadConcat};

/// Standard alphabet; padding optional, non-zero trailing bits accepted.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

const CONCAT_PARTIAL: &str = "partial";
const CONCAT_FINAL_PREFIX: &str = "final;";

/// Exact match against one of the supported protocol versions.
pub(crate) fn parse_version<V: AsRef<str>>(
    raw: &str,
    supported: &[V],
) -> Result<String, GrammarError> {
    if supported.iter().any(|v| v.as_ref() == raw) {
        Ok(raw.to_string())
    } else {
        Err(GrammarError::UnsupportedVersion)
    }
}

/// `0` or a digit string without a leading zero.
pub(crate) fn parse_non_negative(raw: &str) -> Result<u64, GrammarError> {
    let bytes = raw.as_bytes();
    if bytes.is_empty() {
        return Err(GrammarError::Empty);
    }
    if !bytes.iter().all(u8::is_ascii_digit) {
        return Err(GrammarError::NonDigit);
    }
    if bytes.len() > 1 && bytes[0] == b'0' {
        return Err(GrammarError::LeadingZero);
    }
    raw.parse::<u64>().map_err(|_| GrammarError::Overflow)
}

/// The literal `1` and nothing else.
pub(crate) fn parse_defer_length(raw: &str) -> Result<(), GrammarError> {
    if raw == "1" {
        Ok(())
    } else {
        Err(GrammarError::NotDeferFlag)
    }
}

/// Comma-separated `key base64` entries. Malformed entries are dropped.
pub(crate) fn parse_metadata(raw: &str) -> UploadMetadata {
    let mut metadata = UploadMetadata::new();
    for entry in raw.split(',') {
        match parse_metadata_entry(entry) {
            Ok((key, value)) => metadata.insert(key, value),
            Err(reason) => {
                tracing::trace!(entry = %entry, reason = %reason, "Dropping metadata entry");
            }
        }
    }
    metadata
}

fn parse_metadata_entry(entry: &str) -> Result<(&str, Vec<u8>), GrammarError> {
    let (key, value) = entry
        .split_once(' ')
        .ok_or(GrammarError::MissingSeparator)?;
    if key.is_empty() {
        return Err(GrammarError::Empty);
    }
    Ok((key, decode_base64(value)?))
}

/// `algorithm base64` with exactly one separating space.
pub(crate) fn parse_checksum(raw: &str) -> Result<UploadChecksum, GrammarError> {
    let (algorithm, checksum) = raw
        .split_once(' ')
        .ok_or(GrammarError::MissingSeparator)?;
    if algorithm.is_empty() || algorithm.chars().any(char::is_whitespace) {
        return Err(GrammarError::InvalidAlgorithm);
    }
    Ok(UploadChecksum {
        algorithm: algorithm.to_string(),
        checksum: decode_base64(checksum)?,
    })
}

/// `partial`, or `final;` directly followed by single-space separated URLs.
pub(crate) fn parse_concat(raw: &str) -> Result<UploadConcat, GrammarError> {
    if raw == CONCAT_PARTIAL {
        return Ok(UploadConcat::Partial);
    }
    let list = raw
        .strip_prefix(CONCAT_FINAL_PREFIX)
        .ok_or(GrammarError::UnknownConcatType)?;
    let urls = list
        .split(' ')
        .map(|url| {
            if url.is_empty() || url.chars().any(char::is_whitespace) {
                Err(GrammarError::MalformedUrlList)
            } else {
                Ok(url.to_string())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(UploadConcat::Final { urls })
}

/// Alphabet check, then decode the longest decodable prefix.
///
/// Once the alphabet matches this never fails, so `Y` yields no bytes and
/// `YQ==YQ==` yields `a`.
fn decode_base64(raw: &str) -> Result<Vec<u8>, GrammarError> {
    if raw.is_empty() {
        return Err(GrammarError::Empty);
    }
    let in_alphabet = raw
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='));
    if !in_alphabet {
        return Err(GrammarError::NotBase64Alphabet);
    }
    // Decode up to the first `=`, minus a dangling sextet that cannot form a byte.
    let prefix = raw.find('=').map_or(raw, |i| &raw[..i]);
    let usable = match prefix.len() % 4 {
        1 => &prefix[..prefix.len() - 1],
        _ => prefix,
    };
    Ok(LENIENT_BASE64.decode(usable).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;

    const PLAN_B64: &str = "d29ybGRfZG9taW5hdGlvbl9wbGFuLnBkZg==";
    const SHA_B64: &str = "Kq5sNclPz7QV2+lfQIuc6R7oRu0=";

    #[test]
    fn test_version_exact() {
        assert_eq!(parse_version("1.0.0", &["1.0.0"]).unwrap(), "1.0.0");
        assert_eq!(parse_version("0.2.2", &["1.0.0", "0.2.2"]).unwrap(), "0.2.2");
        for raw in ["1.0.1", "1.0", " 1.0.0", "1.0.0 ", ""] {
            assert_eq!(
                parse_version(raw, &["1.0.0"]),
                Err(GrammarError::UnsupportedVersion),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_non_negative_valid() {
        assert_eq!(parse_non_negative("0"), Ok(0));
        assert_eq!(parse_non_negative("1"), Ok(1));
        assert_eq!(parse_non_negative("1000"), Ok(1000));
        assert_eq!(parse_non_negative("18446744073709551615"), Ok(u64::MAX));
    }

    #[test]
    fn test_non_negative_canonical_decimal() {
        for n in [0u64, 7, 10, 1337, 4_294_967_296, u64::MAX - 1] {
            assert_eq!(parse_non_negative(&n.to_string()), Ok(n));
        }
    }

    #[test]
    fn test_non_negative_invalid() {
        assert_eq!(parse_non_negative("01"), Err(GrammarError::LeadingZero));
        assert_eq!(parse_non_negative("00"), Err(GrammarError::LeadingZero));
        assert_eq!(parse_non_negative(""), Err(GrammarError::Empty));
        assert_eq!(parse_non_negative("18446744073709551616"), Err(GrammarError::Overflow));
        for raw in ["-1", "+1", "a", "bcd", "0.2", "-1.2", " 1", "1 ", "1e3"] {
            assert_eq!(parse_non_negative(raw), Err(GrammarError::NonDigit), "{raw:?}");
        }
    }

    #[test]
    fn test_defer_length() {
        assert_eq!(parse_defer_length("1"), Ok(()));
        for raw in ["", "0", "-1", "01", "a", "abc", "1.0", "2", " 1", "1 "] {
            assert_eq!(parse_defer_length(raw), Err(GrammarError::NotDeferFlag), "{raw:?}");
        }
    }

    #[test]
    fn test_metadata_valid() {
        let metadata = parse_metadata(&format!("filename {PLAN_B64}"));
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get_str("filename"), Some("world_domination_plan.pdf"));

        let metadata = parse_metadata(&format!("filename {PLAN_B64},foo YmFy"));
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get_str("filename"), Some("world_domination_plan.pdf"));
        assert_eq!(metadata.get_str("foo"), Some("bar"));
        assert_eq!(metadata.keys().collect::<Vec<_>>(), vec!["filename", "foo"]);
    }

    #[test]
    fn test_metadata_empty() {
        assert!(parse_metadata("").is_empty());
    }

    #[test]
    fn test_metadata_drops_malformed_entries() {
        // stray space after the comma
        let metadata = parse_metadata(&format!("filename {PLAN_B64}, foo YmFy"));
        assert_eq!(metadata.len(), 1);
        assert_eq!(metadata.get_str("filename"), Some("world_domination_plan.pdf"));

        assert!(parse_metadata(&format!("filename {PLAN_B64} foo, YmFy")).is_empty());
        assert!(parse_metadata("filename").is_empty());
        assert!(parse_metadata("file name woot").is_empty());
        assert!(parse_metadata("filename ").is_empty());
        assert!(parse_metadata(",,").is_empty());
    }

    #[test]
    fn test_metadata_duplicate_key_overwrites() {
        let metadata = parse_metadata("foo YmFy,name YQ==,foo YmF6");
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata.get_str("foo"), Some("baz"));
        assert_eq!(metadata.keys().collect::<Vec<_>>(), vec!["foo", "name"]);
    }

    #[test]
    fn test_metadata_entry_errors() {
        assert_eq!(parse_metadata_entry("filename"), Err(GrammarError::MissingSeparator));
        assert_eq!(parse_metadata_entry(" YmFy"), Err(GrammarError::Empty));
        assert_eq!(parse_metadata_entry("a b c"), Err(GrammarError::NotBase64Alphabet));
        assert_eq!(parse_metadata_entry("a Y!Fy"), Err(GrammarError::NotBase64Alphabet));
    }

    #[test]
    fn test_metadata_unpadded_value() {
        let metadata = parse_metadata("name YQ");
        assert_eq!(metadata.get_str("name"), Some("a"));
    }

    #[test]
    fn test_metadata_undecodable_value_kept() {
        let metadata = parse_metadata("k Y");
        assert_eq!(metadata.get("k"), Some(&b""[..]));

        let metadata = parse_metadata("k YQ==YQ==");
        assert_eq!(metadata.get_str("k"), Some("a"));

        let metadata = parse_metadata("a YmFy,b Y,c YQ==YQ==");
        assert_eq!(metadata.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(metadata.get_str("a"), Some("bar"));
        assert_eq!(metadata.get("b"), Some(&b""[..]));
        assert_eq!(metadata.get_str("c"), Some("a"));
    }

    #[test]
    fn test_checksum_valid() {
        let checksum = parse_checksum(&format!("sha {SHA_B64}")).unwrap();
        assert_eq!(checksum.algorithm, "sha");
        assert_eq!(checksum.checksum, BASE64_STANDARD.decode(SHA_B64).unwrap());
        assert_eq!(checksum.checksum.len(), 20);

        let checksum = parse_checksum(&format!("sha, {SHA_B64}")).unwrap();
        assert_eq!(checksum.algorithm, "sha,");
        assert_eq!(checksum.checksum, BASE64_STANDARD.decode(SHA_B64).unwrap());
    }

    #[test]
    fn test_checksum_invalid() {
        assert_eq!(parse_checksum("sha "), Err(GrammarError::Empty));
        assert_eq!(
            parse_checksum(&format!("sha  {SHA_B64}")),
            Err(GrammarError::NotBase64Alphabet)
        );
        assert_eq!(
            parse_checksum(&format!(" sha {SHA_B64}")),
            Err(GrammarError::InvalidAlgorithm)
        );
        assert_eq!(
            parse_checksum(&format!("  {SHA_B64}")),
            Err(GrammarError::InvalidAlgorithm)
        );
        assert_eq!(parse_checksum("sha"), Err(GrammarError::MissingSeparator));
        assert!(parse_checksum(&format!("sha {SHA_B64} ")).is_err());
        assert!(parse_checksum("sha\t1 YmFy").is_err());
    }

    #[test]
    fn test_checksum_decodes_longest_prefix() {
        assert_eq!(parse_checksum("sha Y").unwrap().checksum, Vec::<u8>::new());
        assert_eq!(parse_checksum("sha YmFyY").unwrap().checksum, b"bar");
        assert_eq!(parse_checksum("md5 Ym=Fy").unwrap().checksum, b"b");
        assert_eq!(parse_checksum("md5 =").unwrap().checksum, Vec::<u8>::new());
    }

    #[test]
    fn test_concat_valid() {
        assert_eq!(parse_concat("partial"), Ok(UploadConcat::Partial));
        assert_eq!(
            parse_concat("final;/files/a /files/b"),
            Ok(UploadConcat::Final {
                urls: vec!["/files/a".into(), "/files/b".into()]
            })
        );
        assert_eq!(
            parse_concat("final;https://tus.example.org/files/a"),
            Ok(UploadConcat::Final {
                urls: vec!["https://tus.example.org/files/a".into()]
            })
        );
    }

    #[test]
    fn test_concat_invalid() {
        // Single-space token separation is a local choice, recorded under
        // "Concat URL tokens" in DESIGN.md.
        assert_eq!(parse_concat("nonfinal"), Err(GrammarError::UnknownConcatType));
        assert_eq!(parse_concat("final"), Err(GrammarError::UnknownConcatType));
        assert_eq!(parse_concat("Partial"), Err(GrammarError::UnknownConcatType));
        assert_eq!(parse_concat("partial "), Err(GrammarError::UnknownConcatType));
        for raw in [
            "final;",
            "final; ",
            "final; /files/a /files/b",
            "final;/files/a  /files/b",
            "final;/files/a ",
        ] {
            assert_eq!(parse_concat(raw), Err(GrammarError::MalformedUrlList), "{raw:?}");
        }
    }
}
