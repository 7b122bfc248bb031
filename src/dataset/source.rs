//! Data sources and text decoding
//!
//! A dataset comes either from a local path or from an HTTP(S) URL. The raw
//! bytes are decoded by trying each configured encoding in order; the first
//! one that decodes without malformed sequences wins.

use super::error::{DatasetError, DatasetResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Encodings tried when none are configured: UTF-8, then the Korean legacy
/// encoding (encoding_rs resolves `euc-kr` to windows-949)
pub const DEFAULT_ENCODINGS: &[&str] = &["utf-8", "euc-kr"];

/// Where a dataset is read from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// File on the local filesystem
    Local(PathBuf),
    /// HTTP or HTTPS URL
    Url(String),
}

impl DataSource {
    /// Classify a location string: `http://` and `https://` are URLs,
    /// everything else is a path
    pub fn parse(location: &str) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(trimmed.to_string())
        } else {
            DataSource::Local(PathBuf::from(trimmed))
        }
    }

    /// Source identity: the path or URL string. Used as the cache key.
    pub fn identity(&self) -> String {
        match self {
            DataSource::Local(path) => path.to_string_lossy().into_owned(),
            DataSource::Url(url) => url.clone(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, DataSource::Url(_))
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Local(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Decode bytes with the first encoding (by label) that accepts them
///
/// Returns the text and the canonical name of the encoding that worked.
/// A leading byte-order mark is stripped. Unknown labels are skipped.
pub fn decode_with_fallback<S: AsRef<str>>(
    bytes: &[u8],
    labels: &[S],
    location: &str,
) -> DatasetResult<(String, &'static str)> {
    let mut attempted = Vec::new();

    for label in labels {
        let label = label.as_ref();
        let Some(encoding) = encoding_rs::Encoding::for_label(label.trim().as_bytes()) else {
            tracing::warn!("Unknown encoding label '{}', skipping", label);
            continue;
        };

        attempted.push(encoding.name().to_string());

        let payload = strip_bom(bytes, encoding);
        match encoding.decode_without_bom_handling_and_without_replacement(payload) {
            Some(text) => {
                tracing::debug!("Decoded {} as {}", location, encoding.name());
                return Ok((text.into_owned(), encoding.name()));
            }
            None => {
                tracing::debug!("{} is not valid {}", location, encoding.name());
            }
        }
    }

    Err(DatasetError::EncodingFailure {
        location: location.to_string(),
        attempted,
    })
}

fn strip_bom<'a>(bytes: &'a [u8], encoding: &'static encoding_rs::Encoding) -> &'a [u8] {
    match encoding_rs::Encoding::for_bom(bytes) {
        Some((bom_encoding, len)) if bom_encoding == encoding => &bytes[len..],
        _ => bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        assert_eq!(
            DataSource::parse("https://example.com/menu.csv"),
            DataSource::Url("https://example.com/menu.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("HTTP://example.com/a.csv"),
            DataSource::Url("HTTP://example.com/a.csv".to_string())
        );
        assert_eq!(
            DataSource::parse("data/menu.csv"),
            DataSource::Local(PathBuf::from("data/menu.csv"))
        );
    }

    #[test]
    fn test_identity_is_location_string() {
        let local = DataSource::parse("./menu.csv");
        let remote = DataSource::parse("https://example.com/menu.csv");
        assert_eq!(local.identity(), "./menu.csv");
        assert_eq!(remote.identity(), "https://example.com/menu.csv");
        assert!(remote.is_remote());
        assert!(!local.is_remote());
    }

    #[test]
    fn test_decode_utf8_first() {
        let (text, name) = decode_with_fallback("식이구분".as_bytes(), DEFAULT_ENCODINGS, "t").unwrap();
        assert_eq!(text, "식이구분");
        assert_eq!(name, "UTF-8");
    }

    #[test]
    fn test_decode_strips_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("날짜,조식".as_bytes());
        let (text, _) = decode_with_fallback(&bytes, DEFAULT_ENCODINGS, "t").unwrap();
        assert_eq!(text, "날짜,조식");
    }

    #[test]
    fn test_decode_falls_back_to_euc_kr() {
        let (bytes, _, had_errors) = encoding_rs::EUC_KR.encode("쌀밥+된장국");
        assert!(!had_errors);

        let (text, name) = decode_with_fallback(&bytes, DEFAULT_ENCODINGS, "t").unwrap();
        assert_eq!(text, "쌀밥+된장국");
        assert_eq!(name, "EUC-KR");
    }

    #[test]
    fn test_default_chain_exhausted() {
        // 0x80 and 0xFF are invalid in UTF-8 and are never EUC-KR lead bytes
        let bytes = [b'a', 0x80, b',', 0xFF];
        let err = decode_with_fallback(&bytes, DEFAULT_ENCODINGS, "legacy.csv").unwrap_err();
        match err {
            DatasetError::EncodingFailure { location, attempted } => {
                assert_eq!(location, "legacy.csv");
                assert_eq!(attempted, vec!["UTF-8".to_string(), "EUC-KR".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_decode_failure_lists_attempts() {
        let bytes = [0xFF, 0xFE, 0xFD, 0x80];
        let err = decode_with_fallback(&bytes, &["utf-8", "no-such-encoding"], "blob").unwrap_err();
        match err {
            DatasetError::EncodingFailure { location, attempted } => {
                assert_eq!(location, "blob");
                assert_eq!(attempted, vec!["UTF-8".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
