//! Character encoding detection and transcoding.
//!
//! Scraped HTML is often mis-declared or not declared at all. The loader
//! uses the helpers here to honor a `<meta charset>` declaration when it is
//! usable and to fall back to a single-byte Western decoding otherwise.

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, WINDOWS_1252};
use regex::Regex;

/// Number of leading bytes inspected for a charset declaration.
pub const SNIFF_LIMIT: usize = 1024;

/// Match `charset=` inside a meta tag, covering both `<meta charset="...">`
/// and `<meta http-equiv="Content-Type" content="text/html; charset=...">`.
static CHARSET_META_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<meta[^>]+charset=["']?([\w-]+)"#).unwrap());

/// Finds the charset declared in the first [`SNIFF_LIMIT`] bytes.
///
/// The head is read as ASCII, dropping every other byte, and lowercased
/// before matching, so the result is always a lowercase label.
///
/// # Example
///
/// ```rust
/// use scrape_core::encoding::sniff_charset;
///
/// let html = br#"<html><head><META CHARSET="ISO-8859-1"></head></html>"#;
/// assert_eq!(sniff_charset(html), Some("iso-8859-1".to_string()));
/// ```
pub fn sniff_charset(bytes: &[u8]) -> Option<String> {
    let head: String = bytes[..bytes.len().min(SNIFF_LIMIT)]
        .iter()
        .filter(|b| b.is_ascii())
        .map(|&b| char::from(b).to_ascii_lowercase())
        .collect();

    CHARSET_META_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Decodes `bytes` with the encoding named by `label`.
///
/// Returns `None` when the label is unknown or the bytes are not valid in
/// that encoding; no replacement characters are ever produced. A UTF-16
/// label inside an ASCII-compatible document is treated as UTF-8.
pub fn decode_with_label<'a>(bytes: &'a [u8], label: &str) -> Option<Cow<'a, str>> {
    let encoding = Encoding::for_label(label.as_bytes())?.output_encoding();
    encoding.decode_without_bom_handling_and_without_replacement(strip_utf8_bom(bytes))
}

/// Decodes `bytes` as strict UTF-8, skipping a leading byte order mark.
pub fn decode_utf8(bytes: &[u8]) -> Option<&str> {
    std::str::from_utf8(strip_utf8_bom(bytes)).ok()
}

/// Decodes `bytes` as windows-1252, the Latin-1 superset browsers use for
/// `iso-8859-1`. Every byte maps to a character, so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> Cow<'_, str> {
    let (decoded, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    decoded
}

fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_meta_charset() {
        let html = br#"<html><head><meta charset="utf-8"></head><body>Test</body></html>"#;
        assert_eq!(sniff_charset(html), Some("utf-8".to_string()));
    }

    #[test]
    fn sniff_content_type_charset() {
        let html = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        assert_eq!(sniff_charset(html), Some("iso-8859-1".to_string()));
    }

    #[test]
    fn sniff_unquoted_charset() {
        assert_eq!(sniff_charset(b"<meta charset=windows-1252>"), Some("windows-1252".to_string()));
    }

    #[test]
    fn sniff_ignores_non_ascii_bytes() {
        let html = b"<meta \xff\xfecharset='koi8-r'>";
        assert_eq!(sniff_charset(html), Some("koi8-r".to_string()));
    }

    #[test]
    fn sniff_only_reads_head() {
        let mut html = vec![b' '; SNIFF_LIMIT];
        html.extend_from_slice(br#"<meta charset="utf-8">"#);
        assert_eq!(sniff_charset(&html), None);
    }

    #[test]
    fn sniff_requires_meta_tag() {
        assert_eq!(sniff_charset(b"<p>charset=utf-8</p>"), None);
    }

    #[test]
    fn decode_iso88591_label() {
        let decoded = decode_with_label(b"Caf\xE9", "iso-8859-1").unwrap();
        assert_eq!(decoded, "Café");
    }

    #[test]
    fn decode_windows1252_smart_quotes() {
        let decoded = decode_with_label(b"\x93Hello\x94", "windows-1252").unwrap();
        assert_eq!(decoded, "\u{201C}Hello\u{201D}");
    }

    #[test]
    fn decode_rejects_malformed_bytes() {
        assert!(decode_with_label(b"Caf\xE9", "utf-8").is_none());
    }

    #[test]
    fn decode_rejects_unknown_label() {
        assert!(decode_with_label(b"plain", "no-such-charset").is_none());
    }

    #[test]
    fn decode_utf16_label_as_utf8() {
        let decoded = decode_with_label("é".as_bytes(), "utf-16").unwrap();
        assert_eq!(decoded, "é");
    }

    #[test]
    fn decode_utf8_strips_bom() {
        assert_eq!(decode_utf8(b"\xEF\xBB\xBF<p>"), Some("<p>"));
        assert_eq!(decode_utf8(b"\xFF<p>"), None);
    }

    #[test]
    fn latin1_never_fails() {
        let bytes: Vec<u8> = (0..=255).collect();
        assert_eq!(decode_latin1(&bytes).chars().count(), 256);
    }
}
