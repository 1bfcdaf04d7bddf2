//! Value decoders (RFC 2425 §5.8.4).

use base64::{Engine, engine::general_purpose::STANDARD};

use super::grammar::{match_date, match_date_time, match_time};
use crate::error::{DirInfoError, DirInfoResult};
use crate::rfc::dirinfo::core::{DirDate, DirDateTime, DirTime};

/// Unescapes a TEXT value.
///
/// Escapes: `\n`, `\N` (newline), `\\`, `\,`, `\;`. Any other escaped
/// character stands for itself, and a trailing lone backslash is kept.
#[must_use]
pub fn decode_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(other) => result.push(other),
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits a value on unescaped `sep` characters.
///
/// Escape sequences are kept intact inside each item, and empty items are
/// skipped.
#[must_use]
pub fn decode_list(value: &str, sep: char) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in value.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == sep {
            if i > start {
                items.push(&value[start..i]);
            }
            start = i + c.len_utf8();
        }
    }

    if start < value.len() {
        items.push(&value[start..]);
    }

    items
}

/// Splits a value on unescaped `sep` characters and unescapes each item.
#[must_use]
pub fn decode_text_list(value: &str, sep: char) -> Vec<String> {
    decode_list(value, sep)
        .into_iter()
        .map(decode_text)
        .collect()
}

/// Decodes a comma-separated list of DATE values.
///
/// ## Errors
/// Returns `InvalidEncoding` if any item is not a date.
pub fn decode_date_list(value: &str) -> DirInfoResult<Vec<DirDate>> {
    decode_trimmed_items(value)
        .map(|item| match_date(item).map_err(|e| e.in_text(item)))
        .collect()
}

/// Decodes a comma-separated list of DATE-TIME values.
///
/// ## Errors
/// Returns `InvalidEncoding` if any item is not a date-time.
pub fn decode_date_time_list(value: &str) -> DirInfoResult<Vec<DirDateTime>> {
    decode_trimmed_items(value)
        .map(|item| match_date_time(item).map_err(|e| e.in_text(item)))
        .collect()
}

/// Decodes a comma-separated list of TIME values.
///
/// ## Errors
/// Returns `InvalidEncoding` if any item is not a time.
pub fn decode_time_list(value: &str) -> DirInfoResult<Vec<DirTime>> {
    decode_trimmed_items(value)
        .map(|item| match_time(item).map_err(|e| e.in_text(item)))
        .collect()
}

fn decode_trimmed_items(value: &str) -> impl Iterator<Item = &str> {
    decode_list(value, ',')
        .into_iter()
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Decodes a base64 payload.
///
/// Spaces are stripped first: some producers indent base64 continuation
/// lines with two spaces, and unfolding only removes one of them.
///
/// ## Errors
/// Returns `InvalidEncoding` if the payload is not valid base64.
pub fn decode_base64(value: &str) -> DirInfoResult<Vec<u8>> {
    let compact: String = value.chars().filter(|c| *c != ' ').collect();
    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| DirInfoError::InvalidEncoding(format!("invalid base64 encoding: {e}")))
}

/// Decodes a quoted-printable payload (RFC 2045 §6.7).
///
/// Soft line breaks (`=` before a line end, or at the very end) are
/// removed. Malformed `=` sequences are kept literally.
#[must_use]
pub fn decode_quoted_printable(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'=' {
            result.push(b);
            i += 1;
            continue;
        }

        match (bytes.get(i + 1), bytes.get(i + 2)) {
            // Soft line break
            (None, _) | (Some(b'\n'), _) => i += 2,
            (Some(b'\r'), Some(b'\n')) => i += 3,
            (Some(&hi), Some(&lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                result.push((hex_value(hi) << 4) | hex_value(lo));
                i += 3;
            }
            _ => {
                result.push(b);
                i += 1;
            }
        }
    }

    result
}

fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_text_escapes() {
        assert_eq!(decode_text("Item1\\, Item2"), "Item1, Item2");
        assert_eq!(decode_text("a\\;b"), "a;b");
        assert_eq!(decode_text("line1\\nline2\\Nline3"), "line1\nline2\nline3");
        assert_eq!(decode_text("back\\\\slash"), "back\\slash");
    }

    #[test]
    fn decode_text_unknown_and_trailing_escape() {
        assert_eq!(decode_text("a\\:b"), "a:b");
        assert_eq!(decode_text("ends\\"), "ends\\");
    }

    #[test]
    fn decode_list_respects_escapes() {
        assert_eq!(decode_list("a,b\\,c,d", ','), vec!["a", "b\\,c", "d"]);
        assert_eq!(decode_list("a;;b", ';'), vec!["a", "b"]);
        assert!(decode_list("", ',').is_empty());
    }

    #[test]
    fn decode_text_list_unescapes_items() {
        assert_eq!(
            decode_text_list("work\\, home,cell", ','),
            vec!["work, home", "cell"]
        );
    }

    #[test]
    fn date_lists() {
        let dates = decode_date_list("19961022, 1997-01-02").unwrap();
        assert_eq!(dates, vec![DirDate::new(1996, 10, 22), DirDate::new(1997, 1, 2)]);

        let err = decode_date_list("19961022,nope").unwrap_err();
        assert!(matches!(err, DirInfoError::InvalidEncoding(_)));
    }

    #[test]
    fn date_time_list_is_all_or_nothing() {
        assert_eq!(decode_date_time_list("19961022T140000,19961023T150000Z").unwrap().len(), 2);
        assert!(decode_date_time_list("19961022T140000,19961023").is_err());
    }

    #[test]
    fn time_list() {
        let times = decode_time_list("090000,173000Z").unwrap();
        assert_eq!(times.len(), 2);
        assert!(times[1].is_utc());
    }

    #[test]
    fn base64_tolerates_spaces() {
        assert_eq!(decode_base64("SGVsbG8g V29y bGQ=").unwrap(), b"Hello World");
        assert!(decode_base64("not base64!").is_err());
    }

    #[test]
    fn quoted_printable() {
        assert_eq!(decode_quoted_printable("caf=C3=A9"), "café".as_bytes());
        assert_eq!(decode_quoted_printable("soft=\r\nbreak"), b"softbreak");
        assert_eq!(decode_quoted_printable("soft=\nbreak="), b"softbreak");
        assert_eq!(decode_quoted_printable("a=3db"), b"a=b");
        assert_eq!(decode_quoted_printable("bad=zz"), b"bad=zz");
    }
}
