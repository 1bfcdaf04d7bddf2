//! Value and parameter encoders.

use base64::{Engine, engine::general_purpose::STANDARD};

use crate::error::{DirInfoError, DirInfoResult};
use crate::rfc::dirinfo::core::{DirDate, DirDateTime, DirTime, Zone};
use crate::rfc::dirinfo::parse::grammar::{is_all_qsafe, is_all_safe};

/// Escapes a TEXT value.
///
/// Backslash, comma and semicolon are backslash-escaped; newlines become `\n`.
#[must_use]
pub fn encode_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());

    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }

    result
}

/// Escapes each item and joins them with `sep`.
#[must_use]
pub fn encode_text_list<S: AsRef<str>>(items: &[S], sep: char) -> String {
    items
        .iter()
        .map(|item| encode_text(item.as_ref()))
        .collect::<Vec<_>>()
        .join(&sep.to_string())
}

/// Encodes a parameter value.
///
/// SAFE-CHAR text is written as is, QSAFE-CHAR text is double-quoted.
///
/// ## Errors
/// Returns `Unencodeable` if the value contains a double quote or a control
/// character.
pub fn encode_param_value(value: &str) -> DirInfoResult<String> {
    if is_all_safe(value) {
        Ok(value.to_string())
    } else if is_all_qsafe(value) {
        Ok(format!("\"{value}\""))
    } else {
        Err(DirInfoError::Unencodeable(format!(
            "param-value {value:?}"
        )))
    }
}

/// Encodes a DATE value as `YYYYMMDD`.
#[must_use]
pub fn encode_date(d: &DirDate) -> String {
    format!("{:04}{:02}{:02}", d.year, d.month, d.day)
}

/// Encodes a TIME value as `HHMMSS[.frac][Z|±HHMM]`.
#[must_use]
pub fn encode_time(t: &DirTime) -> String {
    let mut out = format!("{:02}{:02}{:02}", t.hour, t.minute, t.second);

    if t.nanosecond > 0 {
        let frac = format!("{:09}", t.nanosecond);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }

    match t.zone {
        Some(Zone::Utc) => out.push('Z'),
        Some(Zone::Offset(secs)) => {
            let sign = if secs < 0 { '-' } else { '+' };
            let abs = secs.unsigned_abs();
            out.push_str(&format!("{sign}{:02}{:02}", abs / 3600, abs % 3600 / 60));
        }
        None => {}
    }

    out
}

/// Encodes a DATE-TIME value as `YYYYMMDDTHHMMSS[...]`.
#[must_use]
pub fn encode_date_time(dt: &DirDateTime) -> String {
    format!("{}T{}", encode_date(&dt.date), encode_time(&dt.time))
}

/// Encodes bytes as single-line base64.
#[must_use]
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Encodes bytes as quoted-printable, without soft line breaks.
///
/// Printable ASCII other than `=` is written literally; spaces and tabs are
/// literal except at the end of the value.
#[must_use]
pub fn encode_quoted_printable(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());

    for (i, &b) in bytes.iter().enumerate() {
        let last = i + 1 == bytes.len();
        let literal = match b {
            b'=' => false,
            b' ' | b'\t' => !last,
            33..=126 => true,
            _ => false,
        };
        if literal {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("={b:02X}"));
        }
    }

    out
}
