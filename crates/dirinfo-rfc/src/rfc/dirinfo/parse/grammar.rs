//! Token-level recognizers for the RFC 2425 grammar.
//!
//! Character classes follow RFC 2425 §5.8.2:
//!
//! ```text
//! name       = 1*(ALPHA / DIGIT / "-")
//! SAFE-CHAR  = WSP / %x21 / %x23-2B / %x2D-39 / %x3C-7E / NON-ASCII
//! QSAFE-CHAR = WSP / %x21 / %x23-7E / NON-ASCII
//! ```
//!
//! Value shapes follow RFC 2425 §5.8.4 (with the basic and extended ISO 8601
//! forms accepted for dates and times).

use super::error::{GrammarError, GrammarErrorKind, GrammarResult};
use crate::rfc::dirinfo::core::{DirDate, DirDateTime, DirTime, Zone};

/// Returns whether `c` may appear in a group, property or parameter name.
#[must_use]
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

/// Returns whether `c` may appear in an unquoted parameter value.
#[must_use]
pub fn is_safe_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '!' | '#'..='+' | '-'..='9' | '<'..='~') || !c.is_ascii()
}

/// Returns whether `c` may appear inside a quoted parameter value.
#[must_use]
pub fn is_qsafe_char(c: char) -> bool {
    matches!(c, ' ' | '\t' | '!' | '#'..='~') || !c.is_ascii()
}

/// Returns whether every character of `s` is a SAFE-CHAR.
#[must_use]
pub fn is_all_safe(s: &str) -> bool {
    s.chars().all(is_safe_char)
}

/// Returns whether every character of `s` is a QSAFE-CHAR.
#[must_use]
pub fn is_all_qsafe(s: &str) -> bool {
    s.chars().all(is_qsafe_char)
}

/// Byte scanner used by the value matchers.
struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            bytes: s.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes exactly `n` ASCII digits.
    fn digits(&mut self, n: usize) -> Option<u32> {
        let end = self.pos + n;
        let slice = self.bytes.get(self.pos..end)?;
        if !slice.iter().all(u8::is_ascii_digit) {
            return None;
        }
        self.pos = end;
        Some(
            slice
                .iter()
                .fold(0, |acc, b| acc * 10 + u32::from(b - b'0')),
        )
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }
}

/// Matches a DATE value: `YYYY[-]MM[-]DD`.
///
/// ## Errors
/// Returns `InvalidDate` if the text is not a date or a component is out of
/// range.
pub fn match_date(s: &str) -> GrammarResult<DirDate> {
    let s = s.trim();
    let mut sc = Scanner::new(s);
    let date = scan_date(&mut sc)
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::InvalidDate, sc.pos, s))?;

    if !sc.at_end() {
        return Err(GrammarError::new(
            GrammarErrorKind::InvalidDate,
            sc.pos,
            format!("trailing text in date {s:?}"),
        ));
    }

    Ok(date)
}

/// Matches a TIME value: `HH[:]MM[:]SS[.frac][Z|±HH[:]MM]`.
///
/// ## Errors
/// Returns `InvalidTime` if the text is not a time or a component is out of
/// range.
pub fn match_time(s: &str) -> GrammarResult<DirTime> {
    let s = s.trim();
    let mut sc = Scanner::new(s);
    let time = scan_time(&mut sc)
        .ok_or_else(|| GrammarError::new(GrammarErrorKind::InvalidTime, sc.pos, s))?;

    if !sc.at_end() {
        return Err(GrammarError::new(
            GrammarErrorKind::InvalidTime,
            sc.pos,
            format!("trailing text in time {s:?}"),
        ));
    }

    Ok(time)
}

/// Matches a DATE-TIME value: `date "T" time`.
///
/// ## Errors
/// Returns `InvalidDateTime` if either half does not match.
pub fn match_date_time(s: &str) -> GrammarResult<DirDateTime> {
    let s = s.trim();
    let mut sc = Scanner::new(s);
    let invalid = |pos| GrammarError::new(GrammarErrorKind::InvalidDateTime, pos, s);

    let date = scan_date(&mut sc).ok_or_else(|| invalid(sc.pos))?;
    if !sc.eat(b'T') {
        return Err(invalid(sc.pos));
    }
    let time = scan_time(&mut sc).ok_or_else(|| invalid(sc.pos))?;
    if !sc.at_end() {
        return Err(invalid(sc.pos));
    }

    Ok(DirDateTime::new(date, time))
}

/// Matches an INTEGER value: `["+" / "-"] 1*DIGIT`.
///
/// ## Errors
/// Returns `InvalidInteger` if the text is not an integer or overflows `i64`.
pub fn match_integer(s: &str) -> GrammarResult<i64> {
    let s = s.trim();
    let digits = s.strip_prefix(['+', '-']).unwrap_or(s);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GrammarError::new(
            GrammarErrorKind::InvalidInteger,
            0,
            format!("integer not valid ({s})"),
        ));
    }

    s.trim_start_matches('+').parse().map_err(|e| {
        GrammarError::new(
            GrammarErrorKind::InvalidInteger,
            0,
            format!("integer not valid ({s}): {e}"),
        )
    })
}

fn scan_date(sc: &mut Scanner<'_>) -> Option<DirDate> {
    let year = sc.digits(4)?;
    sc.eat(b'-');
    let month = sc.digits(2)?;
    sc.eat(b'-');
    let day = sc.digits(2)?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    Some(DirDate::new(i32::try_from(year).ok()?, month, day))
}

fn scan_time(sc: &mut Scanner<'_>) -> Option<DirTime> {
    let hour = sc.digits(2)?;
    sc.eat(b':');
    let minute = sc.digits(2)?;
    sc.eat(b':');
    let second = sc.digits(2)?;

    // Allow 60 for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return None;
    }

    let nanosecond = if sc.eat(b'.') {
        scan_fraction(sc)?
    } else {
        0
    };

    let zone = match sc.peek() {
        Some(b'Z') => {
            sc.pos += 1;
            Some(Zone::Utc)
        }
        Some(sign @ (b'+' | b'-')) => {
            sc.pos += 1;
            let hh = sc.digits(2)?;
            sc.eat(b':');
            let mm = sc.digits(2)?;
            if hh > 23 || mm > 59 {
                return None;
            }
            let secs = i32::try_from(hh * 3600 + mm * 60).ok()?;
            Some(Zone::Offset(if sign == b'-' { -secs } else { secs }))
        }
        _ => None,
    };

    Some(DirTime {
        hour,
        minute,
        second,
        nanosecond,
        zone,
    })
}

/// Scans `1*DIGIT` after the decimal point, as nanoseconds.
fn scan_fraction(sc: &mut Scanner<'_>) -> Option<u32> {
    let start = sc.pos;
    while sc.peek().is_some_and(|b| b.is_ascii_digit()) {
        sc.pos += 1;
    }
    let frac = &sc.bytes[start..sc.pos];
    if frac.is_empty() {
        return None;
    }

    let mut nanos = 0;
    for i in 0..9 {
        let digit = frac.get(i).map_or(0, |b| u32::from(b - b'0'));
        nanos = nanos * 10 + digit;
    }
    Some(nanos)
}
