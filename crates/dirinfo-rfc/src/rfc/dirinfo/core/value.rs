//! Directory-information value types (RFC 2425 §5.8.4).

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};

use crate::error::{DirInfoError, DirInfoResult};
use crate::rfc::dirinfo::build::{
    encode_base64, encode_date, encode_date_time, encode_text, encode_time,
};

/// A calendar date as written in a DATE value (`YYYYMMDD`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DirDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DirDate {
    #[must_use]
    pub const fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Converts to a chrono date, if the day exists in the calendar.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for DirDate {
    fn from(d: NaiveDate) -> Self {
        Self::new(d.year(), d.month(), d.day())
    }
}

/// Time zone designator of a TIME value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// `Z` suffix.
    Utc,
    /// Numeric `±HHMM` offset, in seconds east of UTC.
    Offset(i32),
}

impl Zone {
    /// Offset from UTC in seconds.
    #[must_use]
    pub const fn offset_seconds(self) -> i32 {
        match self {
            Self::Utc => 0,
            Self::Offset(secs) => secs,
        }
    }
}

/// A time of day as written in a TIME value (`HHMMSS[.frac][zone]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// Fractional second, in nanoseconds.
    pub nanosecond: u32,
    /// `None` for floating (local) time.
    pub zone: Option<Zone>,
}

impl DirTime {
    #[must_use]
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond: 0,
            zone: None,
        }
    }

    #[must_use]
    pub const fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = Some(zone);
        self
    }

    #[must_use]
    pub const fn is_utc(&self) -> bool {
        matches!(self.zone, Some(Zone::Utc))
    }

    /// Converts to a chrono time, ignoring the zone.
    ///
    /// A leap second (`60`) maps onto chrono's leap-second representation.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveTime> {
        if self.second == 60 {
            return NaiveTime::from_hms_nano_opt(
                self.hour,
                self.minute,
                59,
                1_000_000_000 + self.nanosecond,
            );
        }
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanosecond)
    }
}

impl From<NaiveTime> for DirTime {
    fn from(t: NaiveTime) -> Self {
        Self {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second(),
            nanosecond: t.nanosecond(),
            zone: None,
        }
    }
}

/// A DATE-TIME value (`date "T" time`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirDateTime {
    pub date: DirDate,
    pub time: DirTime,
}

impl DirDateTime {
    #[must_use]
    pub const fn new(date: DirDate, time: DirTime) -> Self {
        Self { date, time }
    }

    /// Midnight UTC on the given date.
    #[must_use]
    pub const fn start_of_day(date: DirDate) -> Self {
        Self {
            date,
            time: DirTime::new(0, 0, 0).with_zone(Zone::Utc),
        }
    }

    /// Returns `[year, month, day, hour, minute, second]`.
    #[must_use]
    pub fn components(&self) -> [i64; 6] {
        [
            i64::from(self.date.year),
            i64::from(self.date.month),
            i64::from(self.date.day),
            i64::from(self.time.hour),
            i64::from(self.time.minute),
            i64::from(self.time.second),
        ]
    }

    /// Converts to a chrono date-time, ignoring the zone.
    #[must_use]
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        Some(self.date.to_naive()?.and_time(self.time.to_naive()?))
    }

    /// Converts to a zoned chrono date-time. Floating times have no offset
    /// and return `None`.
    #[must_use]
    pub fn to_fixed_offset(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(self.time.zone?.offset_seconds())?;
        self.to_naive()?.and_local_timezone(offset).single()
    }
}

impl From<NaiveDateTime> for DirDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        Self::new(dt.date().into(), dt.time().into())
    }
}

impl From<DateTime<Utc>> for DirDateTime {
    fn from(dt: DateTime<Utc>) -> Self {
        let naive = dt.naive_utc();
        Self::new(naive.date().into(), DirTime::from(naive.time()).with_zone(Zone::Utc))
    }
}

/// A value to embed in a content line.
///
/// Each variant selects how the value is rendered into line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// TEXT, escaped on output.
    Text(String),
    /// Pre-encoded text, embedded verbatim.
    Raw(String),
    /// Binary payload, transfer-encoded on output.
    Binary(Vec<u8>),
    Integer(i64),
    Date(DirDate),
    DateTime(DirDateTime),
    Time(DirTime),
    /// Comma-separated list of values.
    List(Vec<FieldValue>),
    /// Semicolon-separated structured value (N, ADR, ...).
    Structured(Vec<FieldValue>),
}

impl FieldValue {
    /// Renders the value as content-line value text.
    ///
    /// Binary payloads render as base64.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => encode_text(s),
            Self::Raw(s) => s.clone(),
            Self::Binary(bytes) => encode_base64(bytes),
            Self::Integer(i) => i.to_string(),
            Self::Date(d) => encode_date(d),
            Self::DateTime(dt) => encode_date_time(dt),
            Self::Time(t) => encode_time(t),
            Self::List(values) => join_rendered(values, ","),
            Self::Structured(values) => join_rendered(values, ";"),
        }
    }

    /// Bytes to feed a transfer encoding.
    ///
    /// Text contributes its unescaped content; other kinds their rendering.
    #[must_use]
    pub fn payload_bytes(&self) -> Vec<u8> {
        match self {
            Self::Binary(bytes) => bytes.clone(),
            Self::Text(s) => s.as_bytes().to_vec(),
            other => other.render().into_bytes(),
        }
    }

    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    /// Builds a list of text values.
    #[must_use]
    pub fn text_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(|s| Self::Text(s.into())).collect())
    }
}

fn join_rendered(values: &[FieldValue], sep: &str) -> String {
    values
        .iter()
        .map(FieldValue::render)
        .collect::<Vec<_>>()
        .join(sep)
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

impl From<&[u8]> for FieldValue {
    fn from(bytes: &[u8]) -> Self {
        Self::Binary(bytes.to_vec())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<DirDate> for FieldValue {
    fn from(d: DirDate) -> Self {
        Self::Date(d)
    }
}

impl From<DirDateTime> for FieldValue {
    fn from(dt: DirDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<DirTime> for FieldValue {
    fn from(t: DirTime) -> Self {
        Self::Time(t)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(d: NaiveDate) -> Self {
        Self::Date(d.into())
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt.into())
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt.into())
    }
}

/// Transfer encoding selected by the ENCODING parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// No parameter, `7BIT` or `8BIT`.
    Raw,
    /// `B` or `BASE64`.
    Base64,
    /// `QUOTED-PRINTABLE`.
    QuotedPrintable,
}

impl TransferEncoding {
    /// Resolves an (upper- or mixed-case) ENCODING parameter value.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` for unrecognized encodings.
    pub fn from_param(value: Option<&str>) -> DirInfoResult<Self> {
        let Some(value) = value else {
            return Ok(Self::Raw);
        };

        match value.to_ascii_uppercase().as_str() {
            "7BIT" | "8BIT" => Ok(Self::Raw),
            "B" | "BASE64" => Ok(Self::Base64),
            "QUOTED-PRINTABLE" => Ok(Self::QuotedPrintable),
            other => Err(DirInfoError::InvalidEncoding(format!(
                "unrecognized encoding ({other})"
            ))),
        }
    }
}
