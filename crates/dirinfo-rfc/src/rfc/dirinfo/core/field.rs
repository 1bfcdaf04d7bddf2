//! Decoded content lines (RFC 2425 §5.8.2).

use std::fmt;

use dirinfo_core::config::{DecodeConfig, EncodeConfig};

use super::parameter::{Params, names, values};
use super::value::{DirDate, DirDateTime, DirTime, FieldValue, TransferEncoding};
use crate::error::{DirInfoError, DirInfoResult};
use crate::rfc::dirinfo::build::{encode_base64, encode_line, encode_quoted_printable, fold};
use crate::rfc::dirinfo::parse::grammar::match_integer;
use crate::rfc::dirinfo::parse::{
    ContentLine, decode_base64, decode_date_list, decode_date_time_list, decode_quoted_printable,
    decode_text, decode_text_list, decode_time_list, parse_content_line,
};

/// One decoded content line.
///
/// The parsed components and the line text always agree: fields are only
/// produced by decoding a line, and every mutation rebuilds the line and
/// re-decodes it before replacing the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    line: String,
    group: Option<String>,
    name: String,
    params: Params,
    /// `None` for a line that did not match the grammar.
    value: Option<String>,
}

impl Field {
    /// Decodes one unfolded line, failing on grammar mismatches.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if the line is not a content line.
    pub fn decode(line: &str) -> DirInfoResult<Self> {
        Self::decode_with(line, &DecodeConfig::strict())
    }

    /// Decodes one unfolded line under the given policy.
    ///
    /// One trailing CRLF or LF terminator is ignored, so the output of
    /// [`Field::encode`] with no folding decodes directly. With
    /// `raise_on_invalid_line` unset, a malformed line yields a field for
    /// which [`Field::is_valid`] is false.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if the line is not a content line and the
    /// policy says to raise.
    pub fn decode_with(line: &str, config: &DecodeConfig) -> DirInfoResult<Self> {
        let line = line
            .strip_suffix('\n')
            .map_or(line, |l| l.strip_suffix('\r').unwrap_or(l));

        match parse_content_line(line) {
            Ok(cl) => Ok(Self::from_content_line(line, cl)),
            Err(err) if config.raise_on_invalid_line => Err(err.in_text(line)),
            Err(err) => {
                tracing::warn!(%err, line, "Keeping invalid content line");
                Ok(Self {
                    line: line.to_string(),
                    group: None,
                    name: String::new(),
                    params: Params::new(),
                    value: None,
                })
            }
        }
    }

    fn from_content_line(line: &str, cl: ContentLine) -> Self {
        Self {
            line: line.to_string(),
            group: cl.group,
            name: cl.name,
            params: cl.params,
            value: Some(cl.value),
        }
    }

    /// Builds a field from components.
    ///
    /// An `ENCODING` parameter of `b64` requests base64: the value bytes are
    /// base64-encoded and the parameter is written as `ENCODING=B`. Binary
    /// values without an `ENCODING` parameter get `ENCODING=B` as well. Any
    /// other value under a declared `B` or `QUOTED-PRINTABLE` encoding is
    /// transfer-encoded from its payload bytes; [`FieldValue::Raw`] is always
    /// embedded as given.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the assembled line does not decode back to
    /// the requested name and group.
    pub fn create(name: &str, value: impl Into<FieldValue>, params: Params) -> DirInfoResult<Self> {
        Self::compose(None, name, params, &value.into())
    }

    /// Like [`Field::create`], with a group prefix.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the assembled line does not decode.
    pub fn create_grouped(
        group: &str,
        name: &str,
        value: impl Into<FieldValue>,
        params: Params,
    ) -> DirInfoResult<Self> {
        Self::compose(Some(group), name, params, &value.into())
    }

    /// The single path from components to a field; creation and mutation
    /// both go through here.
    fn compose(
        group: Option<&str>,
        name: &str,
        mut params: Params,
        value: &FieldValue,
    ) -> DirInfoResult<Self> {
        let text = transfer_encode(&mut params, value).map_err(into_unencodeable)?;
        let line = encode_line(group, name, &params, &text)?;
        let field = Self::decode(&line).map_err(into_unencodeable)?;

        if !field.is_name(name) || field.group.as_deref() != group {
            return Err(DirInfoError::Unencodeable(format!(
                "{line:?} does not decode to the requested group and name"
            )));
        }

        Ok(field)
    }

    /// The unfolded line text.
    #[must_use]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Whether the line matched the content-line grammar.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// The upper-cased name; empty for invalid fields.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_group(&self, group: &str) -> bool {
        self.group
            .as_deref()
            .is_some_and(|g| g.eq_ignore_ascii_case(group))
    }

    #[must_use]
    pub fn is_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// All values of a parameter.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&[String]> {
        self.params.values(name)
    }

    /// First value of a parameter, or `None` if absent or empty.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.params.first(name)
    }

    /// The upper-cased ENCODING parameter.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if ENCODING is multi-valued.
    pub fn encoding(&self) -> DirInfoResult<Option<String>> {
        Ok(single_value(&self.params, names::ENCODING)?.map(str::to_ascii_uppercase))
    }

    /// The transfer encoding declared by the ENCODING parameter.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if ENCODING is multi-valued or unrecognized.
    pub fn transfer_encoding(&self) -> DirInfoResult<TransferEncoding> {
        TransferEncoding::from_param(single_value(&self.params, names::ENCODING)?)
    }

    /// The lower-cased VALUE parameter.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if VALUE is multi-valued.
    pub fn kind(&self) -> DirInfoResult<Option<String>> {
        Ok(single_value(&self.params, names::VALUE)?.map(str::to_ascii_lowercase))
    }

    /// Whether VALUE equals `kind`, case-insensitively.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if VALUE is multi-valued.
    pub fn is_kind(&self, kind: &str) -> DirInfoResult<bool> {
        Ok(self
            .kind()?
            .is_some_and(|k| k.eq_ignore_ascii_case(kind)))
    }

    /// Whether the value is TEXT, either by default or explicitly.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if VALUE is multi-valued.
    pub fn is_text(&self) -> DirInfoResult<bool> {
        Ok(self.kind()?.is_none_or(|k| k == "text"))
    }

    /// Whether TYPE contains `kind`, case-insensitively.
    #[must_use]
    pub fn is_type(&self, kind: &str) -> bool {
        self.params
            .get(names::TYPE)
            .is_some_and(|p| p.has_value(kind))
    }

    /// Whether TYPE contains PREF.
    #[must_use]
    pub fn is_pref(&self) -> bool {
        self.is_type(values::PREF)
    }

    /// The value exactly as written, before any decoding.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The value with its transfer encoding removed.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if the field is invalid, the ENCODING
    /// parameter is unusable, or the payload does not decode.
    pub fn value_bytes(&self) -> DirInfoResult<Vec<u8>> {
        let raw = self.require_value()?;
        match self.transfer_encoding()? {
            TransferEncoding::Raw => Ok(raw.as_bytes().to_vec()),
            TransferEncoding::Base64 => decode_base64(raw),
            TransferEncoding::QuotedPrintable => Ok(decode_quoted_printable(raw)),
        }
    }

    /// The transfer-decoded value as text, honouring CHARSET.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if the bytes are not valid in the charset,
    /// or `Unsupported` for charsets other than UTF-8, US-ASCII and
    /// ISO-8859-1.
    pub fn value_str(&self) -> DirInfoResult<String> {
        let bytes = self.value_bytes()?;
        let charset = single_value(&self.params, names::CHARSET)?.map(str::to_ascii_uppercase);

        match charset.as_deref() {
            None | Some("UTF-8" | "US-ASCII") => String::from_utf8(bytes).map_err(|e| {
                DirInfoError::InvalidEncoding(format!("{} value is not UTF-8: {e}", self.name))
            }),
            Some("ISO-8859-1" | "LATIN1") => Ok(bytes.into_iter().map(char::from).collect()),
            Some(other) => Err(DirInfoError::Unsupported(format!("charset {other}"))),
        }
    }

    /// The value as unescaped TEXT.
    ///
    /// ## Errors
    /// Propagates [`Field::value_str`] errors.
    pub fn as_text(&self) -> DirInfoResult<String> {
        Ok(decode_text(&self.value_str()?))
    }

    /// The value as a comma-separated list of TEXT.
    ///
    /// ## Errors
    /// Propagates [`Field::value_str`] errors.
    pub fn as_text_list(&self) -> DirInfoResult<Vec<String>> {
        Ok(decode_text_list(&self.value_str()?, ','))
    }

    /// The value as an INTEGER.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if the value is not an integer.
    pub fn as_integer(&self) -> DirInfoResult<i64> {
        let value = self.value_str()?;
        match_integer(&value).map_err(|e| e.in_text(&value))
    }

    /// The value as a list of dates.
    ///
    /// Each item is decoded as a DATE-TIME first (keeping its date), and the
    /// whole value is decoded as DATEs if that fails.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if neither decoding succeeds for every item.
    pub fn as_dates(&self) -> DirInfoResult<Vec<DirDate>> {
        let value = self.value_str()?;
        match decode_date_time_list(&value) {
            Ok(list) => Ok(list.into_iter().map(|dt| dt.date).collect()),
            Err(_) => decode_date_list(&value),
        }
    }

    /// The value as a list of date-times.
    ///
    /// Plain DATE items become midnight UTC.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if neither decoding succeeds for every item.
    pub fn as_date_times(&self) -> DirInfoResult<Vec<DirDateTime>> {
        let value = self.value_str()?;
        match decode_date_time_list(&value) {
            Ok(list) => Ok(list),
            Err(_) => Ok(decode_date_list(&value)?
                .into_iter()
                .map(DirDateTime::start_of_day)
                .collect()),
        }
    }

    /// The value as a list of times.
    ///
    /// ## Errors
    /// Returns `InvalidEncoding` if any item is not a TIME.
    pub fn as_times(&self) -> DirInfoResult<Vec<DirTime>> {
        decode_time_list(&self.value_str()?)
    }

    /// Replaces the group.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the rebuilt line does not decode; the field
    /// is left unchanged.
    pub fn set_group(&mut self, group: Option<&str>) -> DirInfoResult<()> {
        let value = self.current_value()?;
        self.mutate(group, self.params.clone(), &value)
    }

    /// Replaces the value.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the rebuilt line does not decode; the field
    /// is left unchanged.
    pub fn set_value(&mut self, value: impl Into<FieldValue>) -> DirInfoResult<()> {
        self.current_value()?;
        let group = self.group.clone();
        self.mutate(group.as_deref(), self.params.clone(), &value.into())
    }

    /// Replaces all values of a parameter, adding it if absent.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the rebuilt line does not decode; the field
    /// is left unchanged.
    pub fn set_param<I, S>(&mut self, name: &str, values: I) -> DirInfoResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut params = self.params.clone();
        params.set(name, values);
        self.rebuild(params)
    }

    /// Removes a parameter. Removing an absent parameter is a no-op.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the rebuilt line does not decode.
    pub fn remove_param(&mut self, name: &str) -> DirInfoResult<()> {
        let mut params = self.params.clone();
        if params.remove(name).is_none() {
            return Ok(());
        }
        self.rebuild(params)
    }

    /// Adds `value` to a parameter's value set. Adding a value already
    /// present (case-insensitively) is a no-op.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the rebuilt line does not decode; the field
    /// is left unchanged.
    pub fn add_param_value(&mut self, name: &str, value: &str) -> DirInfoResult<()> {
        if self
            .params
            .get(name)
            .is_some_and(|p| p.has_value(value))
        {
            return Ok(());
        }

        let mut params = self.params.clone();
        params.append(name, vec![value.to_string()]);
        self.rebuild(params)
    }

    /// Removes `value` (case-insensitively) from a parameter's value set.
    /// Removing a value that is not present is a no-op; removing the last
    /// value removes the parameter.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if the rebuilt line does not decode; the field
    /// is left unchanged.
    pub fn remove_param_value(&mut self, name: &str, value: &str) -> DirInfoResult<()> {
        let Some(param) = self.params.get(name).filter(|p| p.has_value(value)) else {
            return Ok(());
        };

        let remaining: Vec<String> = param
            .values
            .iter()
            .filter(|v| !v.eq_ignore_ascii_case(value))
            .cloned()
            .collect();

        let mut params = self.params.clone();
        if remaining.is_empty() {
            params.remove(name);
        } else {
            params.set(name, remaining);
        }
        self.rebuild(params)
    }

    /// Encodes the line, folded at `width` octets and terminated by
    /// `newline`. A width of 0 disables folding.
    ///
    /// ## Errors
    /// Returns `Unencodeable` if `width` is 1.
    pub fn encode(&self, width: usize, newline: &str) -> DirInfoResult<String> {
        fold(&self.line, width, newline)
    }

    /// Encodes the line using configured width and newline.
    ///
    /// ## Errors
    /// Returns an error if the configuration is invalid.
    pub fn encode_with(&self, config: &EncodeConfig) -> DirInfoResult<String> {
        config.validate()?;
        self.encode(config.width, &config.newline)
    }

    fn require_value(&self) -> DirInfoResult<&str> {
        self.value.as_deref().ok_or_else(|| {
            DirInfoError::InvalidEncoding(format!("invalid content line {:?}", self.line))
        })
    }

    fn current_value(&self) -> DirInfoResult<FieldValue> {
        self.value.clone().map(FieldValue::Raw).ok_or_else(|| {
            DirInfoError::Unencodeable(format!(
                "invalid content line {:?} cannot be changed",
                self.line
            ))
        })
    }

    /// Rebuilds with new parameters, keeping group and raw value.
    fn rebuild(&mut self, params: Params) -> DirInfoResult<()> {
        let value = self.current_value()?;
        let group = self.group.clone();
        self.mutate(group.as_deref(), params, &value)
    }

    /// Replaces the whole state with the decoded candidate, or nothing.
    fn mutate(
        &mut self,
        group: Option<&str>,
        params: Params,
        value: &FieldValue,
    ) -> DirInfoResult<()> {
        let candidate = Self::compose(group, &self.name, params, value)?;
        tracing::trace!(from = %self.line, to = %candidate.line, "Rebuilt content line");
        *self = candidate;
        Ok(())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// Returns the only value of a parameter.
fn single_value<'a>(params: &'a Params, name: &str) -> DirInfoResult<Option<&'a str>> {
    match params.values(name) {
        None | Some([]) => Ok(None),
        Some([one]) => Ok(Some(one.as_str())),
        Some(many) => Err(DirInfoError::InvalidEncoding(format!(
            "multi-valued param '{name}' ({})",
            many.join(",")
        ))),
    }
}

/// Applies the transfer encoding requested by `params` to `value`, returning
/// the value text to embed.
fn transfer_encode(params: &mut Params, value: &FieldValue) -> DirInfoResult<String> {
    let requested = params
        .values(names::ENCODING)
        .is_some_and(|v| matches!(v, [one] if one.eq_ignore_ascii_case(values::BASE64_REQUEST)));
    if requested {
        params.set(names::ENCODING, [values::B]);
        return Ok(encode_base64(&value.payload_bytes()));
    }

    if let FieldValue::Raw(text) = value {
        let quoted_printable = params
            .get(names::ENCODING)
            .is_some_and(|p| p.has_value(values::QUOTED_PRINTABLE));
        if quoted_printable && text.ends_with('=') {
            return Err(DirInfoError::Unencodeable(format!(
                "quoted-printable value {text:?} ends in a soft line break"
            )));
        }
        return Ok(text.clone());
    }

    if value.is_binary() && !params.contains(names::ENCODING) {
        params.set(names::ENCODING, [values::B]);
    }

    match TransferEncoding::from_param(single_value(params, names::ENCODING)?)? {
        TransferEncoding::Base64 => Ok(encode_base64(&value.payload_bytes())),
        TransferEncoding::QuotedPrintable => Ok(encode_quoted_printable(&value.payload_bytes())),
        TransferEncoding::Raw if value.is_binary() => Err(DirInfoError::Unencodeable(
            "binary value needs ENCODING=B or QUOTED-PRINTABLE".to_string(),
        )),
        TransferEncoding::Raw => Ok(value.render()),
    }
}

fn into_unencodeable(err: DirInfoError) -> DirInfoError {
    match err {
        DirInfoError::InvalidEncoding(msg) => DirInfoError::Unencodeable(msg),
        other => other,
    }
}
