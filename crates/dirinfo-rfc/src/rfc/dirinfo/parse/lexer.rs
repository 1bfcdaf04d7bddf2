//! Line unfolding and content line parsing (RFC 2425 §5.8.1, §5.8.2).

use super::error::{GrammarError, GrammarErrorKind, GrammarResult};
use super::grammar::{is_name_char, is_qsafe_char, is_safe_char};
use crate::rfc::dirinfo::core::Params;
use crate::rfc::dirinfo::core::parameter::{names, values};

/// Splits raw text into logical lines.
///
/// A physical line starting with SPACE or HTAB continues the previous logical
/// line (the whitespace character is removed). A quoted-printable line ending
/// in a soft line break (`=`) is joined with the following physical line.
/// Empty physical lines are dropped. Handles both CRLF and bare LF.
#[must_use]
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn unfold(input: &str) -> Vec<String> {
    unfold_numbered(input)
        .into_iter()
        .map(|(_, line)| line)
        .collect()
}

/// Like [`unfold`], keeping the 1-based physical line number where each
/// logical line starts.
#[must_use]
pub fn unfold_numbered(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push((i + 1, continuation.to_string()));
            }
        } else if let Some((_, prev)) = lines
            .last_mut()
            .filter(|(_, prev)| ends_in_soft_line_break(prev))
        {
            prev.pop();
            prev.push_str(line);
        } else if !line.is_empty() {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Returns whether `line` is a quoted-printable content line whose value ends
/// in a soft line break.
///
/// Only a parsed ENCODING parameter (or a bare v2.1 `QUOTED-PRINTABLE` token)
/// counts; names and other parameter values are not searched.
fn ends_in_soft_line_break(line: &str) -> bool {
    line.ends_with('=')
        && parse_content_line(line).is_ok_and(|cl| {
            cl.params
                .get(names::ENCODING)
                .is_some_and(|p| p.has_value(values::QUOTED_PRINTABLE))
        })
}

/// A parsed content line before value interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Group prefix (e.g., "item1" in "item1.TEL"), case preserved.
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    /// Parameters.
    pub params: Params,
    /// Raw value string, surrounding whitespace removed.
    pub value: String,
}

/// Parses a single unfolded content line into its components.
///
/// Format: `[group.]name *(";" param) ":" value`, where a param is either
/// `name "=" param-value *("," param-value)` or a bare v2.1 token. A bare
/// `QUOTED-PRINTABLE` or `BASE64` token becomes an ENCODING parameter; any
/// other bare token becomes a TYPE parameter.
///
/// ## Errors
/// Returns an error describing the first grammar mismatch.
pub fn parse_content_line(line: &str) -> GrammarResult<ContentLine> {
    let mut cursor = Cursor::new(line);

    // v2.1 allows several group prefixes; the group is everything before
    // the last dot.
    let mut segments = vec![cursor.name("property name")?];
    while cursor.eat('.') {
        segments.push(cursor.name("property name")?);
    }
    let name = segments.pop().unwrap_or_default().to_ascii_uppercase();
    let group = (!segments.is_empty()).then(|| segments.join("."));

    let mut params = Params::new();
    while cursor.eat(';') {
        let (pname, pvalues) = cursor.param()?;
        params.append(&pname, pvalues);
    }

    if !cursor.eat(':') {
        return Err(match cursor.peek() {
            None => GrammarError::new(
                GrammarErrorKind::MissingColon,
                cursor.pos,
                "missing colon separator",
            ),
            found => GrammarError::unexpected(cursor.pos, "';' or ':'", found),
        });
    }

    let value = cursor.rest();
    if let Some(pos) = value.find(['\r', '\n']) {
        return Err(GrammarError::new(
            GrammarErrorKind::InvalidValue,
            cursor.pos + pos,
            "line break in value",
        ));
    }

    Ok(ContentLine {
        group,
        name,
        params,
        value: value.trim().to_string(),
    })
}

/// Character cursor over one content line.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek().filter(|c| pred(*c)) {
            self.pos += c.len_utf8();
        }
        &self.line[start..self.pos]
    }

    fn rest(&mut self) -> &'a str {
        let rest = &self.line[self.pos..];
        self.pos = self.line.len();
        rest
    }

    /// Consumes `1*(ALPHA / DIGIT / "-")`.
    fn name(&mut self, what: &str) -> GrammarResult<&'a str> {
        let name = self.take_while(is_name_char);
        if name.is_empty() {
            let found = self.peek();
            return Err(GrammarError::new(
                GrammarErrorKind::InvalidName,
                self.pos,
                format!(
                    "expected {what}, found {}",
                    found.map_or_else(|| "end of line".to_string(), |c| format!("{c:?}"))
                ),
            ));
        }
        Ok(name)
    }

    /// Consumes one parameter after its leading `;`.
    fn param(&mut self) -> GrammarResult<(String, Vec<String>)> {
        let name = self.name("parameter name")?;

        if !self.eat('=') {
            let upper = name.to_ascii_uppercase();
            let pname = if upper == values::QUOTED_PRINTABLE || upper == "BASE64" {
                names::ENCODING
            } else {
                names::TYPE
            };
            return Ok((pname.to_string(), vec![name.to_string()]));
        }

        let mut pvalues = Vec::new();
        if matches!(self.peek(), Some(';' | ':') | None) {
            return Ok((name.to_ascii_uppercase(), pvalues));
        }

        loop {
            pvalues.push(self.param_value()?);
            if !self.eat(',') {
                break;
            }
        }

        Ok((name.to_ascii_uppercase(), pvalues))
    }

    /// Consumes `quoted-string / 1*SAFE-CHAR`.
    fn param_value(&mut self) -> GrammarResult<String> {
        if self.eat('"') {
            let start = self.pos;
            let text = self.take_while(is_qsafe_char);
            if !self.eat('"') {
                return Err(GrammarError::new(
                    GrammarErrorKind::UnterminatedQuote,
                    start,
                    "quoted parameter value is not closed",
                ));
            }
            return Ok(text.to_string());
        }

        let text = self.take_while(is_safe_char);
        if text.is_empty() {
            return Err(GrammarError::new(
                GrammarErrorKind::InvalidParameter,
                self.pos,
                "empty parameter value",
            ));
        }
        Ok(text.to_string())
    }
}
